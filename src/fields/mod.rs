//! Elements of GF(2^128) and their 16-byte external forms.
//!
//! A [`FieldElement`] is four 32-bit words and nothing more. Which bit of which word holds which
//! power of x depends on the standard in use, and that choice is made by the typed wrappers in
//! [`convention`].
use crate::error::Error;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::{
    fmt::Debug,
    ops::{BitXor, BitXorAssign},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

pub mod convention;
mod double;
pub mod field2_128;

/// Size in bytes of the external form of a field element.
pub const BLOCK_SIZE: usize = 16;

/// Byte order of each 32-bit word in the external form of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Used by GCM and EAX.
    BigEndian,
    /// Used by XTS.
    LittleEndian,
}

/// A 128-bit value held as four 32-bit words.
///
/// Word `i` is formed from bytes `[4i, 4i + 4)` of the external form, in the [`Endianness`] given
/// at decoding time.
#[derive(Clone, Copy, Default)]
pub struct FieldElement([u32; 4]);

impl FieldElement {
    /// The all-zero element.
    pub const ZERO: Self = Self([0; 4]);

    pub const fn from_words(words: [u32; 4]) -> Self {
        Self(words)
    }

    pub const fn words(&self) -> [u32; 4] {
        self.0
    }

    /// Decode the external form of an element.
    pub fn from_bytes(bytes: &[u8; BLOCK_SIZE], order: Endianness) -> Self {
        let mut words = [0u32; 4];
        match order {
            Endianness::BigEndian => BigEndian::read_u32_into(bytes, &mut words),
            Endianness::LittleEndian => LittleEndian::read_u32_into(bytes, &mut words),
        }
        Self(words)
    }

    /// Decode the external form of an element from a slice, which must be exactly
    /// [`BLOCK_SIZE`] bytes long.
    pub fn decode(bytes: &[u8], order: Endianness) -> Result<Self, Error> {
        Ok(Self::from_bytes(block(bytes)?, order))
    }

    /// Encode this element into its external form.
    pub fn encode(&self, order: Endianness) -> [u8; BLOCK_SIZE] {
        let mut bytes = [0u8; BLOCK_SIZE];
        match order {
            Endianness::BigEndian => BigEndian::write_u32_into(&self.0, &mut bytes),
            Endianness::LittleEndian => LittleEndian::write_u32_into(&self.0, &mut bytes),
        }
        bytes
    }
}

/// View a slice as a single block, or report how far off its length is.
pub(crate) fn block(bytes: &[u8]) -> Result<&[u8; BLOCK_SIZE], Error> {
    <&[u8; BLOCK_SIZE]>::try_from(bytes).map_err(|_| Error::InvalidLength {
        expected: BLOCK_SIZE,
        actual: bytes.len(),
    })
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [w0, w1, w2, w3] = self.0;
        write!(f, "FieldElement([0x{w0:08x}, 0x{w1:08x}, 0x{w2:08x}, 0x{w3:08x}])")
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(std::array::from_fn(|i| {
            u32::conditional_select(&a.0[i], &b.0[i], choice)
        }))
    }
}

impl BitXor for FieldElement {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let [a0, a1, a2, a3] = self.0;
        let [b0, b1, b2, b3] = rhs.0;
        Self([a0 ^ b0, a1 ^ b1, a2 ^ b2, a3 ^ b3])
    }
}

impl BitXorAssign for FieldElement {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
