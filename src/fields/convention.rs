//! Field elements tagged with the convention of the standard they belong to.
//!
//! GCM, EAX and XTS all use GF(2^128) modulo x^128 + x^7 + x^2 + x + 1, but each maps the 16-byte
//! block onto polynomial coefficients differently:
//!
//! | Convention | Word order | x^0 lives in | Doubling |
//! |---|---|---|---|
//! | [`Gcm`] | big-endian | top bit of byte 0 | right shift, reduce with `0xe1` in byte 0 |
//! | [`Eax`] | big-endian | bottom bit of byte 15 | left shift, reduce with `0x87` in byte 15 |
//! | [`Xts`] | little-endian | bottom bit of byte 0 | left shift, reduce with `0x87` in byte 0 |
//!
//! An [`Element`] carries its convention in its type, so a value produced under one convention
//! cannot be handed to another convention's operations.

use crate::{
    error::Error,
    fields::{
        BLOCK_SIZE, Endianness, FieldElement,
        double::{double_eax, double_gcm, double_xts},
    },
};
use std::{
    fmt::Debug,
    marker::PhantomData,
    ops::{Add, AddAssign},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

mod sealed {
    pub trait Sealed {}
}

/// One of the bit and byte orderings used for GF(2^128) by block cipher modes.
pub trait Convention: sealed::Sealed + Clone + Copy + Debug + Default + 'static {
    /// Name used when formatting elements.
    const NAME: &'static str;

    /// Byte order of the words in the external form.
    const ENDIANNESS: Endianness;

    /// Multiply an element, given as words in [`Self::ENDIANNESS`] order, by x.
    fn double(words: [u32; 4]) -> [u32; 4];
}

/// NIST SP 800-38D (GCM and GHASH).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gcm;

/// EAX mode, and CMAC subkey generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Eax;

/// IEEE Std 1619-2007 (XTS-AES) tweak updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Xts;

impl sealed::Sealed for Gcm {}
impl sealed::Sealed for Eax {}
impl sealed::Sealed for Xts {}

impl Convention for Gcm {
    const NAME: &'static str = "GcmElement";
    const ENDIANNESS: Endianness = Endianness::BigEndian;

    fn double(words: [u32; 4]) -> [u32; 4] {
        double_gcm(words)
    }
}

impl Convention for Eax {
    const NAME: &'static str = "EaxElement";
    const ENDIANNESS: Endianness = Endianness::BigEndian;

    fn double(words: [u32; 4]) -> [u32; 4] {
        double_eax(words)
    }
}

impl Convention for Xts {
    const NAME: &'static str = "XtsElement";
    const ENDIANNESS: Endianness = Endianness::LittleEndian;

    fn double(words: [u32; 4]) -> [u32; 4] {
        double_xts(words)
    }
}

/// An element of GF(2^128) interpreted under convention `C`.
#[derive(Clone, Copy, Default)]
pub struct Element<C: Convention> {
    inner: FieldElement,
    convention: PhantomData<C>,
}

/// An element under the GCM convention.
pub type GcmElement = Element<Gcm>;
/// An element under the EAX convention.
pub type EaxElement = Element<Eax>;
/// An element under the XTS convention.
pub type XtsElement = Element<Xts>;

impl<C: Convention> Element<C> {
    /// The additive identity.
    pub const ZERO: Self = Self::from_field_element(FieldElement::ZERO);

    /// Reinterpret raw words under this convention. The words must already be in the convention's
    /// [`Endianness`].
    pub const fn from_field_element(inner: FieldElement) -> Self {
        Self {
            inner,
            convention: PhantomData,
        }
    }

    pub const fn field_element(&self) -> FieldElement {
        self.inner
    }

    pub fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        Self::from_field_element(FieldElement::from_bytes(bytes, C::ENDIANNESS))
    }

    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        self.inner.encode(C::ENDIANNESS)
    }

    /// Multiply this element by x.
    pub fn double(&self) -> Self {
        Self::from_field_element(FieldElement::from_words(C::double(self.inner.words())))
    }

    /// Multiply this element by x, in place.
    pub fn double_in_place(&mut self) {
        *self = self.double();
    }
}

impl<C: Convention> TryFrom<&[u8]> for Element<C> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        FieldElement::decode(value, C::ENDIANNESS).map(Self::from_field_element)
    }
}

impl<C: Convention> From<&[u8; BLOCK_SIZE]> for Element<C> {
    fn from(value: &[u8; BLOCK_SIZE]) -> Self {
        Self::from_bytes(value)
    }
}

impl<C: Convention> From<Element<C>> for [u8; BLOCK_SIZE] {
    fn from(value: Element<C>) -> Self {
        value.to_bytes()
    }
}

impl<C: Convention> Debug for Element<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", C::NAME)?;
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl<C: Convention> ConstantTimeEq for Element<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.inner.ct_eq(&other.inner)
    }
}

impl<C: Convention> PartialEq for Element<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: Convention> Eq for Element<C> {}

impl<C: Convention> ConditionallySelectable for Element<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::from_field_element(FieldElement::conditional_select(&a.inner, &b.inner, choice))
    }
}

impl<C: Convention> Add<Self> for Element<C> {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_field_element(self.inner ^ rhs.inner)
    }
}

impl<C: Convention> Add<&Self> for Element<C> {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: &Self) -> Self::Output {
        Self::from_field_element(self.inner ^ rhs.inner)
    }
}

impl<C: Convention> AddAssign for Element<C> {
    #[allow(clippy::suspicious_op_assign_impl)]
    fn add_assign(&mut self, rhs: Self) {
        self.inner ^= rhs.inner;
    }
}

#[cfg(feature = "zeroize")]
impl<C: Convention> zeroize::Zeroize for Element<C> {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

/// Double a big-endian block under the GCM convention.
pub fn dbl(value: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    GcmElement::from_bytes(value).double().to_bytes()
}

/// Double a big-endian block under the EAX convention.
pub fn dbl_eax(value: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    EaxElement::from_bytes(value).double().to_bytes()
}

/// Double a little-endian block under the XTS convention.
pub fn dbl_xts(value: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    XtsElement::from_bytes(value).double().to_bytes()
}
