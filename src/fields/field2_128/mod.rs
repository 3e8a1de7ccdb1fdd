//! Multiplication in GF(2^128) under the GCM convention.
//!
//! The field is defined using the irreducible polynomial x^128 + x^7 + x^2 + x + 1. Backends work
//! on the polynomial form of an element: a `u128` whose bit `i` is the coefficient of x^i. GCM
//! blocks hold x^0 in the most significant bit of the first byte, so moving between the two forms
//! is a big-endian load followed by a bit reversal.

use crate::{
    error::Error,
    fields::{BLOCK_SIZE, FieldElement, block, convention::GcmElement},
};
use serde::Deserialize;
#[cfg(target_arch = "aarch64")]
use std::arch::is_aarch64_feature_detected;
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
use std::sync::atomic::{AtomicU8, Ordering};
use std::fmt::{Debug, Display};

#[cfg(target_arch = "aarch64")]
mod backend_aarch64;
mod backend_bit_slicing;
mod backend_serial;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod backend_x86;
mod product;

/// Multiplication by a fixed element `H`, such as the GHASH hash subkey.
///
/// [`MultiplierContext`] is the implementation provided here. Callers holding an external
/// multiplier, for instance one inside a secure element, can implement this trait for it and use
/// it anywhere a context is accepted.
pub trait Multiplier {
    /// Compute `y * H`.
    fn multiply(&self, y: &GcmElement) -> GcmElement;

    /// Compute `y * H` for a block in external form, which must be exactly [`BLOCK_SIZE`] bytes.
    fn multiply_bytes(&self, y: &[u8]) -> Result<[u8; BLOCK_SIZE], Error> {
        let y = GcmElement::try_from(y)?;
        Ok(self.multiply(&y).to_bytes())
    }
}

impl<M: Multiplier + ?Sized> Multiplier for &M {
    fn multiply(&self, y: &GcmElement) -> GcmElement {
        (**self).multiply(y)
    }
}

/// Strategies for computing the field product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Bit-serial shift-and-add. Slow, small and easy to audit.
    Serial,
    /// Bit-sliced carryless multiplication built from integer multiplies. Runs anywhere.
    Portable,
    /// Carryless multiplication instructions: PCLMULQDQ on x86, PMULL on aarch64.
    Clmul,
}

impl Backend {
    /// The fastest backend this CPU supports.
    pub fn detect() -> Self {
        if clmul_supported() {
            Self::Clmul
        } else {
            Self::Portable
        }
    }

    /// Whether this backend can run on this CPU.
    pub fn is_available(self) -> bool {
        match self {
            Self::Serial | Self::Portable => true,
            Self::Clmul => clmul_supported(),
        }
    }

    /// Multiply two elements in polynomial form.
    ///
    /// Callers must only select [`Backend::Clmul`] after checking [`Backend::is_available`].
    fn galois_multiply(self, x: u128, y: u128) -> u128 {
        match self {
            Self::Serial => backend_serial::galois_multiply(x, y),
            Self::Portable => backend_bit_slicing::galois_multiply(x, y),
            Self::Clmul => clmul_multiply(x, y),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Serial => "serial",
            Self::Portable => "portable",
            Self::Clmul => "clmul",
        })
    }
}

/// Lazily evaluated, cached result of a CPU feature check.
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
struct CpuFeature {
    /// One of the `UNKNOWN`, `ABSENT` or `PRESENT` constants. Threads may race to fill it in; they
    /// all store the same answer.
    state: AtomicU8,
    detect: fn() -> bool,
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
impl CpuFeature {
    const UNKNOWN: u8 = 0;
    const ABSENT: u8 = 1;
    const PRESENT: u8 = 2;

    const fn new(detect: fn() -> bool) -> Self {
        Self {
            state: AtomicU8::new(Self::UNKNOWN),
            detect,
        }
    }

    fn get(&self) -> bool {
        match self.state.load(Ordering::Relaxed) {
            Self::PRESENT => true,
            Self::ABSENT => false,
            _ => {
                let present = (self.detect)();
                let state = if present { Self::PRESENT } else { Self::ABSENT };
                self.state.store(state, Ordering::Relaxed);
                present
            }
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
static CLMUL: CpuFeature = CpuFeature::new(|| {
    is_x86_feature_detected!("sse2") && is_x86_feature_detected!("pclmulqdq")
});
#[cfg(target_arch = "aarch64")]
static CLMUL: CpuFeature = CpuFeature::new(|| {
    is_aarch64_feature_detected!("neon") && is_aarch64_feature_detected!("aes")
});

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
fn clmul_supported() -> bool {
    CLMUL.get()
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn clmul_supported() -> bool {
    false
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn clmul_multiply(x: u128, y: u128) -> u128 {
    debug_assert!(CLMUL.get());
    // SAFETY: `Backend::Clmul` is only stored in a context after feature detection succeeded.
    unsafe { backend_x86::galois_multiply(x, y) }
}

#[cfg(target_arch = "aarch64")]
fn clmul_multiply(x: u128, y: u128) -> u128 {
    debug_assert!(CLMUL.get());
    // SAFETY: `Backend::Clmul` is only stored in a context after feature detection succeeded.
    unsafe { backend_aarch64::galois_multiply(x, y) }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn clmul_multiply(_: u128, _: u128) -> u128 {
    unreachable!("carryless multiplication instructions are never selected on this architecture")
}

/// Convert a GCM element to polynomial form.
fn to_polynomial(element: &GcmElement) -> u128 {
    let [w0, w1, w2, w3] = element.field_element().words();
    let big_endian =
        (u128::from(w0) << 96) | (u128::from(w1) << 64) | (u128::from(w2) << 32) | u128::from(w3);
    big_endian.reverse_bits()
}

/// Convert an element in polynomial form to the GCM convention.
fn from_polynomial(polynomial: u128) -> GcmElement {
    let big_endian = polynomial.reverse_bits();
    GcmElement::from_field_element(FieldElement::from_words([
        (big_endian >> 96) as u32,
        (big_endian >> 64) as u32,
        (big_endian >> 32) as u32,
        big_endian as u32,
    ]))
}

/// Multiplication by a fixed key `H`, under the GCM convention.
///
/// Creating a context only normalizes the key's byte and bit order; no tables are built. The
/// context is never modified after creation, so it can be shared by reference, but it holds key
/// material and is meant to live exactly as long as the session that owns it.
#[derive(Clone)]
pub struct MultiplierContext {
    /// `H` in polynomial form.
    h: u128,
    backend: Backend,
}

impl MultiplierContext {
    /// Prepare to multiply by the big-endian key `H`, using the fastest available backend.
    pub fn new(key: &[u8; BLOCK_SIZE]) -> Self {
        Self::from_parts(key, Backend::detect())
    }

    /// Prepare to multiply by the big-endian key `H` with a specific backend.
    ///
    /// Fails if the backend cannot run on this CPU. No other backend is substituted.
    pub fn with_backend(key: &[u8; BLOCK_SIZE], backend: Backend) -> Result<Self, Error> {
        if !backend.is_available() {
            tracing::warn!(%backend, "requested GF(2^128) multiplier backend is unavailable");
            return Err(Error::BackendUnavailable { backend });
        }
        Ok(Self::from_parts(key, backend))
    }

    fn from_parts(key: &[u8; BLOCK_SIZE], backend: Backend) -> Self {
        tracing::debug!(%backend, "initialized GF(2^128) multiplier");
        Self {
            h: to_polynomial(&GcmElement::from_bytes(key)),
            backend,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}

impl Multiplier for MultiplierContext {
    fn multiply(&self, y: &GcmElement) -> GcmElement {
        from_polynomial(self.backend.galois_multiply(to_polynomial(y), self.h))
    }
}

impl TryFrom<&[u8]> for MultiplierContext {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self::new(block(value)?))
    }
}

impl Debug for MultiplierContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiplierContext")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for MultiplierContext {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.h);
    }
}
