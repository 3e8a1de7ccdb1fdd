//! Arithmetic in GF(2^128) for block cipher modes.
//!
//! GCM, EAX and XTS all work in the field GF(2^128) defined by x^128 + x^7 + x^2 + x + 1, but lay
//! out its elements in 16-byte blocks in three incompatible ways. This crate provides:
//!
//! - [`FieldElement`], the raw four-word form, with big- and little-endian encodings.
//! - Convention-tagged elements ([`GcmElement`], [`EaxElement`], [`XtsElement`]) whose
//!   [`double`](Element::double) multiplies by x in constant time.
//! - [`MultiplierContext`], full field multiplication under the GCM convention by a fixed key, with
//!   interchangeable [`Backend`]s behind the [`Multiplier`] trait.
//! - [`Ghash`], the GHASH universal hash built on a multiplier.

pub mod error;
pub mod fields;
pub mod ghash;
#[cfg(test)]
mod test_vector;

pub use error::Error;
pub use fields::{
    BLOCK_SIZE, Endianness, FieldElement,
    convention::{
        Convention, Eax, EaxElement, Element, Gcm, GcmElement, Xts, XtsElement, dbl, dbl_eax,
        dbl_xts,
    },
    field2_128::{Backend, Multiplier, MultiplierContext},
};
pub use ghash::Ghash;
