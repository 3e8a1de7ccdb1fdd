#[cfg(target_arch = "x86")]
use std::arch::x86::{__m128i, _mm_clmulepi64_si128, _mm_set_epi64x, _mm_xor_si128};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::{__m128i, _mm_clmulepi64_si128, _mm_set_epi64x, _mm_xor_si128};

use super::product::{U256, reduce};

/// Multiplies two GF(2^128) elements in polynomial form, using the PCLMULQDQ instruction for the
/// carryless product.
#[target_feature(enable = "sse2")]
#[target_feature(enable = "pclmulqdq")]
pub(super) fn galois_multiply(x: u128, y: u128) -> u128 {
    reduce(clmul128(x, y))
}

#[target_feature(enable = "sse2")]
#[target_feature(enable = "pclmulqdq")]
fn clmul128(x: u128, y: u128) -> U256 {
    let x = to_vector(x);
    let y = to_vector(y);

    // Bit 0 of the immediate picks the lane of `x`, bit 4 the lane of `y`.
    let low = _mm_clmulepi64_si128::<0x00>(x, y);
    let cross = _mm_xor_si128(
        _mm_clmulepi64_si128::<0x01>(x, y),
        _mm_clmulepi64_si128::<0x10>(x, y),
    );
    let high = _mm_clmulepi64_si128::<0x11>(x, y);

    U256::from_partial_products(from_vector(low), from_vector(cross), from_vector(high))
}

#[target_feature(enable = "sse2")]
fn to_vector(value: u128) -> __m128i {
    _mm_set_epi64x((value >> 64) as u64 as i64, value as u64 as i64)
}

fn from_vector(value: __m128i) -> u128 {
    // SAFETY: both types are 16 bytes of plain data with no invalid bit patterns. x86 is
    // little-endian, so lane 0 becomes the low half.
    unsafe { std::mem::transmute::<__m128i, u128>(value) }
}
