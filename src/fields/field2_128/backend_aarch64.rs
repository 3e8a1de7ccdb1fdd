use core::arch::aarch64::vmull_p64;

use super::product::{U256, reduce};

/// Multiplies two GF(2^128) elements in polynomial form, using the PMULL instruction for the
/// carryless product.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
pub(super) fn galois_multiply(x: u128, y: u128) -> u128 {
    let (x_high, x_low) = ((x >> 64) as u64, x as u64);
    let (y_high, y_low) = ((y >> 64) as u64, y as u64);

    let low = vmull_p64(x_low, y_low);
    let cross = vmull_p64(x_high, y_low) ^ vmull_p64(x_low, y_high);
    let high = vmull_p64(x_high, y_high);

    reduce(U256::from_partial_products(low, cross, high))
}
