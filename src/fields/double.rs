//! Multiplication by x, one function per convention.
//!
//! All three reduce by x^128 + x^7 + x^2 + x + 1. They differ in which end of the word array holds
//! x^0 and therefore in the shift direction and where the reduction constant lands. The bit shifted
//! out of the top of the value picks the reduction mask through `subtle`, never through a branch.

use subtle::{Choice, ConditionallySelectable};

/// x^7 + x^2 + x + 1 with x^0 in the most significant bit of the most significant word.
const REFLECTED_REDUCTION: u32 = 0xe100_0000;

/// x^7 + x^2 + x + 1 with x^0 in the least significant bit of the least significant word.
const REDUCTION: u32 = 0x0000_0087;

/// Returns `polynomial` if `carry` is 1 and zero if it is 0.
fn reduction_mask(carry: u32, polynomial: u32) -> u32 {
    debug_assert!(carry <= 1);
    u32::conditional_select(&0, &polynomial, Choice::from(carry as u8))
}

/// GCM: big-endian words, x^0 is the top bit of word 0, so multiplying by x is a right shift.
pub(crate) fn double_gcm([v0, v1, v2, v3]: [u32; 4]) -> [u32; 4] {
    let mask = reduction_mask(v3 & 1, REFLECTED_REDUCTION);
    [
        (v0 >> 1) ^ mask,
        (v1 >> 1) | (v0 << 31),
        (v2 >> 1) | (v1 << 31),
        (v3 >> 1) | (v2 << 31),
    ]
}

/// EAX: big-endian words, x^0 is the bottom bit of word 3, so multiplying by x is a left shift.
pub(crate) fn double_eax([v0, v1, v2, v3]: [u32; 4]) -> [u32; 4] {
    let mask = reduction_mask(v0 >> 31, REDUCTION);
    [
        (v0 << 1) | (v1 >> 31),
        (v1 << 1) | (v2 >> 31),
        (v2 << 1) | (v3 >> 31),
        (v3 << 1) ^ mask,
    ]
}

/// XTS: little-endian words, x^0 is the bottom bit of word 0. Carries run from word 0 upwards.
pub(crate) fn double_xts([v0, v1, v2, v3]: [u32; 4]) -> [u32; 4] {
    let mask = reduction_mask(v3 >> 31, REDUCTION);
    [
        (v0 << 1) ^ mask,
        (v1 << 1) | (v0 >> 31),
        (v2 << 1) | (v1 >> 31),
        (v3 << 1) | (v2 >> 31),
    ]
}
