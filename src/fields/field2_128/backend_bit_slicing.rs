use super::product::{U256, reduce};

/// Multiplies two GF(2^128) elements in polynomial form.
///
/// This implementation uses SIMD-within-a-register techniques: carryless products are assembled
/// from ordinary integer multiplications of operands with most of their bits masked off.
pub(super) fn galois_multiply(x: u128, y: u128) -> u128 {
    reduce(clmul128(x, y))
}

/// Number of interleaved bit groups. Each integer product of two masked operands can accumulate
/// carries of at most four bits' width before disturbing the next group member.
const GROUPS: usize = 5;

/// Every fifth bit, starting at bit `offset`.
const fn every_fifth_bit(offset: usize) -> u128 {
    let mut mask = 0u128;
    let mut bit = offset;
    while bit < 128 {
        mask |= 1 << bit;
        bit += GROUPS;
    }
    mask
}

const MASKS: [u128; GROUPS] = [
    every_fifth_bit(0),
    every_fifth_bit(1),
    every_fifth_bit(2),
    every_fifth_bit(3),
    every_fifth_bit(4),
];

/// Carryless multiplication of two 64-bit arguments.
///
/// See <https://timtaubert.de/blog/2017/06/verified-binary-multiplication-for-ghash/>. Operand
/// bits are split into five groups, with four zero bits between group members. Integer products
/// of one group of `x` with one group of `y` then leave the carries in the gaps, and the wanted
/// parity bit of each output position lands in the group whose index is the sum of the two input
/// group indices, mod five.
fn clmul64(x: u64, y: u64) -> u128 {
    let x_groups = MASKS.map(|mask| u128::from(x & mask as u64));
    let y_groups = MASKS.map(|mask| u128::from(y & mask as u64));

    let mut product = 0;
    for (output_group, mask) in MASKS.iter().enumerate() {
        let mut sum = 0u128;
        for (x_group, x_bits) in x_groups.iter().enumerate() {
            let y_group = (GROUPS + output_group - x_group) % GROUPS;
            sum ^= x_bits * y_groups[y_group];
        }
        product |= sum & mask;
    }
    product
}

/// Carryless multiplication of two 128-bit arguments, by Karatsuba over 64-bit halves.
fn clmul128(x: u128, y: u128) -> U256 {
    let (x_high, x_low) = ((x >> 64) as u64, x as u64);
    let (y_high, y_low) = ((y >> 64) as u64, y as u64);

    let low = clmul64(x_low, y_low);
    let high = clmul64(x_high, y_high);
    let middle = clmul64(x_low ^ x_high, y_low ^ y_high);

    U256::from_partial_products(low, middle ^ low ^ high, high)
}
