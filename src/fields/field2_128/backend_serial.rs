use subtle::{Choice, ConditionallySelectable};

/// Multiplies two GF(2^128) elements in polynomial form.
///
/// This is the textbook shift-and-add loop: one doubling and one masked XOR per bit of `y`. Both
/// the addition and the reduction are selected with masks, so the loop runs the same instructions
/// whatever the operands are.
pub(super) fn galois_multiply(x: u128, y: u128) -> u128 {
    let mut product = 0u128;
    let mut addend = x;
    for i in 0..128 {
        let bit = Choice::from(((y >> i) & 1) as u8);
        product ^= u128::conditional_select(&0, &addend, bit);
        addend = times_x(addend);
    }
    product
}

/// Multiply by x. In polynomial form this is the EAX doubling of a big-endian block.
fn times_x(value: u128) -> u128 {
    let carry = Choice::from((value >> 127) as u8);
    (value << 1) ^ u128::conditional_select(&0, &0x87, carry)
}
