use std::fmt::Debug;

/// The unreduced carryless product of two 128-bit polynomials. Bit `i` of `low` is the
/// coefficient of x^i, bit `i` of `high` the coefficient of x^(128 + i).
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) struct U256 {
    pub(super) high: u128,
    pub(super) low: u128,
}

impl U256 {
    /// Combine the four 64x64 partial products of a schoolbook carryless multiplication.
    pub(super) fn from_partial_products(low: u128, cross: u128, high: u128) -> Self {
        Self {
            low: low ^ (cross << 64),
            high: high ^ (cross >> 64),
        }
    }
}

impl Debug for U256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("U256")
            .field("high", &format_args!("0x{:032x}", self.high))
            .field("low", &format_args!("0x{:032x}", self.low))
            .finish()
    }
}

/// Exponents of the low terms of the field polynomial, x^7 + x^2 + x + 1.
const REDUCTION_TERMS: [u32; 4] = [0, 1, 2, 7];

/// Multiply `value` by x^7 + x^2 + x + 1, returning the low 128 bits and the bits that overflow.
fn mul_reduction_terms(value: u128) -> (u128, u128) {
    REDUCTION_TERMS
        .iter()
        .fold((0, 0), |(low, overflow), &exponent| {
            (
                low ^ (value << exponent),
                overflow ^ value.checked_shr(128 - exponent).unwrap_or(0),
            )
        })
}

/// Reduce a 255-bit product modulo x^128 + x^7 + x^2 + x + 1.
pub(super) fn reduce(product: U256) -> u128 {
    // high * x^128 = high * (x^7 + x^2 + x + 1). The first fold leaves at most 7 bits above x^127,
    // and folding those produces at most 14 bits, so two folds always suffice.
    let (folded, overflow) = mul_reduction_terms(product.high);
    let (refolded, leftover) = mul_reduction_terms(overflow);
    debug_assert_eq!(leftover, 0);
    product.low ^ folded ^ refolded
}
