//! 256/512-bit intermediates for products of two amounts.
//!
//! Every `a * b / c` in the engine is evaluated here so that no product of
//! two `u128` quantities is ever truncated. Results are narrowed back to
//! `u128` with an explicit overflow check.

use primitive_types::{U256, U512};

use crate::domain::{Amount, Rounding};
use crate::error::AmmError;

/// `a * b` as a 256-bit value. Never overflows.
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Floor square root of `value`.
#[must_use]
pub fn isqrt(value: U256) -> U256 {
    value.integer_sqrt()
}

/// Floor square root of `a * b`. The root of a product of two `u128`
/// values always fits in `u128`.
#[must_use]
pub fn isqrt_product(a: u128, b: u128) -> u128 {
    isqrt(product(a, b)).low_u128()
}

/// Narrows a 256-bit value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] tagged with `what` if `value` does not
/// fit.
pub fn narrow(value: U256, what: &'static str) -> Result<u128, AmmError> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow(what));
    }
    Ok(value.low_u128())
}

/// Narrows a 512-bit value to 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] tagged with `what` if `value` does not
/// fit.
pub fn narrow_256(value: U512, what: &'static str) -> Result<U256, AmmError> {
    if value > U512::from(U256::MAX) {
        return Err(AmmError::Overflow(what));
    }
    let U512(words) = value;
    Ok(U256([words[0], words[1], words[2], words[3]]))
}

fn narrow_512(value: U512, what: &'static str) -> Result<u128, AmmError> {
    if value > U512::from(u128::MAX) {
        return Err(AmmError::Overflow(what));
    }
    Ok(value.low_u128())
}

/// `a * b / denominator` with a 512-bit product and explicit rounding,
/// narrowed to `u128`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128`.
pub fn mul_div_wide(
    a: U256,
    b: U256,
    denominator: U256,
    rounding: Rounding,
) -> Result<u128, AmmError> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = a.full_mul(b).div_mod(U512::from(denominator));
    let q = if rounding.is_up() && !r.is_zero() {
        q + U512::one()
    } else {
        q
    };
    narrow_512(q, "mul_div quotient")
}

/// `a * b / denominator` for `u128` operands.
///
/// # Errors
///
/// Same as [`mul_div_wide`].
///
/// # Examples
///
/// ```
/// use miniswap::domain::{Amount, Rounding};
/// use miniswap::math::wide::mul_div;
///
/// assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Down), Ok(Amount::new(u128::MAX / 2)));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(Amount::new(4)));
/// ```
pub fn mul_div(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> Result<Amount, AmmError> {
    mul_div_wide(U256::from(a), U256::from(b), U256::from(denominator), rounding).map(Amount::new)
}
