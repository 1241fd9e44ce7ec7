//! Swap pricing: constant-product and fixed-ratio formulas.

use primitive_types::U512;

use crate::domain::{Amount, FeeRate};
use crate::error::AmmError;

/// Stateless pricing functions used by every pool.
///
/// All intermediates are computed in 512-bit space and every result is
/// rounded in the pool's favour: outputs down, inputs up.
pub struct SwapEngine;

fn wide(v: u128) -> U512 {
    U512::from(v)
}

fn narrow(v: U512, what: &'static str) -> Result<Amount, AmmError> {
    if v > U512::from(u128::MAX) {
        return Err(AmmError::Overflow(what));
    }
    Ok(Amount::new(v.low_u128()))
}

impl SwapEngine {
    /// Output for an exact input on a constant-product curve:
    ///
    /// ```text
    /// out = floor(in * kept * r_out / (r_in * den + in * kept))
    /// ```
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`AmmError::InsufficientOutputAmount`] if the result rounds to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use miniswap::domain::{Amount, FeeRate};
    /// use miniswap::math::SwapEngine;
    ///
    /// let e18 = 1_000_000_000_000_000_000u128;
    /// let out = SwapEngine::get_amount_out(
    ///     Amount::new(e18),
    ///     Amount::new(5 * e18),
    ///     Amount::new(10 * e18),
    ///     FeeRate::UNISWAP_V2,
    /// );
    /// assert_eq!(out, Ok(Amount::new(1_662_497_915_624_478_906)));
    /// ```
    pub fn get_amount_out(
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        fee: FeeRate,
    ) -> Result<Amount, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        let in_with_fee = wide(amount_in.get()) * wide(fee.kept());
        let numerator = in_with_fee * wide(reserve_out.get());
        let denominator = wide(reserve_in.get()) * wide(fee.denominator()) + in_with_fee;
        if denominator.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let out = narrow(numerator / denominator, "amount out")?;
        if out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        Ok(out)
    }

    /// Minimal input that yields at least `amount_out`:
    ///
    /// ```text
    /// in = floor(r_in * out * den / ((r_out - out) * kept)) + 1
    /// ```
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if a reserve is zero or
    ///   `amount_out >= reserve_out`.
    /// - [`AmmError::InvalidFee`] if the fee keeps nothing of the input.
    pub fn get_amount_in(
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        fee: FeeRate,
    ) -> Result<Amount, AmmError> {
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        if fee.kept() == 0 {
            return Err(AmmError::InvalidFee("fee consumes the whole input"));
        }
        let numerator =
            wide(reserve_in.get()) * wide(amount_out.get()) * wide(fee.denominator());
        let denominator = wide(reserve_out.get() - amount_out.get()) * wide(fee.kept());
        narrow(numerator / denominator + U512::one(), "amount in")
    }

    /// Constant-product check on post-swap balances:
    ///
    /// ```text
    /// (r_in * den + in * kept) * (r_out - out) >= r_in * r_out * den
    /// ```
    ///
    /// `reserve_in` and `reserve_out` are the balances before the swap.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::KInvariantViolation`] if the fee-adjusted
    /// product would decrease or `amount_out` exceeds `reserve_out`.
    pub fn check_k(
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
        amount_out: Amount,
        fee: FeeRate,
    ) -> Result<(), AmmError> {
        let Some(out_after) = reserve_out.checked_sub(&amount_out) else {
            return Err(AmmError::KInvariantViolation);
        };
        let adjusted_in = wide(reserve_in.get()) * wide(fee.denominator())
            + wide(amount_in.get()) * wide(fee.kept());
        let lhs = adjusted_in * wide(out_after.get());
        let rhs = wide(reserve_in.get()) * wide(reserve_out.get()) * wide(fee.denominator());
        if lhs < rhs {
            return Err(AmmError::KInvariantViolation);
        }
        Ok(())
    }

    /// Output of a fixed-ratio swap where `ratio_in` units of the input
    /// asset are worth `ratio_out` units of the output asset:
    ///
    /// ```text
    /// out = floor(in * ratio_out * kept / (ratio_in * den))
    /// ```
    ///
    /// Reserve sufficiency is checked by the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
    /// - [`AmmError::InvalidRatio`] if `ratio_in` is zero.
    /// - [`AmmError::InsufficientOutputAmount`] if the result rounds to zero.
    pub fn fixed_ratio_amount_out(
        amount_in: Amount,
        ratio_in: u128,
        ratio_out: u128,
        fee: FeeRate,
    ) -> Result<Amount, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if ratio_in == 0 {
            return Err(AmmError::InvalidRatio);
        }
        let numerator = wide(amount_in.get()) * wide(ratio_out) * wide(fee.kept());
        let denominator = wide(ratio_in) * wide(fee.denominator());
        let out = narrow(numerator / denominator, "fixed-ratio amount out")?;
        if out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        Ok(out)
    }

    /// Minimal input of a fixed-ratio swap that yields at least `amount_out`:
    /// `ceil(out * ratio_in * den / (ratio_out * kept))`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
    /// - [`AmmError::InvalidRatio`] if `ratio_out` is zero.
    /// - [`AmmError::InvalidFee`] if the fee keeps nothing of the input.
    pub fn fixed_ratio_amount_in(
        amount_out: Amount,
        ratio_in: u128,
        ratio_out: u128,
        fee: FeeRate,
    ) -> Result<Amount, AmmError> {
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if ratio_out == 0 {
            return Err(AmmError::InvalidRatio);
        }
        if fee.kept() == 0 {
            return Err(AmmError::InvalidFee("fee consumes the whole input"));
        }
        let numerator = wide(amount_out.get()) * wide(ratio_in) * wide(fee.denominator());
        let denominator = wide(ratio_out) * wide(fee.kept());
        let (q, r) = numerator.div_mod(denominator);
        let q = if r.is_zero() { q } else { q + U512::one() };
        narrow(q, "fixed-ratio amount in")
    }
}
