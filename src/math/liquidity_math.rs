//! Share issuance and redemption math.

use primitive_types::U256;

use super::wide;
use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Shares minted by a first deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialMint {
    /// `isqrt(amount_a * amount_b)`, the new total supply.
    pub total: Shares,
    /// Locked to the burn address.
    pub locked: Shares,
    /// Credited to the depositor.
    pub depositor: Shares,
}

/// Stateless share-mint and asset-return formulas.
///
/// Every division rounds down so the pool keeps the dust.
pub struct LiquidityAccountant;

impl LiquidityAccountant {
    /// Shares for the first deposit into an empty pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientInitialLiquidity`] unless
    /// `isqrt(amount_a * amount_b) > minimum_liquidity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use miniswap::domain::{Amount, Shares};
    /// use miniswap::math::LiquidityAccountant;
    ///
    /// let e18 = 1_000_000_000_000_000_000u128;
    /// let mint = LiquidityAccountant::initial_shares(
    ///     Amount::new(e18),
    ///     Amount::new(4 * e18),
    ///     Shares::new(1_000),
    /// ).expect("deposit clears the minimum");
    /// assert_eq!(mint.total, Shares::new(2 * e18));
    /// assert_eq!(mint.depositor, Shares::new(2 * e18 - 1_000));
    /// ```
    pub fn initial_shares(
        amount_a: Amount,
        amount_b: Amount,
        minimum_liquidity: Shares,
    ) -> Result<InitialMint, AmmError> {
        let root = wide::isqrt_product(amount_a.get(), amount_b.get());
        let depositor = root
            .checked_sub(minimum_liquidity.get())
            .filter(|d| *d > 0)
            .ok_or(AmmError::InsufficientInitialLiquidity)?;
        Ok(InitialMint {
            total: Shares::new(root),
            locked: minimum_liquidity,
            depositor: Shares::new(depositor),
        })
    }

    /// Weakest-constraint shares for a deposit into a seeded pool:
    /// `min(a * T / Ra, b * T / Rb)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`AmmError::Overflow`] if a quotient exceeds `u128`.
    pub fn proportional_shares(
        amount_a: Amount,
        amount_b: Amount,
        reserve_a: Amount,
        reserve_b: Amount,
        total: Shares,
    ) -> Result<Shares, AmmError> {
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        let by_a = wide::mul_div(amount_a.get(), total.get(), reserve_a.get(), Rounding::Down);
        let by_b = wide::mul_div(amount_b.get(), total.get(), reserve_b.get(), Rounding::Down);
        // An overflowing side cannot be the minimum unless both overflow.
        let minted = match (by_a, by_b) {
            (Ok(a), Ok(b)) => a.min(b),
            (Ok(a), Err(_)) => a,
            (Err(_), Ok(b)) => b,
            (Err(e), Err(_)) => return Err(e),
        };
        Ok(Shares::new(minted.get()))
    }

    /// Shares for a deposit that must match the current reserve ratio
    /// exactly (`a * Rb == b * Ra`).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`AmmError::RatioMismatch`] if the amounts are off-ratio.
    pub fn exact_ratio_shares(
        amount_a: Amount,
        amount_b: Amount,
        reserve_a: Amount,
        reserve_b: Amount,
        total: Shares,
    ) -> Result<Shares, AmmError> {
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if wide::product(amount_a.get(), reserve_b.get())
            != wide::product(amount_b.get(), reserve_a.get())
        {
            return Err(AmmError::RatioMismatch);
        }
        wide::mul_div(amount_a.get(), total.get(), reserve_a.get(), Rounding::Down)
            .map(|v| Shares::new(v.get()))
    }

    /// Assets returned for burning `shares` of `total`:
    /// `shares * R / T` per asset, floored.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `total` is zero.
    /// - [`AmmError::InsufficientShares`] if `shares > total`.
    pub fn amounts_for_shares(
        shares: Shares,
        reserve_a: Amount,
        reserve_b: Amount,
        total: Shares,
    ) -> Result<(Amount, Amount), AmmError> {
        if total.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        if shares > total {
            return Err(AmmError::InsufficientShares);
        }
        let a = wide::mul_div(shares.get(), reserve_a.get(), total.get(), Rounding::Down)?;
        let b = wide::mul_div(shares.get(), reserve_b.get(), total.get(), Rounding::Down)?;
        Ok((a, b))
    }

    /// Amount of the other asset that matches `amount` at the current
    /// reserve ratio: `amount * reserve_other / reserve_this`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInputAmount`] if `amount` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    pub fn quote(
        amount: Amount,
        reserve_this: Amount,
        reserve_other: Amount,
    ) -> Result<Amount, AmmError> {
        if amount.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_this.is_zero() || reserve_other.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        wide::mul_div(amount.get(), reserve_other.get(), reserve_this.get(), Rounding::Down)
    }

    /// Protocol share of fee growth since `k_last`, one sixth of the
    /// growth of `sqrt(k)`:
    ///
    /// ```text
    /// T * (sqrt(k) - sqrt(k_last)) / (5 * sqrt(k) + sqrt(k_last))
    /// ```
    ///
    /// Zero when `k_last` is zero or `k` has not grown.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    pub fn protocol_fee_shares(
        total: Shares,
        reserve_a: Amount,
        reserve_b: Amount,
        k_last: U256,
    ) -> Result<Shares, AmmError> {
        if k_last.is_zero() {
            return Ok(Shares::ZERO);
        }
        let root_k = wide::isqrt(wide::product(reserve_a.get(), reserve_b.get()));
        let root_k_last = wide::isqrt(k_last);
        if root_k <= root_k_last {
            return Ok(Shares::ZERO);
        }
        let numerator_factor = root_k - root_k_last;
        let denominator = root_k * U256::from(5u8) + root_k_last;
        wide::mul_div_wide(
            U256::from(total.get()),
            numerator_factor,
            denominator,
            Rounding::Down,
        )
        .map(Shares::new)
    }
}
