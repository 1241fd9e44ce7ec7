//! Swap fee expressed as the fraction of input kept for pricing.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::wide;

/// Swap fee as a rational `kept / denominator` of the input that is
/// priced. `997/1000` is the Uniswap V2 0.3% fee.
///
/// # Examples
///
/// ```
/// use miniswap::domain::{Amount, FeeRate};
///
/// let fee = FeeRate::UNISWAP_V2;
/// assert_eq!(fee.fee_of(Amount::new(1_000)).ok(), Some(Amount::new(3)));
/// assert!(FeeRate::new(1001, 1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeRate {
    kept: u128,
    denominator: u128,
}

impl FeeRate {
    /// 0.3% fee: 997 of every 1000 units are priced.
    pub const UNISWAP_V2: Self = Self {
        kept: 997,
        denominator: 1000,
    };

    /// No fee.
    pub const NO_FEE: Self = Self {
        kept: 1000,
        denominator: 1000,
    };

    /// Creates a validated fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `denominator` is zero or
    /// `kept > denominator`.
    pub fn new(kept: u128, denominator: u128) -> Result<Self, AmmError> {
        let rate = Self { kept, denominator };
        rate.validate()?;
        Ok(rate)
    }

    /// Checks the rate is a fraction in `[0, 1]`.
    ///
    /// Rates read through `serde` are not validated until this is called.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] on an out-of-range rate.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.denominator == 0 {
            return Err(AmmError::InvalidFee("denominator must be positive"));
        }
        if self.kept > self.denominator {
            return Err(AmmError::InvalidFee("kept fraction exceeds one"));
        }
        Ok(())
    }

    /// Numerator of the priced fraction.
    #[must_use]
    pub const fn kept(&self) -> u128 {
        self.kept
    }

    /// Denominator of the priced fraction.
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        self.denominator
    }

    /// Returns `true` when nothing is charged.
    #[must_use]
    pub const fn is_zero_fee(&self) -> bool {
        self.kept == self.denominator
    }

    /// Fee charged on `amount_in`: `amount_in - floor(amount_in * kept / denominator)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] for an unvalidated zero
    /// denominator.
    pub fn fee_of(&self, amount_in: Amount) -> Result<Amount, AmmError> {
        let priced = wide::mul_div(
            amount_in.get(),
            self.kept,
            self.denominator,
            Rounding::Down,
        )?;
        amount_in
            .checked_sub(&priced)
            .ok_or(AmmError::InvalidFee("kept fraction exceeds one"))
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::UNISWAP_V2
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kept, self.denominator)
    }
}
