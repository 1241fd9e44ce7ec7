//! Exact rational spot price.

use core::cmp::Ordering;
use core::fmt;

use primitive_types::U256;
use serde::Serialize;

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::wide;

/// Price of one unit of a base asset in units of the quote asset,
/// kept as an exact fraction.
///
/// Equality and ordering compare the represented value, so `1/2 == 2/4`.
///
/// # Examples
///
/// ```
/// use miniswap::domain::{Amount, Price, Rounding};
///
/// let p = Price::new(2, 1).expect("non-zero denominator");
/// assert_eq!(p.quote(Amount::new(5), Rounding::Down).ok(), Some(Amount::new(10)));
/// assert_eq!(p, Price::new(4, 2).expect("non-zero denominator"));
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Price {
    numerator: u128,
    denominator: u128,
}

impl Price {
    /// Creates a price `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
    pub const fn new(numerator: u128, denominator: u128) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Quote units per base unit, numerator.
    #[must_use]
    pub const fn numerator(&self) -> u128 {
        self.numerator
    }

    /// Quote units per base unit, denominator.
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        self.denominator
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// The reciprocal price.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] for a zero price.
    pub const fn invert(&self) -> Result<Self, AmmError> {
        Self::new(self.denominator, self.numerator)
    }

    /// Converts `base` units into quote units at this price.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    pub fn quote(&self, base: Amount, rounding: Rounding) -> Result<Amount, AmmError> {
        wide::mul_div(base.get(), self.numerator, self.denominator, rounding)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = U256::from(self.numerator) * U256::from(other.denominator);
        let rhs = U256::from(other.numerator) * U256::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
