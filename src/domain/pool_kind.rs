//! Pool variants supported by the registry.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Numeric tag of a pool variant, as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PairType {
    /// Trades at a configured exchange ratio.
    FixedRatio = 0,
    /// Trades along `x * y = k`.
    ConstantProduct = 1,
}

impl PairType {
    /// Returns the numeric tag.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Pricing rule of a pool.
///
/// A fixed ratio `ratio_a : ratio_b` means `ratio_a` units of the first
/// asset trade for `ratio_b` units of the second.
///
/// # Examples
///
/// ```
/// use miniswap::domain::{PairType, PoolKind};
///
/// let kind = PoolKind::fixed_ratio(1, 2).expect("non-zero ratio");
/// assert_eq!(kind.pair_type(), PairType::FixedRatio);
/// assert_eq!(kind.flipped(), PoolKind::fixed_ratio(2, 1).expect("non-zero ratio"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    /// Fixed exchange ratio between the two assets.
    FixedRatio {
        /// Units of the first asset.
        ratio_a: u128,
        /// Units of the second asset.
        ratio_b: u128,
    },
    /// Uniswap V2 constant product.
    ConstantProduct,
}

impl PoolKind {
    /// Creates a validated fixed-ratio kind.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRatio`] if either component is zero.
    pub const fn fixed_ratio(ratio_a: u128, ratio_b: u128) -> Result<Self, AmmError> {
        let kind = Self::FixedRatio { ratio_a, ratio_b };
        match kind.validate() {
            Ok(()) => Ok(kind),
            Err(e) => Err(e),
        }
    }

    /// Rejects zero ratio components.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRatio`] if either component is zero.
    pub const fn validate(&self) -> Result<(), AmmError> {
        match self {
            Self::FixedRatio { ratio_a, ratio_b } if *ratio_a == 0 || *ratio_b == 0 => {
                Err(AmmError::InvalidRatio)
            }
            _ => Ok(()),
        }
    }

    /// Numeric tag of this kind.
    #[must_use]
    pub const fn pair_type(&self) -> PairType {
        match self {
            Self::FixedRatio { .. } => PairType::FixedRatio,
            Self::ConstantProduct => PairType::ConstantProduct,
        }
    }

    /// The same kind with the two assets swapped. Used to re-orient a
    /// ratio given in request order to canonical order.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::FixedRatio { ratio_a, ratio_b } => Self::FixedRatio {
                ratio_a: ratio_b,
                ratio_b: ratio_a,
            },
            Self::ConstantProduct => Self::ConstantProduct,
        }
    }
}
