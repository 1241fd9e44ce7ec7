//! Canonically ordered pair of distinct assets.

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// Which half of an [`AssetPair`] an asset occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The lower asset id.
    A,
    /// The higher asset id.
    B,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// An unordered pair of distinct assets stored in canonical order.
///
/// `first() < second()` always holds, so `(A, B)` and `(B, A)` produce the
/// same value and the same registry key.
///
/// # Examples
///
/// ```
/// use miniswap::domain::{AssetId, AssetPair};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(b, a).expect("distinct assets");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair, AssetPair::new(a, b).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates the canonical pair for two assets given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if both ids are equal.
    pub fn new(asset1: AssetId, asset2: AssetId) -> Result<Self, AmmError> {
        if asset1 == asset2 {
            return Err(AmmError::IdenticalAssets);
        }
        let (asset_a, asset_b) = if asset1 < asset2 {
            (asset1, asset2)
        } else {
            (asset2, asset1)
        };
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the first (lower) asset.
    #[must_use]
    pub const fn first(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the second (higher) asset.
    #[must_use]
    pub const fn second(&self) -> AssetId {
        self.asset_b
    }

    /// Returns the asset on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> AssetId {
        match side {
            Side::A => self.asset_a,
            Side::B => self.asset_b,
        }
    }

    /// Returns `true` if `asset` belongs to this pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the side `asset` occupies.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `asset` is not in the pair.
    pub fn side_of(&self, asset: &AssetId) -> Result<Side, AmmError> {
        if *asset == self.asset_a {
            Ok(Side::A)
        } else if *asset == self.asset_b {
            Ok(Side::B)
        } else {
            Err(AmmError::InvalidToken("asset is not part of this pair"))
        }
    }

    /// Returns the counterpart of `asset` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, AmmError> {
        self.side_of(asset).map(|side| self.asset(side.other()))
    }
}
