//! Opaque asset identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a fungible asset held in an [`AssetLedger`](crate::traits::AssetLedger).
///
/// Wraps a 32-byte value. Any byte sequence is a valid id, so construction
/// is infallible. Ordering is lexicographic over the bytes and decides the
/// canonical orientation of an [`AssetPair`](super::AssetPair).
///
/// # Examples
///
/// ```
/// use miniswap::domain::AssetId;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// let weth = AssetId::from_bytes([2u8; 32]);
/// assert!(usdc < weth);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
