//! Account identifiers for liquidity providers, traders and pools.

use core::fmt;

use serde::{Deserialize, Serialize};

const POOL_ADDRESS_TAG: [u8; 8] = *b"mswppair";

/// Identifier of an account: a wallet, the burn address, or a pool.
///
/// Pools are accounts too: assets deposited into a pool sit in the ledger
/// under the pool's address, derived with [`AccountId::for_pool`].
///
/// # Examples
///
/// ```
/// use miniswap::domain::AccountId;
///
/// let pool = AccountId::for_pool(0);
/// assert_ne!(pool, AccountId::BURN);
/// assert_eq!(pool, AccountId::for_pool(0));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The all-zero address. Holds the minimum liquidity locked by the
    /// first deposit of a pool; nobody can spend from it.
    pub const BURN: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Deterministic address of the pool registered at `index`.
    ///
    /// The first eight bytes carry a fixed tag and the last eight the
    /// big-endian index, so distinct indices never collide and a pool
    /// address is never [`BURN`](Self::BURN).
    #[must_use]
    pub const fn for_pool(index: u64) -> Self {
        let mut bytes = [0u8; 32];
        let idx = index.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[i] = POOL_ADDRESS_TAG[i];
            bytes[24 + i] = idx[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns `true` for the burn address.
    #[must_use]
    pub fn is_burn(&self) -> bool {
        *self == Self::BURN
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
