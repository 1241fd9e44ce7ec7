//! Registry index of a pool.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AccountId;

/// Position of a pool in the registry's creation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PoolId(u64);

impl PoolId {
    /// Creates a `PoolId` from a raw index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Ledger address of the pool with this id.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        AccountId::for_pool(self.0)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
