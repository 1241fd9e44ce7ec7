//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use miniswap::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, FeeRate, LiquidityAdded, LiquidityRemoved,
    PendingRewards, PoolEvent, PoolId, PoolKind, Price, Rounding, Shares, SwapResult,
};

// Re-export core traits
pub use crate::traits::{AssetLedger, LiquidityPool, SwapPool};

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export configuration
pub use crate::config::{DepositPolicy, FeeMode, PoolConfig, RegistryConfig};

// Re-export error types
pub use crate::error::{AmmError, LedgerError, Result};

// Re-export registry and pools
pub use crate::factory::{PairInfo, PoolRegistry};
pub use crate::ledger::InMemoryLedger;
pub use crate::pools::{Pool, PoolHandle, PoolStatus};
