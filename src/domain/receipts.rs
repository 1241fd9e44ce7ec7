//! Return values of liquidity and reward operations.

use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// Result of a successful deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityAdded {
    /// Units of the first asset pulled from the depositor.
    pub amount_a: Amount,
    /// Units of the second asset pulled from the depositor.
    pub amount_b: Amount,
    /// Shares credited to the depositor.
    pub minted: Shares,
}

/// Result of a successful withdrawal.
///
/// `reward_a` and `reward_b` are settled fee rewards paid in the same
/// transfers as the principal; always zero for compounding pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    /// Principal of the first asset.
    pub amount_a: Amount,
    /// Principal of the second asset.
    pub amount_b: Amount,
    /// Fee reward of the first asset.
    pub reward_a: Amount,
    /// Fee reward of the second asset.
    pub reward_b: Amount,
    /// Shares burned.
    pub burned: Shares,
}

impl LiquidityRemoved {
    /// Total units of the first asset sent to the holder, `None` on
    /// overflow.
    #[must_use]
    pub const fn total_a(&self) -> Option<Amount> {
        self.amount_a.checked_add(&self.reward_a)
    }

    /// Total units of the second asset sent to the holder.
    #[must_use]
    pub const fn total_b(&self) -> Option<Amount> {
        self.amount_b.checked_add(&self.reward_b)
    }
}

/// Unclaimed fee rewards of one holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PendingRewards {
    /// Reward in the first asset.
    pub reward_a: Amount,
    /// Reward in the second asset.
    pub reward_b: Amount,
}

impl PendingRewards {
    /// Nothing pending.
    pub const NONE: Self = Self {
        reward_a: Amount::ZERO,
        reward_b: Amount::ZERO,
    };

    /// Returns `true` when both rewards are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.reward_a.is_zero() && self.reward_b.is_zero()
    }
}
