//! Events recorded by pools and the registry.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, AssetId, AssetPair, PairType, PoolId, Shares};

/// State change recorded by a pool, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// Shares minted against a deposit.
    LiquidityAdded {
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        minted: Shares,
    },
    /// Shares burned for a withdrawal.
    LiquidityRemoved {
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        burned: Shares,
    },
    /// One asset exchanged for the other.
    Swapped {
        account: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    },
    /// Fee rewards paid to a holder.
    RewardsClaimed {
        account: AccountId,
        reward_a: Amount,
        reward_b: Amount,
    },
    /// Shares moved between holders.
    SharesTransferred {
        from: AccountId,
        to: AccountId,
        amount: Shares,
    },
    /// Protocol fee shares minted to the fee recipient.
    ProtocolFeeMinted { to: AccountId, minted: Shares },
    /// Reserves after a state change.
    Sync { reserve_a: Amount, reserve_b: Amount },
}

/// Event recorded by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A new pool was created.
    PairCreated {
        id: PoolId,
        pair: AssetPair,
        address: AccountId,
        pair_type: PairType,
    },
}

/// Bounded buffer of recorded events, oldest first.
///
/// Holds at most [`EventLog::CAPACITY`] events. Recording past that drops
/// the oldest one and counts it in [`dropped`](Self::dropped), so a host
/// that never drains still uses bounded memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<E> {
    entries: VecDeque<E>,
    dropped: u64,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventLog<E> {
    /// Maximum number of events kept between drains.
    pub const CAPACITY: usize = 1_024;

    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            dropped: 0,
        }
    }

    /// Appends `event`, evicting the oldest event when full.
    pub fn record(&mut self, event: E) {
        if self.entries.len() >= Self::CAPACITY {
            self.entries.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        self.entries.push_back(event);
    }

    /// Events held, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    /// Number of events held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no event is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events evicted unread since the log was created.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Removes and returns every held event, oldest first.
    pub fn drain(&mut self) -> Vec<E> {
        self.entries.drain(..).collect()
    }
}
