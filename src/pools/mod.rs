//! Pool state and the operations on it.
//!
//! A [`Pool`] holds the accounting for one asset pair: reserves, share
//! balances, the fee reward accumulator and the protocol fee checkpoint.
//! The registry hands pools out as [`PoolHandle`]s, which serialize every
//! operation on the same pool behind a lock.
//!
//! # Fee modes
//!
//! | Mode | Fee goes to | Pending rewards |
//! |------|-------------|-----------------|
//! | [`Compound`](crate::config::FeeMode::Compound) | reserves (raises share value) | always zero |
//! | [`Distribute`](crate::config::FeeMode::Distribute) | [`FeeDistributor`] escrow | claimable per holder |
//!
//! Shares locked on [`AccountId::BURN`](crate::domain::AccountId::BURN)
//! earn nothing: distributed fees are split over the remaining shares, and
//! while only locked shares exist the fee stays in the reserves.

mod fee_distributor;
mod handle;
mod pool;
mod settlement;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use fee_distributor::{FeeDistributor, REWARD_SCALE};
pub use handle::PoolHandle;
pub use pool::{Pool, PoolStatus};
