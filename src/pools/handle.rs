//! Shared, lockable reference to a registered [`Pool`].
//!
//! [`PoolHandle`] implements [`SwapPool`] and [`LiquidityPool`] by
//! delegating every call to the inner pool under its lock, so a handle
//! obtained from the registry can be used exactly like the pool itself.
//! Each call holds the lock for the whole plan/settle/commit sequence,
//! which makes operations on one pool strictly sequential.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::Pool;
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, FeeRate, LiquidityAdded, LiquidityRemoved,
    PendingRewards, Price, Shares, SwapResult,
};
use crate::error::AmmError;
use crate::traits::{AssetLedger, LiquidityPool, SwapPool};

/// Cloneable handle to a pool owned by a
/// [`PoolRegistry`](crate::factory::PoolRegistry).
///
/// Clones refer to the same pool; equality is identity.
///
/// The pool keeps its events in a bounded [`EventLog`](crate::domain::EventLog).
/// Hosts that need every event should call
/// [`Pool::drain_events`] through [`lock`](Self::lock) regularly.
#[derive(Debug, Clone)]
pub struct PoolHandle(Arc<Mutex<Pool>>);

impl PoolHandle {
    /// Wraps a pool in a new handle.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self(Arc::new(Mutex::new(pool)))
    }

    /// Locks the pool for a sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, Pool> {
        self.0.lock()
    }

    /// Runs `f` with the pool locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pool) -> R) -> R {
        f(&mut self.0.lock())
    }
}

impl PartialEq for PoolHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for PoolHandle {}

impl SwapPool for PoolHandle {
    fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
    ) -> Result<SwapResult, AmmError> {
        self.0.lock().swap(ledger, account, asset_in, amount_in)
    }

    fn swap_exact_out<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        asset_in: AssetId,
        amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        self.0
            .lock()
            .swap_exact_out(ledger, account, asset_in, amount_out)
    }

    fn quote_amount_out(&self, asset_in: AssetId, amount_in: Amount) -> Result<Amount, AmmError> {
        self.0.lock().quote_amount_out(asset_in, amount_in)
    }

    fn quote_amount_in(&self, asset_in: AssetId, amount_out: Amount) -> Result<Amount, AmmError> {
        self.0.lock().quote_amount_in(asset_in, amount_out)
    }

    fn spot_price(&self, base: AssetId) -> Result<Price, AmmError> {
        self.0.lock().spot_price(base)
    }

    fn asset_pair(&self) -> AssetPair {
        self.0.lock().asset_pair()
    }

    fn fee_rate(&self) -> FeeRate {
        self.0.lock().fee_rate()
    }
}

impl LiquidityPool for PoolHandle {
    fn add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityAdded, AmmError> {
        self.0
            .lock()
            .add_liquidity(ledger, account, amount_a, amount_b)
    }

    fn remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        shares: Shares,
    ) -> Result<LiquidityRemoved, AmmError> {
        self.0.lock().remove_liquidity(ledger, account, shares)
    }

    fn pending_rewards(&self, account: AccountId) -> PendingRewards {
        self.0.lock().pending_rewards(account)
    }

    fn claim_rewards<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
    ) -> Result<PendingRewards, AmmError> {
        self.0.lock().claim_rewards(ledger, account)
    }

    fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.0.lock().transfer_shares(from, to, amount)
    }

    fn quote_deposit(&self, asset: AssetId, amount: Amount) -> Result<Amount, AmmError> {
        self.0.lock().quote_deposit(asset, amount)
    }

    fn shares_of(&self, account: AccountId) -> Shares {
        self.0.lock().shares_of(account)
    }

    fn total_shares(&self) -> Shares {
        self.0.lock().total_shares()
    }

    fn reserves(&self) -> (Amount, Amount) {
        self.0.lock().reserves()
    }
}
