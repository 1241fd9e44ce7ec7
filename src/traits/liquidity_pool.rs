//! Liquidity provision, share accounting and fee rewards.

use crate::domain::{
    AccountId, Amount, AssetId, LiquidityAdded, LiquidityRemoved, PendingRewards, Shares,
};
use crate::error::AmmError;
use crate::traits::{AssetLedger, SwapPool};

/// Liquidity operations of a two-asset pool.
///
/// Share balances are tracked per account and always sum to
/// [`total_shares`](Self::total_shares), including the shares locked to
/// [`AccountId::BURN`] by the first deposit.
///
/// Every state-changing method settles the caller's pending fee rewards
/// before changing their share balance, so rewards accrue only to shares
/// that were held when the fee was charged.
pub trait LiquidityPool: SwapPool {
    /// Deposits both assets and credits shares to `account`.
    ///
    /// Amounts are in canonical pair order (`amount_a` is the first
    /// asset of [`asset_pair`](SwapPool::asset_pair)).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if an amount is zero or nothing would
    ///   be minted.
    /// - [`AmmError::RatioMismatch`] if the deposit is off the required
    ///   ratio.
    /// - [`AmmError::InsufficientInitialLiquidity`] if a first deposit does
    ///   not clear the locked minimum.
    /// - [`AmmError::Ledger`] if a transfer fails.
    fn add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityAdded, AmmError>;

    /// Burns `shares` of `account` and returns the proportional reserves,
    /// together with any settled fee rewards.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `shares` is zero or exceeds the
    ///   balance of `account`.
    /// - [`AmmError::InsufficientLiquidity`] if both amounts round to zero.
    /// - [`AmmError::Ledger`] if a transfer fails.
    fn remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        shares: Shares,
    ) -> Result<LiquidityRemoved, AmmError>;

    /// Unclaimed fee rewards of `account`. Always zero for compounding
    /// pools.
    fn pending_rewards(&self, account: AccountId) -> PendingRewards;

    /// Pays out the pending rewards of `account`. Succeeds without effect
    /// when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Ledger`] if a transfer fails.
    fn claim_rewards<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
    ) -> Result<PendingRewards, AmmError>;

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `from` holds fewer than
    /// `amount` shares.
    fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError>;

    /// Amount of the other asset that pairs with `amount` of `asset` for a
    /// deposit at the current ratio.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `asset` is not pooled.
    /// - [`AmmError::InsufficientInputAmount`] if `amount` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if the pool is empty and has
    ///   no configured ratio.
    fn quote_deposit(&self, asset: AssetId, amount: Amount) -> Result<Amount, AmmError>;

    /// Share balance of `account`.
    fn shares_of(&self, account: AccountId) -> Shares;

    /// Total shares outstanding.
    fn total_shares(&self) -> Shares;

    /// Current reserves in canonical pair order.
    fn reserves(&self) -> (Amount, Amount);
}
