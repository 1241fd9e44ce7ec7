//! Boundary to the external asset ledger.
//!
//! Pools never hold balances themselves: every unit of an asset lives in an
//! [`AssetLedger`] under the pool's [`AccountId`]. The pool only asks the
//! ledger to move assets in and out, and the ledger decides whether the
//! move is authorized.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::LedgerError;

/// Fungible asset balances with pool-initiated transfers.
///
/// Every transfer must be atomic: on `Err` no balance has changed. Pools
/// check [`allowance`](Self::allowance) and balances before moving
/// anything, and undo a partially executed operation with
/// [`refund`](Self::refund) and [`reclaim`](Self::reclaim).
///
/// [`InMemoryLedger`](crate::ledger::InMemoryLedger) is a reference
/// implementation with ERC-20 style allowances.
pub trait AssetLedger {
    /// Moves `amount` of `asset` from `from` to `pool`, spending the
    /// allowance `from` granted the pool.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if `from` has not approved
    ///   `pool` for `amount`.
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    fn transfer_in(
        &mut self,
        pool: AccountId,
        from: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `asset` from `pool` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientPoolBalance`] if the pool holds
    /// less than `amount`.
    fn transfer_out(
        &mut self,
        pool: AccountId,
        to: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Balance of `holder` in `asset`.
    fn balance_of(&self, holder: AccountId, asset: AssetId) -> Amount;

    /// Units of `asset` that `owner` lets `pool` pull with
    /// [`transfer_in`](Self::transfer_in).
    fn allowance(&self, owner: AccountId, pool: AccountId, asset: AssetId) -> Amount;

    /// Reverses a completed [`transfer_in`](Self::transfer_in): moves
    /// `amount` back from `pool` to `from` and restores the allowance it
    /// spent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientPoolBalance`] if the pool holds
    /// less than `amount`.
    fn refund(
        &mut self,
        pool: AccountId,
        from: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Reverses a completed [`transfer_out`](Self::transfer_out): moves
    /// `amount` back from `to` to `pool` without consulting any allowance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if `to` no longer holds
    /// `amount`.
    fn reclaim(
        &mut self,
        pool: AccountId,
        to: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}
