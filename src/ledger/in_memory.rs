//! In-memory balances with ERC-20 style allowances.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{AmmError, LedgerError};
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

/// Balance book for any number of assets.
///
/// Pools pull deposits with [`transfer_in`](AssetLedger::transfer_in),
/// which spends an allowance the owner granted the pool through
/// [`approve`](Self::approve). An allowance of [`Amount::MAX`] is never
/// decreased.
///
/// # Examples
///
/// ```
/// use miniswap::domain::{AccountId, Amount, AssetId};
/// use miniswap::ledger::InMemoryLedger;
/// use miniswap::traits::AssetLedger;
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let pool = AccountId::for_pool(0);
/// let usdc = AssetId::from_bytes([7u8; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(alice, usdc, Amount::new(100)).expect("no overflow");
/// ledger.approve(alice, pool, usdc, Amount::MAX);
/// ledger.transfer_in(pool, alice, usdc, Amount::new(40)).expect("funded and approved");
/// assert_eq!(ledger.balance_of(pool, usdc), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(AccountId, AssetId), Amount>,
    supply: HashMap<AssetId, Amount>,
    allowances: HashMap<(AccountId, AccountId, AssetId), Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `asset` out of thin air for `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the total supply of `asset` would
    /// exceed `u128`.
    pub fn mint(&mut self, holder: AccountId, asset: AssetId, amount: Amount) -> Result<(), AmmError> {
        let supply = self.total_supply(asset).safe_add(&amount)?;
        let balance = self.balance_of(holder, asset).safe_add(&amount)?;
        self.supply.insert(asset, supply);
        self.balances.insert((holder, asset), balance);
        Ok(())
    }

    /// Sum of all balances of `asset`.
    #[must_use]
    pub fn total_supply(&self, asset: AssetId) -> Amount {
        self.supply.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    /// Sets the allowance `owner` grants `spender` over `asset`.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, asset: AssetId, amount: Amount) {
        self.allowances.insert((owner, spender, asset), amount);
    }

    fn move_balance(
        &mut self,
        from: AccountId,
        to: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from, asset);
        let Some(remaining) = available.checked_sub(&amount) else {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                asset,
                available,
                required: amount,
            });
        };
        self.balances.insert((from, asset), remaining);
        // bounded by total supply, which mint keeps within u128
        let credited = self
            .balance_of(to, asset)
            .checked_add(&amount)
            .unwrap_or(Amount::MAX);
        self.balances.insert((to, asset), credited);
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn transfer_in(
        &mut self,
        pool: AccountId,
        from: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(from, pool, asset);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                account: from,
                asset,
                approved,
                required: amount,
            });
        }
        self.move_balance(from, pool, asset, amount)?;
        if approved != Amount::MAX {
            let left = approved.checked_sub(&amount).unwrap_or(Amount::ZERO);
            self.approve(from, pool, asset, left);
        }
        Ok(())
    }

    fn transfer_out(
        &mut self,
        pool: AccountId,
        to: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(pool, asset);
        if available < amount {
            return Err(LedgerError::InsufficientPoolBalance {
                pool,
                asset,
                available,
                required: amount,
            });
        }
        self.move_balance(pool, to, asset, amount)
    }

    fn balance_of(&self, holder: AccountId, asset: AssetId) -> Amount {
        self.balances
            .get(&(holder, asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, owner: AccountId, pool: AccountId, asset: AssetId) -> Amount {
        self.allowances
            .get(&(owner, pool, asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn refund(
        &mut self,
        pool: AccountId,
        from: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.transfer_out(pool, from, asset, amount)?;
        let approved = self.allowance(from, pool, asset);
        if approved != Amount::MAX {
            let restored = approved.checked_add(&amount).unwrap_or(Amount::MAX);
            self.approve(from, pool, asset, restored);
        }
        Ok(())
    }

    fn reclaim(
        &mut self,
        pool: AccountId,
        to: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.move_balance(to, pool, asset, amount)
    }
}
