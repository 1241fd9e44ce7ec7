//! Accumulated-fee-per-share reward accounting.
//!
//! Each asset keeps a running `fee_per_share` (scaled by
//! [`REWARD_SCALE`]) that grows by `fee * SCALE / total_shares` whenever a
//! swap pays a fee. Every holder carries a checkpoint with the reward
//! already accounted for (`debt = shares * fee_per_share / SCALE`) and any
//! settled but unpaid reward (`owed`). Pending reward is therefore
//!
//! ```text
//! owed + shares * fee_per_share / SCALE - debt
//! ```
//!
//! The pool settles a holder before every change of their share balance,
//! so fees charged before a deposit never reach the new shares.

use std::collections::HashMap;

use primitive_types::{U256, U512};

use crate::domain::{AccountId, Amount, PendingRewards, Shares, Side};
use crate::error::AmmError;
use crate::math::{wide, CheckedArithmetic};

/// Fixed-point scale of `fee_per_share`.
pub const REWARD_SCALE: u128 = 1_000_000_000_000_000_000;

/// Reward position of one holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct RewardCheckpoint {
    debt_a: U256,
    debt_b: U256,
    owed_a: Amount,
    owed_b: Amount,
}

impl RewardCheckpoint {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fee escrow and per-holder reward checkpoints of a distributing pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeDistributor {
    fee_per_share_a: U256,
    fee_per_share_b: U256,
    escrow_a: Amount,
    escrow_b: Amount,
    checkpoints: HashMap<AccountId, RewardCheckpoint>,
}

/// Reward owed to `held` shares at `fee_per_share`, beyond `debt`.
fn earned(held: Shares, fee_per_share: U256, debt: U256) -> U512 {
    let accrued = U256::from(held.get()).full_mul(fee_per_share) / U512::from(REWARD_SCALE);
    accrued.saturating_sub(U512::from(debt))
}

/// `owed + earned`, capped by `escrow`.
fn owed_after(owed: Amount, earned: U512, escrow: Amount) -> Amount {
    let total = U512::from(owed.get()) + earned;
    if total > U512::from(escrow.get()) {
        escrow
    } else {
        Amount::new(total.low_u128())
    }
}

fn debt_for(shares: Shares, fee_per_share: U256) -> Result<U256, AmmError> {
    let accrued = U256::from(shares.get()).full_mul(fee_per_share) / U512::from(REWARD_SCALE);
    wide::narrow_256(accrued, "reward debt")
}

impl FeeDistributor {
    /// Creates a distributor with no accrued fees.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated fee per share of `side`, scaled by [`REWARD_SCALE`].
    #[must_use]
    pub const fn fee_per_share(&self, side: Side) -> U256 {
        match side {
            Side::A => self.fee_per_share_a,
            Side::B => self.fee_per_share_b,
        }
    }

    /// Fees of `side` held for holders and not yet paid out.
    #[must_use]
    pub const fn escrow(&self, side: Side) -> Amount {
        match side {
            Side::A => self.escrow_a,
            Side::B => self.escrow_b,
        }
    }

    fn checkpoint(&self, account: AccountId) -> RewardCheckpoint {
        self.checkpoints.get(&account).copied().unwrap_or_default()
    }

    /// Reward `account` could claim now while holding `shares`.
    ///
    /// Never exceeds the escrow of either asset.
    #[must_use]
    pub fn pending(&self, account: AccountId, shares: Shares) -> PendingRewards {
        let cp = self.checkpoint(account);
        PendingRewards {
            reward_a: owed_after(
                cp.owed_a,
                earned(shares, self.fee_per_share_a, cp.debt_a),
                self.escrow_a,
            ),
            reward_b: owed_after(
                cp.owed_b,
                earned(shares, self.fee_per_share_b, cp.debt_b),
                self.escrow_b,
            ),
        }
    }

    /// Starts a staged update. Nothing changes until [`apply`](Self::apply).
    pub(crate) fn begin(&self) -> DistributorUpdate {
        DistributorUpdate {
            fee_per_share_a: self.fee_per_share_a,
            fee_per_share_b: self.fee_per_share_b,
            escrow_a: self.escrow_a,
            escrow_b: self.escrow_b,
            checkpoints: Vec::new(),
        }
    }

    /// Commits a staged update.
    pub(crate) fn apply(&mut self, update: DistributorUpdate) {
        self.fee_per_share_a = update.fee_per_share_a;
        self.fee_per_share_b = update.fee_per_share_b;
        self.escrow_a = update.escrow_a;
        self.escrow_b = update.escrow_b;
        for (account, cp) in update.checkpoints {
            if cp.is_empty() {
                self.checkpoints.remove(&account);
            } else {
                self.checkpoints.insert(account, cp);
            }
        }
    }
}

/// Staged changes to a [`FeeDistributor`], computed before any transfer
/// and committed only after every transfer succeeded.
#[derive(Debug, Clone)]
pub(crate) struct DistributorUpdate {
    fee_per_share_a: U256,
    fee_per_share_b: U256,
    escrow_a: Amount,
    escrow_b: Amount,
    checkpoints: Vec<(AccountId, RewardCheckpoint)>,
}

impl DistributorUpdate {
    fn checkpoint(&self, base: &FeeDistributor, account: AccountId) -> RewardCheckpoint {
        self.checkpoints
            .iter()
            .rev()
            .find(|(a, _)| *a == account)
            .map_or_else(|| base.checkpoint(account), |(_, cp)| *cp)
    }

    /// Escrows `fee` of `side` and spreads it over `total` shares.
    pub(crate) fn accrue(&mut self, side: Side, fee: Amount, total: Shares) -> Result<(), AmmError> {
        if fee.is_zero() {
            return Ok(());
        }
        if total.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        // fee < 2^128 and SCALE < 2^60, so the product fits in 256 bits
        let increment =
            U256::from(fee.get()) * U256::from(REWARD_SCALE) / U256::from(total.get());
        let (acc, escrow) = match side {
            Side::A => (&mut self.fee_per_share_a, &mut self.escrow_a),
            Side::B => (&mut self.fee_per_share_b, &mut self.escrow_b),
        };
        *acc = acc
            .checked_add(increment)
            .ok_or(AmmError::Overflow("fee per share"))?;
        *escrow = escrow.safe_add(&fee)?;
        Ok(())
    }

    /// Settles `account`, which holds `held` shares now and will hold
    /// `after` once the operation commits. With `pay`, the settled reward
    /// is taken out of escrow and returned; otherwise it is kept as owed
    /// and zero is returned.
    pub(crate) fn settle(
        &mut self,
        base: &FeeDistributor,
        account: AccountId,
        held: Shares,
        after: Shares,
        pay: bool,
    ) -> Result<PendingRewards, AmmError> {
        let cp = self.checkpoint(base, account);
        let mut owed_a = owed_after(
            cp.owed_a,
            earned(held, self.fee_per_share_a, cp.debt_a),
            self.escrow_a,
        );
        let mut owed_b = owed_after(
            cp.owed_b,
            earned(held, self.fee_per_share_b, cp.debt_b),
            self.escrow_b,
        );
        let mut paid = PendingRewards::NONE;
        if pay {
            self.escrow_a = self.escrow_a.safe_sub(&owed_a)?;
            self.escrow_b = self.escrow_b.safe_sub(&owed_b)?;
            paid = PendingRewards {
                reward_a: owed_a,
                reward_b: owed_b,
            };
            owed_a = Amount::ZERO;
            owed_b = Amount::ZERO;
        }
        let next = RewardCheckpoint {
            debt_a: debt_for(after, self.fee_per_share_a)?,
            debt_b: debt_for(after, self.fee_per_share_b)?,
            owed_a,
            owed_b,
        };
        self.checkpoints.push((account, next));
        Ok(paid)
    }
}
