//! All-or-nothing execution of the transfers of one pool operation.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{AmmError, LedgerError};
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

/// One asset movement between the pool and an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Leg {
    /// Account pays the pool.
    Pull {
        from: AccountId,
        asset: AssetId,
        amount: Amount,
    },
    /// Pool pays the account.
    Push {
        to: AccountId,
        asset: AssetId,
        amount: Amount,
    },
}

impl Leg {
    const fn amount(&self) -> Amount {
        match self {
            Self::Pull { amount, .. } | Self::Push { amount, .. } => *amount,
        }
    }
}

/// Checks that every leg can go through, then runs every pull followed by
/// every push. Zero-amount legs are skipped.
///
/// Nothing moves unless all pulls are approved and funded and the pool
/// can cover its pushes. If the ledger still rejects a leg, the completed
/// legs are reversed in reverse order and the ledger error is returned
/// unmodified; a failed reversal yields [`AmmError::UnwindFailed`].
pub(crate) fn execute<L: AssetLedger>(
    ledger: &mut L,
    pool: AccountId,
    legs: &[Leg],
) -> Result<(), AmmError> {
    let legs: Vec<Leg> = legs.iter().copied().filter(|l| !l.amount().is_zero()).collect();
    preflight(ledger, pool, &legs)?;

    let ordered = legs
        .iter()
        .filter(|l| matches!(l, Leg::Pull { .. }))
        .chain(legs.iter().filter(|l| matches!(l, Leg::Push { .. })));
    let mut done: Vec<Leg> = Vec::with_capacity(legs.len());
    for leg in ordered {
        if let Err(cause) = run(ledger, pool, leg) {
            return Err(match unwind(ledger, pool, &done) {
                Ok(()) => cause.into(),
                Err(reversal) => AmmError::UnwindFailed { cause, reversal },
            });
        }
        done.push(*leg);
    }
    Ok(())
}

fn run<L: AssetLedger>(ledger: &mut L, pool: AccountId, leg: &Leg) -> Result<(), LedgerError> {
    match *leg {
        Leg::Pull {
            from,
            asset,
            amount,
        } => ledger.transfer_in(pool, from, asset, amount),
        Leg::Push { to, asset, amount } => ledger.transfer_out(pool, to, asset, amount),
    }
}

/// Adds `amount` to the running total for `key`.
fn tally<K: PartialEq>(totals: &mut Vec<(K, Amount)>, key: K, amount: Amount) -> Result<(), AmmError> {
    match totals.iter_mut().find(|(k, _)| *k == key) {
        Some((_, total)) => *total = total.safe_add(&amount)?,
        None => totals.push((key, amount)),
    }
    Ok(())
}

fn preflight<L: AssetLedger>(ledger: &L, pool: AccountId, legs: &[Leg]) -> Result<(), AmmError> {
    let mut pulled: Vec<((AccountId, AssetId), Amount)> = Vec::with_capacity(2);
    let mut incoming: Vec<(AssetId, Amount)> = Vec::with_capacity(2);
    let mut outgoing: Vec<(AssetId, Amount)> = Vec::with_capacity(2);
    for leg in legs {
        match *leg {
            Leg::Pull {
                from,
                asset,
                amount,
            } => {
                tally(&mut pulled, (from, asset), amount)?;
                tally(&mut incoming, asset, amount)?;
            }
            Leg::Push { asset, amount, .. } => tally(&mut outgoing, asset, amount)?,
        }
    }

    for ((account, asset), required) in pulled {
        let approved = ledger.allowance(account, pool, asset);
        if approved < required {
            return Err(LedgerError::InsufficientAllowance {
                account,
                asset,
                approved,
                required,
            }
            .into());
        }
        let available = ledger.balance_of(account, asset);
        if available < required {
            return Err(LedgerError::InsufficientBalance {
                account,
                asset,
                available,
                required,
            }
            .into());
        }
    }

    for (asset, required) in outgoing {
        let funded = incoming
            .iter()
            .find(|(a, _)| *a == asset)
            .map_or(Amount::ZERO, |(_, amount)| *amount);
        let available = ledger.balance_of(pool, asset).safe_add(&funded)?;
        if available < required {
            return Err(LedgerError::InsufficientPoolBalance {
                pool,
                asset,
                available,
                required,
            }
            .into());
        }
    }
    Ok(())
}

/// Reverses `done` newest first, stopping at the first reversal the
/// ledger rejects.
fn unwind<L: AssetLedger>(ledger: &mut L, pool: AccountId, done: &[Leg]) -> Result<(), LedgerError> {
    if done.is_empty() {
        return Ok(());
    }
    tracing::warn!(%pool, legs = done.len(), "unwinding partially executed transfers");
    for leg in done.iter().rev() {
        let reversed = match *leg {
            Leg::Pull {
                from,
                asset,
                amount,
            } => ledger.refund(pool, from, asset, amount),
            Leg::Push { to, asset, amount } => ledger.reclaim(pool, to, asset, amount),
        };
        if let Err(e) = reversed {
            tracing::error!(%pool, ?leg, error = %e, "failed to reverse transfer");
            return Err(e);
        }
    }
    Ok(())
}
