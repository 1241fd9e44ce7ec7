//! Unified error types for the MiniSwap engine.
//!
//! Every fallible pool, registry and math operation returns [`AmmError`].
//! Failures raised by the external asset ledger are carried unmodified in
//! [`AmmError::Ledger`].
//!
//! All errors are recoverable: an operation that returns `Err` has left the
//! pool exactly as it found it. [`AmmError::UnwindFailed`] is the one case
//! where the ledger could not be restored to match.

use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId};

/// Failure reported by an [`AssetLedger`](crate::traits::AssetLedger)
/// transfer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The paying account does not hold enough of the asset.
    #[error("insufficient balance: {account} holds {available} of {asset}, needs {required}")]
    InsufficientBalance {
        /// Account being debited.
        account: AccountId,
        /// Asset being moved.
        asset: AssetId,
        /// Balance held.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// The paying account has not approved the pool for enough units.
    #[error("insufficient allowance: {account} approved {approved} of {asset}, needs {required}")]
    InsufficientAllowance {
        /// Account being debited.
        account: AccountId,
        /// Asset being moved.
        asset: AssetId,
        /// Allowance granted to the pool.
        approved: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// The pool itself does not hold enough of the asset to pay out.
    #[error("insufficient pool balance: pool {pool} holds {available} of {asset}, needs {required}")]
    InsufficientPoolBalance {
        /// Pool address.
        pool: AccountId,
        /// Asset being moved.
        asset: AssetId,
        /// Balance held by the pool.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },
}

/// Error type shared by every MiniSwap operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// A zero or otherwise unusable amount was supplied.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A deposit does not match the configured or current ratio.
    #[error("deposit ratio mismatch")]
    RatioMismatch,

    /// The first deposit is too small to clear the locked minimum liquidity.
    #[error("insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    /// Removal or transfer exceeds the holder's share balance.
    #[error("insufficient shares")]
    InsufficientShares,

    /// The asset is not one of the pool's two assets.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A swap was requested with a zero input amount.
    #[error("zero amount")]
    ZeroAmount,

    /// The pool has no reserves to trade against.
    #[error("pool is empty")]
    PoolEmpty,

    /// Reserves cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Pricing was asked for a zero input.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// The computed or requested output is zero.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// The post-swap reserve product would decrease.
    #[error("constant-product invariant violated")]
    KInvariantViolation,

    /// A pair was requested with the same asset on both sides.
    #[error("identical assets")]
    IdenticalAssets,

    /// A pool already exists for the unordered asset pair.
    #[error("pair exists")]
    PairExists,

    /// A fixed exchange ratio has a zero component.
    #[error("invalid ratio")]
    InvalidRatio,

    /// The fee rate is out of range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A pool or registry configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Intermediate or stored arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A stored quantity would go negative.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// A ledger transfer failed; the enclosing operation was aborted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A ledger transfer failed and reversing the transfers already made
    /// failed too. The pool is unchanged but its ledger balances no longer
    /// match its reserves; the host must reconcile them.
    #[error("ledger transfer failed ({cause}) and could not be reversed ({reversal})")]
    UnwindFailed {
        /// Failure that aborted the operation.
        cause: LedgerError,
        /// Failure of the first reversal that did not go through.
        reversal: LedgerError,
    },
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_error_converts_unmodified() {
        let inner = LedgerError::InsufficientAllowance {
            account: AccountId::from_bytes([7u8; 32]),
            asset: AssetId::from_bytes([1u8; 32]),
            approved: Amount::new(5),
            required: Amount::new(10),
        };
        let err: AmmError = inner.clone().into();
        assert_eq!(err, AmmError::Ledger(inner));
    }

    #[test]
    fn display_messages() {
        assert_eq!(AmmError::PairExists.to_string(), "pair exists");
        assert_eq!(
            AmmError::Overflow("reserve").to_string(),
            "arithmetic overflow: reserve"
        );
    }

    #[test]
    fn transparent_ledger_display() {
        let inner = LedgerError::InsufficientPoolBalance {
            pool: AccountId::from_bytes([9u8; 32]),
            asset: AssetId::from_bytes([2u8; 32]),
            available: Amount::new(1),
            required: Amount::new(2),
        };
        let msg = AmmError::from(inner).to_string();
        assert!(msg.starts_with("insufficient pool balance"));
    }
}
