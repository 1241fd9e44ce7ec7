//! Swap execution and price queries.
//!
//! [`SwapPool`] is implemented by [`Pool`](crate::pools::Pool) for direct,
//! single-owner use and by [`PoolHandle`](crate::pools::PoolHandle) for
//! pools shared through the registry.
//!
//! # Fee handling
//!
//! The fee is always taken from the input:
//!
//! ```text
//! fee = amount_in - floor(amount_in * kept / denominator)
//! ```
//!
//! Compounding pools leave it in the reserves; distributing pools escrow
//! it for liquidity providers.

use crate::domain::{AccountId, Amount, AssetId, AssetPair, FeeRate, Price, SwapResult};
use crate::error::AmmError;
use crate::traits::AssetLedger;

/// Swap operations of a two-asset pool.
///
/// # Errors
///
/// Common error variants:
///
/// - [`AmmError::InvalidToken`]: the asset is not pooled.
/// - [`AmmError::ZeroAmount`]: zero input.
/// - [`AmmError::PoolEmpty`]: a reserve is zero.
/// - [`AmmError::Ledger`]: a transfer failed; nothing changed.
pub trait SwapPool {
    /// Sells exactly `amount_in` of `asset_in` for the other asset.
    ///
    /// Transfers are atomic with the reserve update: the swap either
    /// completes fully or returns an error with the pool and ledger
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `asset_in` is not pooled.
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::PoolEmpty`] if either reserve is zero.
    /// - [`AmmError::InsufficientOutputAmount`] if the output rounds to zero.
    /// - [`AmmError::InsufficientLiquidity`] if a fixed-ratio pool cannot
    ///   cover the output.
    /// - [`AmmError::Ledger`] if a transfer fails.
    fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
    ) -> Result<SwapResult, AmmError>;

    /// Buys exactly `amount_out` of the other asset, paying the minimal
    /// input of `asset_in`.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap), plus [`AmmError::InsufficientLiquidity`]
    /// if `amount_out` is not strictly below the output reserve.
    fn swap_exact_out<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: AccountId,
        asset_in: AssetId,
        amount_out: Amount,
    ) -> Result<SwapResult, AmmError>;

    /// Output [`swap`](Self::swap) would produce right now.
    ///
    /// # Errors
    ///
    /// Same validation as [`swap`](Self::swap), without transfers.
    fn quote_amount_out(&self, asset_in: AssetId, amount_in: Amount) -> Result<Amount, AmmError>;

    /// Input [`swap_exact_out`](Self::swap_exact_out) would charge right now.
    ///
    /// # Errors
    ///
    /// Same validation as [`swap_exact_out`](Self::swap_exact_out).
    fn quote_amount_in(&self, asset_in: AssetId, amount_out: Amount) -> Result<Amount, AmmError>;

    /// Units of the other asset per unit of `base`, before fees.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `base` is not pooled.
    /// - [`AmmError::PoolEmpty`] if a constant-product reserve is zero.
    fn spot_price(&self, base: AssetId) -> Result<Price, AmmError>;

    /// The canonically ordered asset pair.
    fn asset_pair(&self) -> AssetPair;

    /// The swap fee rate, constant for the pool's lifetime.
    fn fee_rate(&self) -> FeeRate;
}
