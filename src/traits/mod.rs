//! Core trait abstractions.
//!
//! [`AssetLedger`] is the seam to the external balance keeper.
//! [`SwapPool`] and [`LiquidityPool`] are the operations every pool offers,
//! implemented both by a bare [`Pool`](crate::pools::Pool) and by the
//! shared [`PoolHandle`](crate::pools::PoolHandle).

mod asset_ledger;
mod liquidity_pool;
mod swap_pool;

pub use asset_ledger::AssetLedger;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
