//! Domain value types of the pool accounting engine.
//!
//! Identifiers, amounts, fee rates, pool kinds, prices and the receipts and
//! events produced by pool operations. Constructors that can fail validate
//! their invariants and return [`AmmError`](crate::error::AmmError).

mod account_id;
mod amount;
mod asset_id;
mod asset_pair;
mod fee_rate;
mod pool_event;
mod pool_id;
mod pool_kind;
mod price;
mod receipts;
mod rounding;
mod shares;
mod swap_result;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_pair::{AssetPair, Side};
pub use fee_rate::FeeRate;
pub use pool_event::{EventLog, PoolEvent, RegistryEvent};
pub use pool_id::PoolId;
pub use pool_kind::{PairType, PoolKind};
pub use price::Price;
pub use receipts::{LiquidityAdded, LiquidityRemoved, PendingRewards};
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_result::SwapResult;
