//! # MiniSwap
//!
//! Pool accounting engine for a two-asset automated market maker.
//!
//! The crate keeps the books of constant-product (Uniswap V2 style) and
//! fixed-ratio pools: reserves, liquidity shares, swap pricing, swap fees
//! and the registry that creates one pool per asset pair. Assets
//! themselves are held by an external [`AssetLedger`](traits::AssetLedger)
//! that the caller passes to every operation.
//!
//! Two pool kinds are supported:
//!
//! - **Constant product**: `x * y = k` pricing with a fee kept in the
//!   reserves, an optional protocol fee and 1000 locked shares on the
//!   first deposit.
//! - **Fixed ratio**: a configured exchange rate, fees escrowed and paid to
//!   liquidity providers pro rata through a per-share accumulator.
//!
//! Either fee treatment ([`FeeMode`](config::FeeMode)) can be combined
//! with either kind through [`PoolConfig`](config::PoolConfig).
//!
//! # Quick Start
//!
//! ```rust
//! use miniswap::domain::{AccountId, Amount, AssetId};
//! use miniswap::factory::PoolRegistry;
//! use miniswap::ledger::InMemoryLedger;
//! use miniswap::traits::{AssetLedger, LiquidityPool, SwapPool};
//!
//! // 1. Two assets and a funded account
//! let usdc = AssetId::from_bytes([1u8; 32]);
//! let weth = AssetId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([0xa1; 32]);
//!
//! // 2. Create a constant-product pair
//! let mut registry = PoolRegistry::default();
//! let mut pool = registry.create_amm_pair(usdc, weth).expect("new pair");
//! let pool_address = pool.lock().address();
//!
//! let mut ledger = InMemoryLedger::new();
//! for asset in [usdc, weth] {
//!     ledger.mint(alice, asset, Amount::new(10_000_000)).expect("mint");
//!     ledger.approve(alice, pool_address, asset, Amount::MAX);
//! }
//!
//! // 3. Seed it
//! let added = pool
//!     .add_liquidity(&mut ledger, alice, Amount::new(1_000_000), Amount::new(4_000_000))
//!     .expect("first deposit");
//! assert_eq!(added.minted.get(), 2_000_000 - 1_000);
//!
//! // 4. Swap 10 000 units of USDC for WETH
//! let result = pool.swap(&mut ledger, alice, usdc, Amount::new(10_000)).expect("swap");
//!
//! assert!(result.amount_out().get() > 0);
//! assert_eq!(result.fee().get(), 30);
//! assert_eq!(ledger.balance_of(pool_address, usdc), pool.reserves().0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  PoolRegistry::create_amm_pair / create_fixed_ratio_pair
//! └──────┬───────┘
//!        │ PoolHandle (Arc<Mutex<Pool>>)
//!        ▼
//! ┌──────────────┐
//! │     Pool      │  plan → settle transfers → commit
//! └──┬────┬────┬─┘
//!    │    │    │ SwapEngine, LiquidityAccountant, FeeDistributor
//!    │    │    ▼
//!    │    │  ┌──────────────┐
//!    │    │  │     Math      │  U256 / U512 integer arithmetic
//!    │    │  └──────────────┘
//!    │    ▼
//!    │  AssetLedger (transfer_in / transfer_out / balance_of)
//!    ▼
//! ┌──────────────┐
//! │    Domain     │  Amount, Shares, AssetPair, FeeRate, Price, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), events, receipts |
//! | [`traits`] | Core abstractions: [`AssetLedger`](traits::AssetLedger), [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`RegistryConfig`](config::RegistryConfig) |
//! | [`pools`]  | [`Pool`](pools::Pool), [`PoolHandle`](pools::PoolHandle), [`FeeDistributor`](pools::FeeDistributor) |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry): pair creation and lookup |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`math`]   | [`SwapEngine`](math::SwapEngine), [`LiquidityAccountant`](math::LiquidityAccountant), wide arithmetic |
//! | [`error`]  | [`AmmError`](error::AmmError) and [`LedgerError`](error::LedgerError) |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! Lifecycle events are emitted with [`tracing`]: `info` for pair creation,
//! liquidity changes and reward claims, `debug` for swaps and share
//! transfers, `warn`/`error` when a failed operation unwinds ledger
//! transfers. The crate never installs a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
