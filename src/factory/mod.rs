//! Pair creation and lookup.
//!
//! The [`PoolRegistry`] creates pools from a [`RegistryConfig`], stores
//! them under their unordered asset pair and hands out [`PoolHandle`]s.
//!
//! # Usage
//!
//! ```rust
//! use miniswap::domain::AssetId;
//! use miniswap::factory::PoolRegistry;
//! use miniswap::traits::SwapPool;
//!
//! let usdc = AssetId::from_bytes([1u8; 32]);
//! let weth = AssetId::from_bytes([2u8; 32]);
//!
//! let mut registry = PoolRegistry::default();
//! let pool = registry.create_amm_pair(weth, usdc).expect("new pair");
//!
//! assert_eq!(pool.asset_pair().first(), usdc);
//! assert_eq!(registry.get_pair(usdc, weth), Some(pool));
//! assert_eq!(registry.all_pairs_length(), 1);
//! ```
//!
//! [`RegistryConfig`]: crate::config::RegistryConfig
//! [`PoolHandle`]: crate::pools::PoolHandle

mod registry;

pub use registry::{PairInfo, PoolRegistry};
