//! Declarative, validated configuration.
//!
//! [`PoolConfig`] holds the immutable parameters of one pool and
//! [`RegistryConfig`] the per-kind defaults used by the registry. Both are
//! `serde` (de)serializable; call `validate()` on anything deserialized.

mod pool_config;
mod registry_config;

pub use pool_config::{DepositPolicy, FeeMode, PoolConfig};
pub use registry_config::RegistryConfig;
