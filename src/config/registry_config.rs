//! Registry-wide defaults, one [`PoolConfig`] per pool kind.

use serde::{Deserialize, Serialize};

use super::PoolConfig;
use crate::domain::PoolKind;
use crate::error::AmmError;

/// Default configuration applied to pools created by the registry.
///
/// # Examples
///
/// ```
/// use miniswap::config::{FeeMode, RegistryConfig};
/// use miniswap::domain::PoolKind;
///
/// let cfg = RegistryConfig::default();
/// assert_eq!(cfg.for_kind(&PoolKind::ConstantProduct).fee_mode(), FeeMode::Compound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    fixed_ratio: PoolConfig,
    constant_product: PoolConfig,
}

impl RegistryConfig {
    /// Creates a validated registry configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of either pool configuration.
    pub fn new(fixed_ratio: PoolConfig, constant_product: PoolConfig) -> Result<Self, AmmError> {
        let config = Self {
            fixed_ratio,
            constant_product,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates both pool configurations.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of either pool configuration.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fixed_ratio.validate()?;
        self.constant_product.validate()
    }

    /// Default configuration of fixed-ratio pools.
    #[must_use]
    pub const fn fixed_ratio(&self) -> &PoolConfig {
        &self.fixed_ratio
    }

    /// Default configuration of constant-product pools.
    #[must_use]
    pub const fn constant_product(&self) -> &PoolConfig {
        &self.constant_product
    }

    /// Default configuration for pools of `kind`.
    #[must_use]
    pub const fn for_kind(&self, kind: &PoolKind) -> &PoolConfig {
        match kind {
            PoolKind::FixedRatio { .. } => &self.fixed_ratio,
            PoolKind::ConstantProduct => &self.constant_product,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fixed_ratio: PoolConfig::fixed_ratio_default(),
            constant_product: PoolConfig::uniswap_v2(),
        }
    }
}
