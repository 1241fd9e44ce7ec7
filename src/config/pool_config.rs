//! Per-pool configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, FeeRate, Shares};
use crate::error::AmmError;

/// How deposits into a seeded pool are turned into shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DepositPolicy {
    /// Mint `min(a * T / Ra, b * T / Rb)`; the surplus of the
    /// over-supplied asset is still taken into the pool.
    #[default]
    WeakestConstraint,
    /// Require `a * Rb == b * Ra` and mint `a * T / Ra`.
    ExactRatio,
}

/// Where swap fees go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeeMode {
    /// Fees stay in the reserves and raise the value of every share.
    #[default]
    Compound,
    /// Fees are escrowed and paid to holders pro rata through the fee
    /// distributor.
    Distribute,
}

/// Immutable parameters of one pool, fixed at creation.
///
/// # Validation
///
/// - The fee rate must be a fraction in `[0, 1]`.
/// - A protocol fee recipient requires [`FeeMode::Compound`] and cannot be
///   the burn address.
///
/// # Examples
///
/// ```
/// use miniswap::config::{FeeMode, PoolConfig};
/// use miniswap::domain::AccountId;
///
/// let cfg = PoolConfig::uniswap_v2()
///     .with_protocol_fee_to(AccountId::from_bytes([9u8; 32]))
///     .expect("compounding pool accepts a fee recipient");
/// assert_eq!(cfg.fee_mode(), FeeMode::Compound);
///
/// let distributing = PoolConfig::fixed_ratio_default();
/// assert!(distributing.with_protocol_fee_to(AccountId::from_bytes([9u8; 32])).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    fee_rate: FeeRate,
    minimum_liquidity: Shares,
    deposit_policy: DepositPolicy,
    fee_mode: FeeMode,
    protocol_fee_to: Option<AccountId>,
}

impl PoolConfig {
    /// Shares locked by the first deposit of a constant-product pool.
    pub const MINIMUM_LIQUIDITY: Shares = Shares::new(1_000);

    /// Creates a validated configuration without a protocol fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for an out-of-range fee rate.
    pub fn new(
        fee_rate: FeeRate,
        minimum_liquidity: Shares,
        deposit_policy: DepositPolicy,
        fee_mode: FeeMode,
    ) -> Result<Self, AmmError> {
        let config = Self {
            fee_rate,
            minimum_liquidity,
            deposit_policy,
            fee_mode,
            protocol_fee_to: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Uniswap V2 pair: 0.3% compounding fee, 1000 locked shares,
    /// weakest-constraint deposits.
    #[must_use]
    pub const fn uniswap_v2() -> Self {
        Self {
            fee_rate: FeeRate::UNISWAP_V2,
            minimum_liquidity: Self::MINIMUM_LIQUIDITY,
            deposit_policy: DepositPolicy::WeakestConstraint,
            fee_mode: FeeMode::Compound,
            protocol_fee_to: None,
        }
    }

    /// Fixed-ratio pair: 0.3% fee paid out to holders, no locked shares.
    #[must_use]
    pub const fn fixed_ratio_default() -> Self {
        Self {
            fee_rate: FeeRate::UNISWAP_V2,
            minimum_liquidity: Shares::ZERO,
            deposit_policy: DepositPolicy::WeakestConstraint,
            fee_mode: FeeMode::Distribute,
            protocol_fee_to: None,
        }
    }

    /// Returns a copy that mints protocol-fee shares to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the pool distributes
    /// fees or `recipient` is the burn address.
    pub fn with_protocol_fee_to(self, recipient: AccountId) -> Result<Self, AmmError> {
        let config = Self {
            protocol_fee_to: Some(recipient),
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for an out-of-range fee rate.
    pub fn with_fee_rate(self, fee_rate: FeeRate) -> Result<Self, AmmError> {
        let config = Self { fee_rate, ..self };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// Configurations read through `serde` must be validated before use;
    /// the registry does this on construction.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] for an out-of-range fee rate.
    /// - [`AmmError::InvalidConfiguration`] for an unusable protocol fee
    ///   recipient.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee_rate.validate()?;
        if let Some(to) = self.protocol_fee_to {
            if self.fee_mode != FeeMode::Compound {
                return Err(AmmError::InvalidConfiguration(
                    "protocol fee requires compounding fees",
                ));
            }
            if to.is_burn() {
                return Err(AmmError::InvalidConfiguration(
                    "protocol fee recipient cannot be the burn address",
                ));
            }
        }
        Ok(())
    }

    /// Swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Shares locked to the burn address by a first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Shares {
        self.minimum_liquidity
    }

    /// Deposit rule for seeded pools.
    #[must_use]
    pub const fn deposit_policy(&self) -> DepositPolicy {
        self.deposit_policy
    }

    /// Fee destination.
    #[must_use]
    pub const fn fee_mode(&self) -> FeeMode {
        self.fee_mode
    }

    /// Protocol fee recipient, if any.
    #[must_use]
    pub const fn protocol_fee_to(&self) -> Option<AccountId> {
        self.protocol_fee_to
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::uniswap_v2()
    }
}
