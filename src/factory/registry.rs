//! Registry of pools keyed by unordered asset pair.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{PoolConfig, RegistryConfig};
use crate::domain::{AccountId, AssetId, AssetPair, EventLog, PoolId, PoolKind, RegistryEvent};
use crate::error::AmmError;
use crate::pools::{Pool, PoolHandle};

/// Static description of a registered pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairInfo {
    /// Registry index.
    pub id: PoolId,
    /// Ledger address holding the pool's assets.
    pub address: AccountId,
    /// Canonical asset pair.
    pub pair: AssetPair,
    /// Pricing rule, in canonical orientation.
    pub kind: PoolKind,
}

/// Owned store of every pool, at most one per unordered asset pair.
///
/// Pool ids are assigned sequentially from zero and pool addresses are
/// derived from the id, so a registry rebuilt by replaying the same
/// creations assigns the same addresses.
///
/// # Thread Safety
///
/// Creation takes `&mut self`; share the registry behind the host's own
/// lock if pairs are created concurrently. The returned [`PoolHandle`]s
/// are independently lockable and can be used from any thread.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    config: RegistryConfig,
    pairs: HashMap<AssetPair, PoolHandle>,
    infos: HashMap<AccountId, PairInfo>,
    all_pairs: Vec<PoolHandle>,
    events: EventLog<RegistryEvent>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn new(config: RegistryConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Default pool configurations.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates a fixed-ratio pool where `ratio_a` units of `asset_a` trade
    /// for `ratio_b` units of `asset_b`.
    ///
    /// The ratio is given in request order and stored in canonical order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both assets are equal.
    /// - [`AmmError::InvalidRatio`] if a ratio is zero.
    /// - [`AmmError::PairExists`] if a pool exists for the pair.
    pub fn create_fixed_ratio_pair(
        &mut self,
        asset_a: AssetId,
        asset_b: AssetId,
        ratio_a: u128,
        ratio_b: u128,
    ) -> Result<PoolHandle, AmmError> {
        let kind = PoolKind::FixedRatio { ratio_a, ratio_b };
        let config = *self.config.fixed_ratio();
        self.create_pair_with_config(asset_a, asset_b, kind, config)
    }

    /// Creates a constant-product pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both assets are equal.
    /// - [`AmmError::PairExists`] if a pool exists for the pair.
    pub fn create_amm_pair(
        &mut self,
        asset_a: AssetId,
        asset_b: AssetId,
    ) -> Result<PoolHandle, AmmError> {
        let config = *self.config.constant_product();
        self.create_pair_with_config(asset_a, asset_b, PoolKind::ConstantProduct, config)
    }

    /// Creates a pool with an explicit configuration instead of the
    /// registry default for its kind.
    ///
    /// `kind` is in request order: for a fixed ratio, `ratio_a` belongs to
    /// `asset_a`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both assets are equal.
    /// - [`AmmError::InvalidRatio`] if a ratio is zero.
    /// - [`AmmError::PairExists`] if a pool exists for the pair.
    /// - Any validation error of `config`.
    pub fn create_pair_with_config(
        &mut self,
        asset_a: AssetId,
        asset_b: AssetId,
        kind: PoolKind,
        config: PoolConfig,
    ) -> Result<PoolHandle, AmmError> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        kind.validate()?;
        if self.pairs.contains_key(&pair) {
            return Err(AmmError::PairExists);
        }
        let kind = if pair.first() == asset_a {
            kind
        } else {
            kind.flipped()
        };

        let index = u64::try_from(self.all_pairs.len())
            .map_err(|_| AmmError::Overflow("pool index"))?;
        let id = PoolId::new(index);
        let handle = PoolHandle::new(Pool::new(id, pair, kind, config)?);
        let info = PairInfo {
            id,
            address: id.address(),
            pair,
            kind,
        };

        self.pairs.insert(pair, handle.clone());
        self.infos.insert(info.address, info);
        self.all_pairs.push(handle.clone());

        tracing::info!(
            pool = %id,
            address = %info.address,
            asset_a = %pair.first(),
            asset_b = %pair.second(),
            ?kind,
            "pair created"
        );
        self.events.record(RegistryEvent::PairCreated {
            id,
            pair,
            address: info.address,
            pair_type: kind.pair_type(),
        });
        Ok(handle)
    }

    /// Pool for the unordered pair, if any.
    #[must_use]
    pub fn get_pair(&self, asset_a: AssetId, asset_b: AssetId) -> Option<PoolHandle> {
        let pair = AssetPair::new(asset_a, asset_b).ok()?;
        self.pairs.get(&pair).cloned()
    }

    /// Description of the pool at `address`, if any.
    #[must_use]
    pub fn get_pair_info(&self, address: AccountId) -> Option<PairInfo> {
        self.infos.get(&address).copied()
    }

    /// Number of pools created.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.all_pairs.len()
    }

    /// Pool created `index`-th, if any.
    #[must_use]
    pub fn pair_at(&self, index: usize) -> Option<PoolHandle> {
        self.all_pairs.get(index).cloned()
    }

    /// Events recorded since the last drain, oldest first.
    #[must_use]
    pub const fn events(&self) -> &EventLog<RegistryEvent> {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        self.events.drain()
    }
}
