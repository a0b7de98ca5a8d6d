//! In-memory pair registry.

use std::collections::BTreeMap;

use alloy_primitives::Address;
use tracing::debug;

use crate::config::PoolConfig;
use crate::domain::{Asset, AssetPair};
use crate::error::RouterError;
use crate::pools::ReservePool;
use crate::traits::{FromConfig, PairRegistry};

/// Owns every [`ReservePool`], keyed by canonical [`AssetPair`].
///
/// New pools take their fee and minimum-liquidity lock from the
/// registry's [`PoolConfig`].  Pools are never removed.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::Address;
/// use fot_router::config::PoolConfig;
/// use fot_router::domain::Asset;
/// use fot_router::factory::PoolRegistry;
/// use fot_router::traits::{FromConfig, PairRegistry};
///
/// let mut registry = PoolRegistry::from_config(&PoolConfig::default()).expect("valid");
/// let (a, b) = (Asset::new(Address::repeat_byte(1)), Asset::new(Address::repeat_byte(2)));
///
/// let pool = registry.create_pair(b, a).expect("created");
/// assert_eq!(registry.get_pair(a, b), Some(pool));
/// assert_eq!(registry.pair_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistry {
    config: PoolConfig,
    pools: BTreeMap<AssetPair, ReservePool>,
}

impl PoolRegistry {
    /// Returns the configuration new pools are created with.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Iterates over all pools in pair order.
    pub fn pools(&self) -> impl Iterator<Item = &ReservePool> + '_ {
        self.pools.values()
    }

    fn key(a: Asset, b: Asset) -> Option<AssetPair> {
        AssetPair::new(a, b).ok()
    }
}

impl FromConfig<PoolConfig> for PoolRegistry {
    fn from_config(config: &PoolConfig) -> Result<Self, RouterError> {
        config.validate()?;
        Ok(Self {
            config: *config,
            pools: BTreeMap::new(),
        })
    }
}

impl PairRegistry for PoolRegistry {
    fn get_pair(&self, a: Asset, b: Asset) -> Option<Address> {
        self.pool(a, b).map(ReservePool::address)
    }

    fn create_pair(&mut self, a: Asset, b: Asset) -> Result<Address, RouterError> {
        let pair = AssetPair::new(a, b)?;
        if self.pools.contains_key(&pair) {
            return Err(RouterError::PairExists);
        }
        let pool = ReservePool::new(pair, &self.config)?;
        let address = pool.address();
        self.pools.insert(pair, pool);
        debug!(first = %pair.first(), second = %pair.second(), pool = %address, "pair created");
        Ok(address)
    }

    fn pool(&self, a: Asset, b: Asset) -> Option<&ReservePool> {
        Self::key(a, b).and_then(|pair| self.pools.get(&pair))
    }

    fn pool_mut(&mut self, a: Asset, b: Asset) -> Option<&mut ReservePool> {
        Self::key(a, b).and_then(|pair| self.pools.get_mut(&pair))
    }

    fn pair_count(&self) -> usize {
        self.pools.len()
    }
}
