//! Multi-hop swap path with per-asset fee-on-transfer flags.

use super::Asset;
use crate::error::RouterError;

/// An ordered sequence of assets to trade through, with one FOT flag per
/// asset.
///
/// A flag is `true` when transfers of that asset may retain part of the
/// transferred amount.  The router measures real balance deltas on every
/// leg that moves a flagged asset and trusts nominal amounts elsewhere.
///
/// # Invariants
///
/// - At least two assets.
/// - `flags.len() == assets.len()`.
/// - Consecutive assets differ.
/// - Consecutive hops use different pools (no `[A, B, A]`).  A hop pays
///   out to the next hop's pool, so a pool feeding itself would receive
///   nothing new.
///
/// # Examples
///
/// ```
/// use fot_router::domain::{Asset, SwapPath};
/// use alloy_primitives::Address;
///
/// let usdc = Asset::new(Address::repeat_byte(1));
/// let tax  = Asset::new(Address::repeat_byte(2));
/// let path = SwapPath::new(vec![usdc, tax], vec![false, true]).expect("valid path");
///
/// assert_eq!(path.hop_count(), 1);
/// assert!(path.is_fot(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapPath {
    assets: Vec<Asset>,
    fot: Vec<bool>,
}

impl SwapPath {
    /// Creates a validated path.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] if the path has fewer than two
    /// assets, the flag count differs from the asset count, two
    /// consecutive assets are equal, or a hop trades back through the pool
    /// it just left.
    pub fn new(assets: Vec<Asset>, fot: Vec<bool>) -> Result<Self, RouterError> {
        if assets.len() < 2 {
            return Err(RouterError::InvalidPath("path needs at least two assets"));
        }
        if fot.len() != assets.len() {
            return Err(RouterError::InvalidPath(
                "one fee-on-transfer flag per asset required",
            ));
        }
        if assets.windows(2).any(|w| w[0] == w[1]) {
            return Err(RouterError::InvalidPath("consecutive assets must differ"));
        }
        if assets.windows(3).any(|w| w[0] == w[2]) {
            return Err(RouterError::InvalidPath(
                "consecutive hops must use different pools",
            ));
        }
        Ok(Self { assets, fot })
    }

    /// Creates a path in which no asset is fee-on-transfer.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPath::new`].
    pub fn plain(assets: Vec<Asset>) -> Result<Self, RouterError> {
        let fot = vec![false; assets.len()];
        Self::new(assets, fot)
    }

    /// Returns the assets in trade order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Returns the FOT flags, parallel to [`assets`](Self::assets).
    #[must_use]
    pub fn fot_flags(&self) -> &[bool] {
        &self.fot
    }

    /// Returns the asset at `index`.
    ///
    /// `index` must be below [`len`](Self::len).
    #[must_use]
    pub fn asset(&self, index: usize) -> Asset {
        self.assets[index]
    }

    /// Returns `true` if the asset at `index` is flagged fee-on-transfer.
    #[must_use]
    pub fn is_fot(&self, index: usize) -> bool {
        self.fot.get(index).copied().unwrap_or(false)
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always `false` for a validated path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Number of pairwise swaps (`len − 1`).
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.assets.len() - 1
    }

    /// The asset sold.
    #[must_use]
    pub fn first(&self) -> Asset {
        self.assets[0]
    }

    /// The asset bought.
    #[must_use]
    pub fn last(&self) -> Asset {
        self.assets[self.assets.len() - 1]
    }

    /// Iterates `(asset_in, asset_out)` for each hop.
    pub fn hops(&self) -> impl Iterator<Item = (Asset, Asset)> + '_ {
        self.assets.windows(2).map(|w| (w[0], w[1]))
    }
}
