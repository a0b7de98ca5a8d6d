//! Unordered pair of distinct assets, stored in canonical order.

use alloy_primitives::{keccak256, Address};

use super::Asset;
use crate::error::RouterError;

/// A canonically-ordered pair of distinct assets.
///
/// The constructor sorts its arguments so `first() < second()`; `(A, B)`
/// and `(B, A)` therefore build equal pairs and resolve to the same pool.
///
/// # Examples
///
/// ```
/// use fot_router::domain::{Asset, AssetPair};
/// use alloy_primitives::Address;
///
/// let a = Asset::new(Address::repeat_byte(1));
/// let b = Asset::new(Address::repeat_byte(2));
///
/// let pair = AssetPair::new(b, a).expect("distinct assets");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair.second(), b);
/// assert_eq!(pair, AssetPair::new(a, b).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPair {
    asset_a: Asset,
    asset_b: Asset,
}

impl AssetPair {
    /// Creates a new canonically-ordered pair.
    ///
    /// # Errors
    ///
    /// - [`RouterError::IdenticalAssets`] if both assets are equal.
    /// - [`RouterError::ZeroAddress`] if either asset is the zero address.
    pub fn new(asset1: Asset, asset2: Asset) -> Result<Self, RouterError> {
        if asset1 == asset2 {
            return Err(RouterError::IdenticalAssets);
        }
        let (asset_a, asset_b) = if asset1 < asset2 {
            (asset1, asset2)
        } else {
            (asset2, asset1)
        };
        if asset_a.is_zero() {
            return Err(RouterError::ZeroAddress);
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the asset with the lower address.
    #[must_use]
    pub const fn first(&self) -> Asset {
        self.asset_a
    }

    /// Returns the asset with the higher address.
    #[must_use]
    pub const fn second(&self) -> Asset {
        self.asset_b
    }

    /// Returns `true` if `asset` is part of this pair.
    #[must_use]
    pub fn contains(&self, asset: &Asset) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns `true` if `asset` is the first (lower) asset.
    #[must_use]
    pub fn is_first(&self, asset: &Asset) -> bool {
        self.asset_a == *asset
    }

    /// Returns the counterpart of `asset` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PairNotFound`] if `asset` is not in the pair.
    pub fn other(&self, asset: &Asset) -> Result<Asset, RouterError> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(RouterError::PairNotFound)
        }
    }

    /// Deterministic account address of the pool holding this pair.
    ///
    /// The last 20 bytes of `keccak256(first ‖ second)`.
    #[must_use]
    pub fn pool_address(&self) -> Address {
        let mut preimage = [0u8; 40];
        preimage[..20].copy_from_slice(self.asset_a.address().as_slice());
        preimage[20..].copy_from_slice(self.asset_b.address().as_slice());
        Address::from_word(keccak256(preimage))
    }
}
