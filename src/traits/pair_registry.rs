//! Pair registry seam.

use alloy_primitives::Address;

use crate::domain::Asset;
use crate::error::RouterError;
use crate::pools::ReservePool;

/// Lookup and creation of reserve pools keyed by unordered asset pair.
///
/// `(a, b)` and `(b, a)` always resolve to the same pool.  The registry
/// owns its pools; callers borrow them for the duration of one operation.
pub trait PairRegistry {
    /// Account address of the pool for `(a, b)`, if it exists.
    fn get_pair(&self, a: Asset, b: Asset) -> Option<Address>;

    /// Creates the pool for `(a, b)` and returns its account address.
    ///
    /// # Errors
    ///
    /// - [`RouterError::IdenticalAssets`] / [`RouterError::ZeroAddress`] for
    ///   an invalid pair.
    /// - [`RouterError::PairExists`] if the pool already exists.
    fn create_pair(&mut self, a: Asset, b: Asset) -> Result<Address, RouterError>;

    /// Shared access to the pool for `(a, b)`.
    fn pool(&self, a: Asset, b: Asset) -> Option<&ReservePool>;

    /// Exclusive access to the pool for `(a, b)`.
    fn pool_mut(&mut self, a: Asset, b: Asset) -> Option<&mut ReservePool>;

    /// Number of pools created so far.
    fn pair_count(&self) -> usize;
}
