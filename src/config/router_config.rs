//! Router configuration.

use alloy_primitives::Address;

use crate::domain::Asset;
use crate::error::RouterError;

/// Immutable parameters of a [`Router`](crate::router::Router).
///
/// - `wrapped_native` is the asset that stands in for the chain's native
///   currency in the `*_eth_*` entry points.  It must not carry a transfer
///   tax.
/// - `account` is the router's own ledger account.  Native value paid to
///   the ETH entry points lands there first; unused value is refunded from
///   it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    wrapped_native: Asset,
    account: Address,
}

impl RouterConfig {
    /// Creates a new `RouterConfig`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::ZeroAddress`] if `wrapped_native` is the zero asset.
    /// - [`RouterError::InvalidConfiguration`] if `account` is zero or equals
    ///   the wrapped-native address.
    pub fn new(wrapped_native: Asset, account: Address) -> Result<Self, RouterError> {
        let config = Self {
            wrapped_native,
            account,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`RouterConfig::new`].
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.wrapped_native.is_zero() {
            return Err(RouterError::ZeroAddress);
        }
        if self.account.is_zero() {
            return Err(RouterError::InvalidConfiguration(
                "router account must be non-zero",
            ));
        }
        if self.account == self.wrapped_native.address() {
            return Err(RouterError::InvalidConfiguration(
                "router account collides with wrapped native asset",
            ));
        }
        Ok(())
    }

    /// Returns the wrapped-native asset.
    #[must_use]
    pub const fn wrapped_native(&self) -> Asset {
        self.wrapped_native
    }

    /// Returns the router's ledger account.
    #[must_use]
    pub const fn account(&self) -> Address {
        self.account
    }
}
