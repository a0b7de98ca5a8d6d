//! Fungible asset identity.

use core::fmt;

use alloy_primitives::Address;

/// An opaque fungible-token identifier.
///
/// Wraps the 20-byte address of the token.  All addresses are accepted
/// here; the zero address is rejected where an asset enters a pair.
///
/// # Examples
///
/// ```
/// use fot_router::domain::Asset;
/// use alloy_primitives::Address;
///
/// let usdc = Asset::new(Address::repeat_byte(1));
/// assert_eq!(usdc.address(), Address::repeat_byte(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Asset(Address);

impl Asset {
    /// Creates an asset from its token address.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }

    /// Returns `true` for the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Address::ZERO
    }
}

impl From<Address> for Asset {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
