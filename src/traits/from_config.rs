//! Construction from a validated configuration.

use crate::error::RouterError;

/// Builds a value from its configuration struct.
///
/// Implementations validate the configuration before constructing, so a
/// successfully built value always starts in a valid state.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for PoolRegistry`
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error.
    fn from_config(config: &C) -> Result<Self, RouterError>
    where
        Self: Sized;
}
