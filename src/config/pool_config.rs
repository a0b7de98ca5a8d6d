//! Configuration shared by every pool the registry creates.

use crate::domain::{FeeTier, Liquidity};
use crate::error::RouterError;

/// Parameters applied to each newly created reserve pool.
///
/// # Validation
///
/// - The fee must be strictly below 100%.
/// - The minimum-liquidity lock must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    fee_tier: FeeTier,
    minimum_liquidity: Liquidity,
}

impl PoolConfig {
    /// Shares locked to the zero address on a pool's first mint.
    pub const DEFAULT_MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidFee`] if the fee is 100% or more.
    /// - [`RouterError::InvalidConfiguration`] if the lock is zero.
    pub fn new(fee_tier: FeeTier, minimum_liquidity: Liquidity) -> Result<Self, RouterError> {
        let config = Self {
            fee_tier,
            minimum_liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`PoolConfig::new`].
    pub fn validate(&self) -> Result<(), RouterError> {
        self.fee_tier.validate()?;
        if self.minimum_liquidity.is_zero() {
            return Err(RouterError::InvalidConfiguration(
                "minimum liquidity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the minimum-liquidity lock.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Liquidity {
        self.minimum_liquidity
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_tier: FeeTier::TIER_0_30_PERCENT,
            minimum_liquidity: Self::DEFAULT_MINIMUM_LIQUIDITY,
        }
    }
}
