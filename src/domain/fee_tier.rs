//! Pool swap fee built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::RouterError;

/// The swap fee a pool retains from every input, in basis points.
///
/// The fee is taken from the input before the constant-product division,
/// and stays in the pool's reserves.
///
/// # Examples
///
/// ```
/// use fot_router::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.amount_after_fee(Amount::new(100)), Ok(Amount::new(99)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp), the classic constant-product fee.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `10_000 − fee_bps` as an amount.
    pub const fn complement(&self) -> Amount {
        self.0.complement().as_amount()
    }

    /// Rejects fees that would leave nothing to trade with.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidFee`] if the fee is 100% or more.
    pub const fn validate(&self) -> crate::error::Result<()> {
        if self.0.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(RouterError::InvalidFee);
        }
        Ok(())
    }

    /// Computes `amount × (10_000 − fee_bps) / 10_000`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if the multiplication overflows.
    pub fn amount_after_fee(&self, amount: Amount) -> crate::error::Result<Amount> {
        self.0.complement().apply(amount, Rounding::Down)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(FeeTier::TIER_0_05_PERCENT.basis_points().get(), 5);
        assert_eq!(FeeTier::TIER_1_00_PERCENT.basis_points().get(), 100);
        assert_eq!(FeeTier::default(), FeeTier::TIER_0_30_PERCENT);
    }

    #[test]
    fn complement_of_standard_fee() {
        assert_eq!(FeeTier::TIER_0_30_PERCENT.complement(), Amount::new(9_970));
    }

    #[test]
    fn validate_rejects_full_fee() {
        assert!(FeeTier::TIER_1_00_PERCENT.validate().is_ok());
        assert_eq!(
            FeeTier::new(BasisPoints::MAX_PERCENT).validate(),
            Err(RouterError::InvalidFee)
        );
    }

    #[test]
    fn amount_after_fee_floors() {
        // 1000 * 9970 / 10000 = 997 exactly; 999 * 0.997 = 996.003 -> 996
        let tier = FeeTier::TIER_0_30_PERCENT;
        let Ok(exact) = tier.amount_after_fee(Amount::new(1_000)) else {
            panic!("expected Ok");
        };
        let Ok(floored) = tier.amount_after_fee(Amount::new(999)) else {
            panic!("expected Ok");
        };
        assert_eq!(exact, Amount::new(997));
        assert_eq!(floored, Amount::new(996));
    }

    #[test]
    fn display() {
        assert_eq!(FeeTier::TIER_0_30_PERCENT.to_string(), "FeeTier(30bp)");
    }
}
