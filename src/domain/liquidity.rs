//! Pool share units.

use core::fmt;

use alloy_primitives::U256;

use super::Amount;

/// A quantity of liquidity shares in one pool.
///
/// Distinct from [`Amount`] because shares are a pro-rata claim on both
/// reserves rather than a quantity of a single token.
///
/// # Examples
///
/// ```
/// use fot_router::domain::Liquidity;
///
/// let a = Liquidity::new(1_000);
/// let b = Liquidity::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Liquidity::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Liquidity(U256);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Creates shares from a `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(U256::from_limbs([value as u64, (value >> 64) as u64, 0, 0]))
    }

    /// Creates shares from a full 256-bit value.
    pub const fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Reinterprets the share count as an [`Amount`] for ratio math.
    pub const fn as_amount(&self) -> Amount {
        Amount::from_u256(self.0)
    }
}

impl From<Amount> for Liquidity {
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_new() {
        assert!(Liquidity::ZERO.is_zero());
        assert!(!Liquidity::new(1).is_zero());
        assert_eq!(Liquidity::default(), Liquidity::ZERO);
    }

    #[test]
    fn sub_underflow() {
        assert_eq!(Liquidity::new(1).checked_sub(&Liquidity::new(2)), None);
        assert_eq!(
            Liquidity::new(5).checked_sub(&Liquidity::new(2)),
            Some(Liquidity::new(3))
        );
    }

    #[test]
    fn amount_conversion() {
        assert_eq!(Liquidity::new(77).as_amount(), Amount::new(77));
        assert_eq!(Liquidity::from(Amount::new(9)), Liquidity::new(9));
    }
}
