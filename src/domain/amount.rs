//! Raw 256-bit token amount with checked arithmetic.

use core::fmt;

use alloy_primitives::U256;

use super::Rounding;

/// A raw token amount in the smallest unit (wei or equivalent).
///
/// Wraps a 256-bit unsigned integer.  Arithmetic methods are checked:
/// they return `None` on overflow, underflow, or division by zero
/// instead of panicking or wrapping.
///
/// # Examples
///
/// ```
/// use fot_router::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(67)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256::ZERO);

    /// One unit.
    pub const ONE: Self = Self::new(1);

    /// Maximum representable amount.
    pub const MAX: Self = Self(U256::MAX);

    /// Creates an `Amount` from a `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(U256::from_limbs([value as u64, (value >> 64) as u64, 0, 0]))
    }

    /// Creates an `Amount` from a full 256-bit value.
    pub const fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Checked division with explicit rounding direction.
    ///
    /// Ceiling division is computed as `floor(n / d) + (n % d != 0)`, which
    /// cannot overflow.  Returns `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        let quotient = self.0.checked_div(divisor.0)?;
        match rounding {
            Rounding::Down => Some(Self(quotient)),
            Rounding::Up => {
                let remainder = self.0.checked_rem(divisor.0)?;
                if remainder.is_zero() {
                    Some(Self(quotient))
                } else {
                    quotient.checked_add(U256::from(1u8)).map(Self)
                }
            }
        }
    }

    /// Returns the smaller of two amounts.
    pub fn min(self, other: Self) -> Self {
        core::cmp::min(self, other)
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::new(value)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_round_trips_full_u128() {
        assert_eq!(Amount::new(u128::MAX).get(), U256::from(u128::MAX));
        assert_eq!(Amount::new(42).get(), U256::from(42u8));
    }

    #[test]
    fn constants() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::ONE, Amount::new(1));
        assert_eq!(Amount::MAX.get(), U256::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn add_beyond_u128_does_not_overflow() {
        let big = Amount::new(u128::MAX);
        let Some(sum) = big.checked_add(&Amount::ONE) else {
            panic!("256-bit headroom");
        };
        assert!(sum > big);
    }

    #[test]
    fn add_overflow_at_u256_max() {
        assert_eq!(Amount::MAX.checked_add(&Amount::ONE), None);
    }

    #[test]
    fn sub_underflow() {
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(Amount::new(1).saturating_sub(&Amount::new(2)), Amount::ZERO);
    }

    #[test]
    fn mul_overflow() {
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
        assert_eq!(
            Amount::new(1_000).checked_mul(&Amount::new(1_000)),
            Some(Amount::new(1_000_000))
        );
    }

    #[test]
    fn div_rounding() {
        let ten = Amount::new(10);
        let three = Amount::new(3);
        assert_eq!(ten.checked_div(&three, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(ten.checked_div(&three, Rounding::Up), Some(Amount::new(4)));
        assert_eq!(
            Amount::new(9).checked_div(&three, Rounding::Up),
            Some(Amount::new(3))
        );
    }

    #[test]
    fn div_by_zero() {
        assert_eq!(Amount::ONE.checked_div(&Amount::ZERO, Rounding::Down), None);
        assert_eq!(Amount::ONE.checked_div(&Amount::ZERO, Rounding::Up), None);
    }

    #[test]
    fn div_max_round_up() {
        let Some(ceil) = Amount::MAX.checked_div(&Amount::new(2), Rounding::Up) else {
            panic!("no overflow in ceiling division");
        };
        let Some(floor) = Amount::MAX.checked_div(&Amount::new(2), Rounding::Down) else {
            panic!("no overflow in floor division");
        };
        assert_eq!(floor.checked_add(&Amount::ONE), Some(ceil));
    }

    #[test]
    fn display() {
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }

    #[test]
    fn min_picks_smaller() {
        assert_eq!(Amount::new(5).min(Amount::new(3)), Amount::new(3));
    }
}
