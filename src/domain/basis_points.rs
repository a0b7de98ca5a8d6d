//! Basis-point representation for percentages.

use core::fmt;

use alloy_primitives::U256;

use super::{Amount, Rounding};
use crate::error::RouterError;

/// Maximum value that represents 100%.
const MAX_BPS: u16 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used both for pool swap fees and for the transfer tax of a
/// fee-on-transfer asset in the in-memory ledger.
///
/// # Examples
///
/// ```
/// use fot_router::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.complement().get(), 9_970);
/// assert_eq!(bp.apply(Amount::new(10_000), Rounding::Down), Ok(Amount::new(30)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// The basis-point denominator as a 256-bit amount.
    pub const DENOMINATOR: Amount = Amount::new(MAX_BPS as u128);

    /// Creates a new `BasisPoints` from a raw value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 − self`, saturating at zero.
    pub const fn complement(&self) -> Self {
        Self(MAX_BPS.saturating_sub(self.0))
    }

    /// Returns the value as an [`Amount`] for 256-bit arithmetic.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0 as u128)
    }

    /// Computes `amount × self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if the multiplication overflows.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = amount
            .get()
            .checked_mul(U256::from(self.0))
            .map(Amount::from_u256)
            .ok_or(RouterError::Overflow("basis points apply"))?;
        product
            .checked_div(&Self::DENOMINATOR, rounding)
            .ok_or(RouterError::DivisionByZero)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
