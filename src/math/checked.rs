//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning checked operations of
//! [`Amount`] and [`Liquidity`] into [`RouterError`] results so quote and
//! pool code can chain them with `?`.
//!
//! # Examples
//!
//! ```
//! use fot_router::domain::{Amount, Rounding};
//! use fot_router::math::CheckedArithmetic;
//!
//! let k = Amount::new(1_000).safe_mul(&Amount::new(2_000));
//! assert_eq!(k, Ok(Amount::new(2_000_000)));
//! assert!(Amount::new(1).safe_sub(&Amount::new(2)).is_err());
//! ```

use crate::domain::{Amount, Liquidity, Rounding};
use crate::error::RouterError;

/// Fallible arithmetic for domain wrapper types.
///
/// Each error carries the name of the computation that failed.  There is
/// no saturation: an overflow is an error, never a clamp.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] tagged with `what`.
    fn add_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Underflow`] tagged with `what`.
    fn sub_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] tagged with `what`.
    fn mul_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, RouterError>;

    /// Checked addition with a generic context.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`].
    fn safe_add(&self, other: &Self) -> Result<Self, RouterError> {
        self.add_or(other, "addition")
    }

    /// Checked subtraction with a generic context.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Underflow`].
    fn safe_sub(&self, other: &Self) -> Result<Self, RouterError> {
        self.sub_or(other, "subtraction")
    }

    /// Checked multiplication with a generic context.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`].
    fn safe_mul(&self, other: &Self) -> Result<Self, RouterError> {
        self.mul_or(other, "multiplication")
    }
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn add_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError> {
        self.checked_add(other).ok_or(RouterError::Overflow(what))
    }

    #[inline]
    fn sub_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError> {
        self.checked_sub(other).ok_or(RouterError::Underflow(what))
    }

    #[inline]
    fn mul_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError> {
        self.checked_mul(other).ok_or(RouterError::Overflow(what))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, RouterError> {
        self.checked_div(other, rounding)
            .ok_or(RouterError::DivisionByZero)
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn add_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError> {
        self.checked_add(other).ok_or(RouterError::Overflow(what))
    }

    #[inline]
    fn sub_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError> {
        self.checked_sub(other).ok_or(RouterError::Underflow(what))
    }

    #[inline]
    fn mul_or(&self, other: &Self, what: &'static str) -> Result<Self, RouterError> {
        self.get()
            .checked_mul(other.get())
            .map(Liquidity::from_u256)
            .ok_or(RouterError::Overflow(what))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, RouterError> {
        self.as_amount()
            .checked_div(&other.as_amount(), rounding)
            .map(Liquidity::from)
            .ok_or(RouterError::DivisionByZero)
    }
}
