//! Absolute call deadline.

use core::fmt;

use crate::error::RouterError;

/// The last timestamp (seconds) at which a call may execute.
///
/// A correctness check only: the router compares it against its clock
/// before touching any balance and fails with
/// [`RouterError::DeadlineExpired`] when `now > deadline`.
///
/// # Examples
///
/// ```
/// use fot_router::domain::Deadline;
///
/// let deadline = Deadline::at(1_700_000_000);
/// assert!(deadline.check(1_700_000_000).is_ok());
/// assert!(deadline.check(1_700_000_001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(u64);

impl Deadline {
    /// A deadline that never expires.
    pub const NEVER: Self = Self(u64::MAX);

    /// Creates a deadline at the given timestamp.
    #[must_use]
    pub const fn at(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Returns the timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.0
    }

    /// Checks that `now` is not past the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DeadlineExpired`] if `now > deadline`.
    pub const fn check(&self, now: u64) -> Result<(), RouterError> {
        if now > self.0 {
            return Err(RouterError::DeadlineExpired);
        }
        Ok(())
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deadline@{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_boundary() {
        assert!(Deadline::at(10).check(10).is_ok());
        assert!(Deadline::at(10).check(9).is_ok());
        assert_eq!(Deadline::at(10).check(11), Err(RouterError::DeadlineExpired));
    }

    #[test]
    fn never_expires() {
        assert!(Deadline::NEVER.check(u64::MAX).is_ok());
    }
}
