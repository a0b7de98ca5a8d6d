//! Rounding direction for integer division.

/// Direction in which an inexact integer quotient is rounded.
///
/// Quotes always round against the trader: outputs round
/// [`Down`](Rounding::Down), required inputs round [`Up`](Rounding::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Towards positive infinity (ceiling).
    Up,
    /// Towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction() {
        assert!(Rounding::Up.is_up());
        assert!(!Rounding::Down.is_up());
    }
}
