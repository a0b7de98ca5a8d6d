//! Results of the read-only multi-hop quotes.

use super::Amount;

/// Result of an exact-in quote.
///
/// - `amounts[0]` is the amount the sender sends; `amounts[i + 1]` is the
///   nominal amount the pool of hop `i` pays out.
/// - `pool_inputs[i]` is what the pool of hop `i` actually received after
///   any transfer tax, and is the value hop `i` was quoted on.
/// - `actual_amount_out` is what the recipient actually received.  It is
///   the binding value for the minimum-out check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmountsOut {
    amounts: Vec<Amount>,
    pool_inputs: Vec<Amount>,
    actual_amount_out: Amount,
}

impl AmountsOut {
    pub(crate) fn new(
        amounts: Vec<Amount>,
        pool_inputs: Vec<Amount>,
        actual_amount_out: Amount,
    ) -> Self {
        Self {
            amounts,
            pool_inputs,
            actual_amount_out,
        }
    }

    /// Nominal per-hop amounts, starting with the amount sent.
    #[must_use]
    pub fn amounts(&self) -> &[Amount] {
        &self.amounts
    }

    /// Actual amount each pool received.
    #[must_use]
    pub fn pool_inputs(&self) -> &[Amount] {
        &self.pool_inputs
    }

    /// Actual amount received by the final recipient.
    pub fn actual_amount_out(&self) -> Amount {
        self.actual_amount_out
    }

    /// Nominal amount paid out by the last pool.
    pub fn nominal_amount_out(&self) -> Amount {
        self.amounts.last().copied().unwrap_or(Amount::ZERO)
    }
}

/// Result of an exact-out quote.
///
/// `amounts[i]` is the nominal amount that must be sent on leg `i` so that
/// every receiver, after any transfer tax, gets what the next hop needs:
/// `amounts[0]` comes from the sender, `amounts[i + 1]` is paid out by the
/// pool of hop `i`.  `actual_amount_in` is the FOT-corrected input the
/// sender must provide, the binding value for the maximum-in check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmountsIn {
    amounts: Vec<Amount>,
    actual_amount_in: Amount,
}

impl AmountsIn {
    pub(crate) fn new(amounts: Vec<Amount>) -> Self {
        let actual_amount_in = amounts.first().copied().unwrap_or(Amount::ZERO);
        Self {
            amounts,
            actual_amount_in,
        }
    }

    /// Nominal amount to send on each leg, starting with the sender's.
    #[must_use]
    pub fn amounts(&self) -> &[Amount] {
        &self.amounts
    }

    /// Amount the sender must send.
    pub fn actual_amount_in(&self) -> Amount {
        self.actual_amount_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_out_accessors() {
        let q = AmountsOut::new(
            vec![Amount::new(100), Amount::new(90)],
            vec![Amount::new(100)],
            Amount::new(81),
        );
        assert_eq!(q.nominal_amount_out(), Amount::new(90));
        assert_eq!(q.actual_amount_out(), Amount::new(81));
        assert_eq!(q.pool_inputs(), &[Amount::new(100)]);
    }

    #[test]
    fn amounts_in_takes_first_leg() {
        let q = AmountsIn::new(vec![Amount::new(112), Amount::new(100)]);
        assert_eq!(q.actual_amount_in(), Amount::new(112));
        assert_eq!(q.amounts().len(), 2);
    }
}
