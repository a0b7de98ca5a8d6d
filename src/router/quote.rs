//! Read-only multi-hop quotes.
//!
//! Both quotes simulate the swap on a throw-away copy of the state, so a
//! quote for a given sender and recipient is exactly what the swap would
//! do if called next.

use alloy_primitives::Address;

use super::execution::SwapExecution;
use super::Router;
use crate::domain::{Amount, AmountsIn, AmountsOut, SwapPath};
use crate::error::RouterError;
use crate::traits::{Clock, PairRegistry, TokenLedger};

impl<L, R, C> Router<L, R, C>
where
    L: TokenLedger + Clone,
    R: PairRegistry + Clone,
    C: Clock,
{
    /// Simulates selling `amount_in` from `sender` along `path` to
    /// `recipient`.
    ///
    /// Every hop is quoted on what its pool would actually receive, and the
    /// result carries what `recipient` would actually receive.
    ///
    /// # Errors
    ///
    /// The error the swap itself would fail with, e.g.
    /// [`RouterError::PairNotFound`] or
    /// [`RouterError::InsufficientBalance`].
    pub fn get_amounts_out(
        &self,
        amount_in: Amount,
        path: &SwapPath,
        sender: Address,
        recipient: Address,
    ) -> Result<AmountsOut, RouterError> {
        let mut session = self.session();
        SwapExecution::new(path).exact_in(&mut session, sender, amount_in, recipient)
    }

    /// FOT-corrected inputs for `recipient` to receive `amount_out` along
    /// `path`.
    ///
    /// # Errors
    ///
    /// [`RouterError::PairNotFound`] for a missing pool,
    /// [`RouterError::InsufficientLiquidity`] if a pool cannot pay the
    /// grossed-up amount, or [`RouterError::ExcessiveInputAmount`] if a
    /// tax leaves nothing to gross up against.
    pub fn get_amounts_in_supporting_fot_tokens(
        &self,
        amount_out: Amount,
        path: &SwapPath,
        sender: Address,
        recipient: Address,
    ) -> Result<AmountsIn, RouterError> {
        let session = self.session();
        let plan =
            SwapExecution::new(path).plan_exact_out(&session, sender, amount_out, recipient)?;
        Ok(AmountsIn::new(plan.amounts))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Asset, Deadline, FeeTier};
    use crate::math::quote_amount_out;
    use crate::router::tests::{router, seed, ALICE, BOB, DAI, FOT, TKN, WETH};

    fn path(assets: Vec<Asset>, fot: Vec<bool>) -> SwapPath {
        let Ok(path) = SwapPath::new(assets, fot) else {
            panic!("valid path");
        };
        path
    }

    #[test]
    fn plain_quote_matches_formula() {
        let mut r = router();
        seed(&mut r, TKN, 1_000_000, DAI, 1_000_000);
        let Ok(q) = r.get_amounts_out(
            Amount::new(10_000),
            &path(vec![TKN, DAI], vec![false, false]),
            ALICE,
            BOB,
        ) else {
            panic!("expected Ok");
        };
        let Ok(expected) = quote_amount_out(
            Amount::new(10_000),
            Amount::new(1_000_000),
            Amount::new(1_000_000),
            FeeTier::default(),
        ) else {
            panic!("quotable");
        };
        assert_eq!(q.amounts(), &[Amount::new(10_000), expected]);
        assert_eq!(q.actual_amount_out(), expected);
    }

    #[test]
    fn quote_leaves_state_untouched() {
        let mut r = router();
        seed(&mut r, TKN, 1_000_000, FOT, 1_000_000);
        let before = (r.ledger().clone(), r.registry().clone());
        let Ok(_) = r.get_amounts_out(
            Amount::new(10_000),
            &path(vec![TKN, FOT], vec![false, true]),
            ALICE,
            BOB,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!((r.ledger().clone(), r.registry().clone()), before);
    }

    #[test]
    fn exact_in_quote_equals_execution() {
        let mut r = router();
        seed(&mut r, TKN, 1_000_000, FOT, 1_000_000);
        seed(&mut r, FOT, 1_000_000, WETH, 1_000_000);
        let p = path(vec![TKN, FOT, WETH], vec![false, true, false]);
        let Ok(q) = r.get_amounts_out(Amount::new(25_000), &p, ALICE, BOB) else {
            panic!("expected Ok");
        };
        let Ok(out) = r.swap_exact_tokens_for_tokens_supporting_fot_tokens(
            ALICE,
            Amount::new(25_000),
            q.actual_amount_out(),
            &p,
            BOB,
            Deadline::NEVER,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out, q.actual_amount_out());
    }

    #[test]
    fn taxed_output_quote_reports_actual_receipt() {
        let mut r = router();
        seed(&mut r, TKN, 1_000_000, FOT, 1_000_000);
        let Ok(q) = r.get_amounts_out(
            Amount::new(10_000),
            &path(vec![TKN, FOT], vec![false, true]),
            ALICE,
            BOB,
        ) else {
            panic!("expected Ok");
        };
        let nominal = q.nominal_amount_out().get().to::<u128>();
        assert_eq!(q.actual_amount_out(), Amount::new(nominal - nominal / 10));
    }

    #[test]
    fn exact_out_quote_equals_execution() {
        let mut r = router();
        seed(&mut r, FOT, 1_000_000, TKN, 1_000_000);
        let p = path(vec![FOT, TKN], vec![true, false]);
        let Ok(q) = r.get_amounts_in_supporting_fot_tokens(Amount::new(2_000), &p, ALICE, BOB)
        else {
            panic!("expected Ok");
        };
        let Ok(spent) = r.swap_tokens_for_exact_tokens_supporting_fot_tokens(
            ALICE,
            Amount::new(2_000),
            q.actual_amount_in(),
            &p,
            BOB,
            Deadline::NEVER,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(spent, q.actual_amount_in());
        assert_eq!(q.amounts()[1], Amount::new(2_000));
    }

    #[test]
    fn exact_out_quote_needs_pools() {
        let r = router();
        assert_eq!(
            r.get_amounts_in_supporting_fot_tokens(
                Amount::new(1),
                &path(vec![TKN, DAI], vec![false, false]),
                ALICE,
                BOB,
            ),
            Err(RouterError::PairNotFound)
        );
    }

    #[test]
    fn exact_out_beyond_reserves_rejected() {
        let mut r = router();
        seed(&mut r, TKN, 1_000_000, DAI, 1_000_000);
        assert_eq!(
            r.get_amounts_in_supporting_fot_tokens(
                Amount::new(1_000_000),
                &path(vec![TKN, DAI], vec![false, false]),
                ALICE,
                BOB,
            ),
            Err(RouterError::InsufficientLiquidity)
        );
    }

    #[test]
    fn zero_amounts_rejected() {
        let mut r = router();
        seed(&mut r, TKN, 1_000_000, DAI, 1_000_000);
        let p = path(vec![TKN, DAI], vec![false, false]);
        assert_eq!(
            r.get_amounts_out(Amount::ZERO, &p, ALICE, BOB),
            Err(RouterError::InsufficientInputAmount)
        );
        assert_eq!(
            r.get_amounts_in_supporting_fot_tokens(Amount::ZERO, &p, ALICE, BOB),
            Err(RouterError::InsufficientOutputAmount)
        );
    }
}
