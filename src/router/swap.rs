//! Swap entry points.
//!
//! Exact-in swaps check the minimum against what the recipient actually
//! received; exact-out swaps check the maximum against the FOT-corrected
//! input.  The `*_eth_*` variants wrap the native currency at the path's
//! start or unwrap it at the path's end through the router's account.

use alloy_primitives::Address;
use tracing::debug;

use super::execution::SwapExecution;
use super::{Router, Session};
use crate::domain::{Amount, Deadline, SwapPath};
use crate::error::RouterError;
use crate::traits::{Clock, PairRegistry, TokenLedger};

impl<L, R, C> Router<L, R, C>
where
    L: TokenLedger + Clone,
    R: PairRegistry + Clone,
    C: Clock,
{
    /// Sells exactly `amount_in` along `path` and returns what `to`
    /// actually received.
    ///
    /// # Errors
    ///
    /// - [`RouterError::DeadlineExpired`] past `deadline`.
    /// - [`RouterError::PairNotFound`] if a hop has no pool.
    /// - [`RouterError::InsufficientOutputAmount`] if `to` received less
    ///   than `amount_out_min`.
    /// - Any ledger or pool error of the hops.
    pub fn swap_exact_tokens_for_tokens_supporting_fot_tokens(
        &mut self,
        sender: Address,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &SwapPath,
        to: Address,
        deadline: Deadline,
    ) -> Result<Amount, RouterError> {
        self.transact(deadline, |session| {
            sell_exact(session, path, sender, amount_in, amount_out_min, to)
        })
    }

    /// Buys exactly `amount_out` of the last asset of `path` for `to` and
    /// returns the amount the sender paid.
    ///
    /// # Errors
    ///
    /// - [`RouterError::ExcessiveInputAmount`] if the corrected input
    ///   exceeds `amount_in_max`.
    /// - [`RouterError::InsufficientOutputAmount`] if `to` ends up with
    ///   less than `amount_out`.
    /// - As [`Self::swap_exact_tokens_for_tokens_supporting_fot_tokens`].
    pub fn swap_tokens_for_exact_tokens_supporting_fot_tokens(
        &mut self,
        sender: Address,
        amount_out: Amount,
        amount_in_max: Amount,
        path: &SwapPath,
        to: Address,
        deadline: Deadline,
    ) -> Result<Amount, RouterError> {
        self.transact(deadline, |session| {
            buy_exact(session, path, sender, amount_out, amount_in_max, to)
        })
    }

    /// Sells exactly `value` of the native currency along `path`, which
    /// must start with the wrapped native asset.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] if `path` does not start with the
    /// native asset; otherwise as
    /// [`Self::swap_exact_tokens_for_tokens_supporting_fot_tokens`].
    pub fn swap_exact_eth_for_tokens_supporting_fot_tokens(
        &mut self,
        sender: Address,
        value: Amount,
        amount_out_min: Amount,
        path: &SwapPath,
        to: Address,
        deadline: Deadline,
    ) -> Result<Amount, RouterError> {
        self.transact(deadline, |session| {
            require_native_start(session, path)?;
            session.receive_native(sender, value)?;
            let router = session.config.account();
            sell_exact(session, path, router, value, amount_out_min, to)
        })
    }

    /// Sells exactly `amount_in` along `path`, which must end with the
    /// wrapped native asset, and pays the proceeds to `to` as native
    /// currency.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] if `path` does not end with the native
    /// asset; otherwise as
    /// [`Self::swap_exact_tokens_for_tokens_supporting_fot_tokens`].
    pub fn swap_exact_tokens_for_eth_supporting_fot_tokens(
        &mut self,
        sender: Address,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &SwapPath,
        to: Address,
        deadline: Deadline,
    ) -> Result<Amount, RouterError> {
        self.transact(deadline, |session| {
            require_native_end(session, path)?;
            let router = session.config.account();
            let out = sell_exact(session, path, sender, amount_in, amount_out_min, router)?;
            session.send_native(to, out)?;
            Ok(out)
        })
    }

    /// Buys exactly `amount_out` for `to` with native currency, refunding
    /// whatever part of `value` was not needed.  Returns the amount spent.
    ///
    /// # Errors
    ///
    /// [`RouterError::ExcessiveInputAmount`] if the corrected input exceeds
    /// `value`; otherwise as
    /// [`Self::swap_tokens_for_exact_tokens_supporting_fot_tokens`].
    pub fn swap_eth_for_exact_tokens_supporting_fot_tokens(
        &mut self,
        sender: Address,
        value: Amount,
        amount_out: Amount,
        path: &SwapPath,
        to: Address,
        deadline: Deadline,
    ) -> Result<Amount, RouterError> {
        self.transact(deadline, |session| {
            require_native_start(session, path)?;
            session.receive_native(sender, value)?;
            let router = session.config.account();
            let spent = buy_exact(session, path, router, amount_out, value, to)?;
            session.send_native(sender, value.saturating_sub(&spent))?;
            Ok(spent)
        })
    }

    /// Buys exactly `amount_out` of native currency for `to`.  Returns the
    /// amount spent.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] if `path` does not end with the native
    /// asset; otherwise as
    /// [`Self::swap_tokens_for_exact_tokens_supporting_fot_tokens`].
    pub fn swap_tokens_for_exact_eth_supporting_fot_tokens(
        &mut self,
        sender: Address,
        amount_out: Amount,
        amount_in_max: Amount,
        path: &SwapPath,
        to: Address,
        deadline: Deadline,
    ) -> Result<Amount, RouterError> {
        self.transact(deadline, |session| {
            require_native_end(session, path)?;
            let router = session.config.account();
            let before = session.ledger.balance_of(path.last(), router);
            let spent = buy_exact(session, path, sender, amount_out, amount_in_max, router)?;
            let received = session
                .ledger
                .balance_of(path.last(), router)
                .saturating_sub(&before);
            session.send_native(to, received)?;
            Ok(spent)
        })
    }
}

fn sell_exact<L, R>(
    session: &mut Session<L, R>,
    path: &SwapPath,
    sender: Address,
    amount_in: Amount,
    amount_out_min: Amount,
    to: Address,
) -> Result<Amount, RouterError>
where
    L: TokenLedger,
    R: PairRegistry,
{
    let mut exec = SwapExecution::new(path);
    let amounts = exec.exact_in(session, sender, amount_in, to)?;
    let out = amounts.actual_amount_out();
    debug!(
        state = ?exec.state(),
        %amount_in,
        nominal_out = %amounts.nominal_amount_out(),
        actual_out = %out,
        "exact-in swap"
    );
    if out < amount_out_min {
        return Err(RouterError::InsufficientOutputAmount);
    }
    Ok(out)
}

fn buy_exact<L, R>(
    session: &mut Session<L, R>,
    path: &SwapPath,
    sender: Address,
    amount_out: Amount,
    amount_in_max: Amount,
    to: Address,
) -> Result<Amount, RouterError>
where
    L: TokenLedger + Clone,
    R: PairRegistry,
{
    let mut exec = SwapExecution::new(path);
    let plan = exec.plan_exact_out(session, sender, amount_out, to)?;
    let amount_in = plan.amount_in();
    if amount_in > amount_in_max {
        return Err(RouterError::ExcessiveInputAmount);
    }
    let received = exec.exact_out(session, sender, &plan, to)?;
    debug!(state = ?exec.state(), %amount_in, %amount_out, %received, "exact-out swap");
    if received < amount_out {
        return Err(RouterError::InsufficientOutputAmount);
    }
    Ok(amount_in)
}

fn require_native_start<L, R>(session: &Session<L, R>, path: &SwapPath) -> Result<(), RouterError> {
    if path.first() != session.config.wrapped_native() || path.is_fot(0) {
        return Err(RouterError::InvalidPath("path must start with the native asset"));
    }
    Ok(())
}

fn require_native_end<L, R>(session: &Session<L, R>, path: &SwapPath) -> Result<(), RouterError> {
    if path.last() != session.config.wrapped_native() || path.is_fot(path.hop_count()) {
        return Err(RouterError::InvalidPath("path must end with the native asset"));
    }
    Ok(())
}
