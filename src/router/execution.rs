//! Step-by-step multi-hop swap interpreter.
//!
//! ```text
//! Quoting ─▶ Executing { hop: 0 } ─▶ … ─▶ Executing { hop: n-1 } ─▶ Settled
//!    └─────────────── any error ───────────────────────▶ Reverted
//! ```
//!
//! Each hop quotes on what its pool actually received.  For a
//! fee-on-transfer input that is the measured receipt, so a short
//! delivery is absorbed by requoting instead of tripping the pool's
//! invariant check.

use alloy_primitives::Address;
use tracing::{debug, warn};

use super::Session;
use crate::domain::{Amount, AmountsOut, Asset, SwapPath};
use crate::error::RouterError;
use crate::ledger::FotAdjuster;
use crate::math::{quote_amount_in, quote_amount_out};
use crate::pools::ReservePool;
use crate::traits::{PairRegistry, TokenLedger};

/// Where a swap call is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Resolving pools and computing amounts.
    Quoting,
    /// Executing hop `hop` (zero-based) of `of`.
    Executing {
        /// Current hop.
        hop: usize,
        /// Total hops.
        of: usize,
    },
    /// All hops executed.
    Settled,
    /// Aborted; the caller discards every change.
    Reverted,
}

/// FOT-corrected plan of an exact-out swap.
///
/// `amounts[i]` is the nominal amount sent on leg `i` (leg 0 from the
/// sender, leg `i + 1` paid out by pool `i`); `pool_inputs[i]` is what pool
/// `i` must receive after any transfer tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExactOutPlan {
    pub(crate) amounts: Vec<Amount>,
    pub(crate) pool_inputs: Vec<Amount>,
}

impl ExactOutPlan {
    pub(crate) fn amount_in(&self) -> Amount {
        self.amounts.first().copied().unwrap_or(Amount::ZERO)
    }
}

/// Interpreter for one swap call over one path.
#[derive(Debug)]
pub(crate) struct SwapExecution<'p> {
    path: &'p SwapPath,
    state: ExecutionState,
}

impl<'p> SwapExecution<'p> {
    pub(crate) fn new(path: &'p SwapPath) -> Self {
        Self {
            path,
            state: ExecutionState::Quoting,
        }
    }

    pub(crate) const fn state(&self) -> ExecutionState {
        self.state
    }

    fn transition(&mut self, next: ExecutionState) {
        debug!(from = ?self.state, to = ?next, "swap state");
        self.state = next;
    }

    fn settle<T>(&mut self, result: Result<T, RouterError>) -> Result<T, RouterError> {
        match result {
            Ok(value) => {
                self.transition(ExecutionState::Settled);
                Ok(value)
            }
            Err(error) => {
                warn!(at = ?self.state, %error, "swap reverted");
                self.state = ExecutionState::Reverted;
                Err(error)
            }
        }
    }

    /// Sells exactly `amount_in` of the first asset along the path.
    pub(crate) fn exact_in<L, R>(
        &mut self,
        session: &mut Session<L, R>,
        sender: Address,
        amount_in: Amount,
        to: Address,
    ) -> Result<AmountsOut, RouterError>
    where
        L: TokenLedger,
        R: PairRegistry,
    {
        let result = self.run_exact_in(session, sender, amount_in, to);
        self.settle(result)
    }

    fn run_exact_in<L, R>(
        &mut self,
        session: &mut Session<L, R>,
        sender: Address,
        amount_in: Amount,
        to: Address,
    ) -> Result<AmountsOut, RouterError>
    where
        L: TokenLedger,
        R: PairRegistry,
    {
        if amount_in.is_zero() {
            return Err(RouterError::InsufficientInputAmount);
        }
        let path = self.path;
        let pools = resolve_pools(&session.registry, path)?;
        let hops = path.hop_count();

        let mut amounts = Vec::with_capacity(hops + 1);
        let mut pool_inputs = Vec::with_capacity(hops);
        amounts.push(amount_in);

        let mut received = FotAdjuster::transfer(
            &mut session.ledger,
            path.first(),
            sender,
            pools[0],
            amount_in,
            path.is_fot(0),
        )?;

        for (hop, (input, output)) in path.hops().enumerate() {
            self.transition(ExecutionState::Executing { hop, of: hops });
            let pool = pool_mut(&mut session.registry, input, output)?;
            let (reserve_in, reserve_out) = pool.reserves_for(input)?;
            let amount_out = quote_amount_out(received, reserve_in, reserve_out, pool.fee_tier())?;
            pool_inputs.push(received);
            amounts.push(amount_out);

            let recipient = pools.get(hop + 1).copied().unwrap_or(to);
            received = pay_out(
                &mut session.ledger,
                pool,
                output,
                amount_out,
                recipient,
                path.is_fot(hop + 1),
            )?;
        }
        Ok(AmountsOut::new(amounts, pool_inputs, received))
    }

    /// Computes the FOT-corrected inputs for `amount_out` to reach `to`.
    ///
    /// Right to left: the last payout is grossed up so that `to` nets
    /// `amount_out`; each hop's required input comes from the inverse
    /// quote; each flagged input leg is grossed up so its pool nets that
    /// input.  Only scratch copies of the ledger are touched.
    pub(crate) fn plan_exact_out<L, R>(
        &self,
        session: &Session<L, R>,
        sender: Address,
        amount_out: Amount,
        to: Address,
    ) -> Result<ExactOutPlan, RouterError>
    where
        L: TokenLedger + Clone,
        R: PairRegistry,
    {
        if amount_out.is_zero() {
            return Err(RouterError::InsufficientOutputAmount);
        }
        let pools = resolve_pools(&session.registry, self.path)?;
        let hops = self.path.hop_count();
        let mut amounts = vec![Amount::ZERO; hops + 1];
        let mut pool_inputs = vec![Amount::ZERO; hops];

        amounts[hops] = if self.path.is_fot(hops) {
            gross_up_payout(session, self.path.last(), pools[hops - 1], to, amount_out)?
        } else {
            amount_out
        };

        for hop in (0..hops).rev() {
            let input = self.path.asset(hop);
            let output = self.path.asset(hop + 1);
            let pool = pool_ref(&session.registry, input, output)?;
            let (reserve_in, reserve_out) = pool.reserves_for(input)?;
            let required =
                quote_amount_in(amounts[hop + 1], reserve_in, reserve_out, pool.fee_tier())?;
            pool_inputs[hop] = required;

            amounts[hop] = match (self.path.is_fot(hop), hop) {
                (false, _) => required,
                (true, 0) => FotAdjuster::gross_up(
                    &session.ledger,
                    input,
                    sender,
                    pools[0],
                    required,
                )?,
                (true, _) => gross_up_payout(session, input, pools[hop - 1], pools[hop], required)?,
            };
        }
        Ok(ExactOutPlan {
            amounts,
            pool_inputs,
        })
    }

    /// Executes `plan` left to right and returns what `to` received.
    ///
    /// A hop pays out its planned amount unless its pool received less than
    /// planned, in which case it pays the smaller of the plan and a fresh
    /// quote on the actual receipt.
    pub(crate) fn exact_out<L, R>(
        &mut self,
        session: &mut Session<L, R>,
        sender: Address,
        plan: &ExactOutPlan,
        to: Address,
    ) -> Result<Amount, RouterError>
    where
        L: TokenLedger,
        R: PairRegistry,
    {
        let result = self.run_exact_out(session, sender, plan, to);
        self.settle(result)
    }

    fn run_exact_out<L, R>(
        &mut self,
        session: &mut Session<L, R>,
        sender: Address,
        plan: &ExactOutPlan,
        to: Address,
    ) -> Result<Amount, RouterError>
    where
        L: TokenLedger,
        R: PairRegistry,
    {
        let path = self.path;
        let pools = resolve_pools(&session.registry, path)?;
        let hops = path.hop_count();
        if plan.amounts.len() != hops + 1 || plan.pool_inputs.len() != hops {
            return Err(RouterError::InvalidPath("plan does not match path"));
        }

        let mut received = FotAdjuster::transfer(
            &mut session.ledger,
            path.first(),
            sender,
            pools[0],
            plan.amount_in(),
            path.is_fot(0),
        )?;

        for (hop, (input, output)) in path.hops().enumerate() {
            self.transition(ExecutionState::Executing { hop, of: hops });
            let pool = pool_mut(&mut session.registry, input, output)?;
            let planned = plan.amounts[hop + 1];
            let amount_out = if received < plan.pool_inputs[hop] {
                let (reserve_in, reserve_out) = pool.reserves_for(input)?;
                let requoted =
                    quote_amount_out(received, reserve_in, reserve_out, pool.fee_tier())?;
                debug!(hop, %planned, %requoted, "input under-delivered, requoting");
                planned.min(requoted)
            } else {
                planned
            };

            let recipient = pools.get(hop + 1).copied().unwrap_or(to);
            received = pay_out(
                &mut session.ledger,
                pool,
                output,
                amount_out,
                recipient,
                path.is_fot(hop + 1),
            )?;
        }
        Ok(received)
    }
}

/// Resolves the pool account of every hop.
fn resolve_pools<R: PairRegistry>(
    registry: &R,
    path: &SwapPath,
) -> Result<Vec<Address>, RouterError> {
    path.hops()
        .map(|(input, output)| {
            registry
                .get_pair(input, output)
                .ok_or(RouterError::PairNotFound)
        })
        .collect()
}

fn pool_ref<R: PairRegistry>(
    registry: &R,
    a: Asset,
    b: Asset,
) -> Result<&ReservePool, RouterError> {
    registry.pool(a, b).ok_or(RouterError::PairNotFound)
}

fn pool_mut<R: PairRegistry>(
    registry: &mut R,
    a: Asset,
    b: Asset,
) -> Result<&mut ReservePool, RouterError> {
    registry.pool_mut(a, b).ok_or(RouterError::PairNotFound)
}

/// Swaps `amount_out` of `output` out of `pool` to `recipient` and returns
/// what the recipient received.
fn pay_out<L: TokenLedger>(
    ledger: &mut L,
    pool: &mut ReservePool,
    output: Asset,
    amount_out: Amount,
    recipient: Address,
    is_fot: bool,
) -> Result<Amount, RouterError> {
    let (a_out, b_out) = if pool.pair().is_first(&output) {
        (amount_out, Amount::ZERO)
    } else {
        (Amount::ZERO, amount_out)
    };
    if !is_fot {
        pool.swap(ledger, a_out, b_out, recipient)?;
        return Ok(amount_out);
    }
    let pending = FotAdjuster::begin(ledger, output, recipient);
    pool.swap(ledger, a_out, b_out, recipient)?;
    pending.finish(ledger)
}

/// Grosses up a pool payout; a pool that cannot afford the gross amount
/// lacks liquidity rather than balance.
fn gross_up_payout<L, R>(
    session: &Session<L, R>,
    asset: Asset,
    pool: Address,
    to: Address,
    needed: Amount,
) -> Result<Amount, RouterError>
where
    L: TokenLedger + Clone,
{
    FotAdjuster::gross_up(&session.ledger, asset, pool, to, needed).map_err(|e| match e {
        RouterError::InsufficientBalance => RouterError::InsufficientLiquidity,
        other => other,
    })
}
