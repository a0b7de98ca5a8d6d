//! Liquidity add and remove, with measured fee-on-transfer legs.
//!
//! Shares are always minted against what the pool actually received and
//! minimum bounds are always enforced against actual amounts.  When one
//! leg of a deposit is fee-on-transfer it is sent first, its receipt is
//! measured, and the other leg is re-derived from that receipt, so the
//! pool never holds an unbalanced surplus that would need refunding.

use alloy_primitives::Address;
use tracing::debug;

use super::{Router, Session};
use crate::domain::{Amount, Asset, Deadline, Liquidity};
use crate::error::RouterError;
use crate::ledger::FotAdjuster;
use crate::math::{quote, CheckedArithmetic};
use crate::traits::{Clock, PairRegistry, TokenLedger};

/// Parameters of a token–token deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidity {
    /// First asset.
    pub asset_a: Asset,
    /// Second asset.
    pub asset_b: Asset,
    /// Most of `asset_a` the sender is willing to deposit.
    pub amount_a_desired: Amount,
    /// Most of `asset_b` the sender is willing to deposit.
    pub amount_b_desired: Amount,
    /// Least of `asset_a` the pool must actually receive.
    pub amount_a_min: Amount,
    /// Least of `asset_b` the pool must actually receive.
    pub amount_b_min: Amount,
    /// Fee-on-transfer flags for `[asset_a, asset_b]`.
    pub fot: [bool; 2],
    /// Share recipient.
    pub to: Address,
    /// Call deadline.
    pub deadline: Deadline,
}

impl AddLiquidity {
    /// Deposit with no minimums, no FOT flags and no deadline.
    #[must_use]
    pub const fn new(
        asset_a: Asset,
        asset_b: Asset,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        to: Address,
    ) -> Self {
        Self {
            asset_a,
            asset_b,
            amount_a_desired,
            amount_b_desired,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            fot: [false; 2],
            to,
            deadline: Deadline::NEVER,
        }
    }
}

/// Parameters of a token–native deposit; the native amount is the call
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityEth {
    /// The token paired with the native asset.
    pub token: Asset,
    /// Most of `token` the sender is willing to deposit.
    pub amount_token_desired: Amount,
    /// Least of `token` the pool must actually receive.
    pub amount_token_min: Amount,
    /// Least native value the pool must receive.
    pub amount_eth_min: Amount,
    /// Whether `token` is fee-on-transfer.
    pub is_fot_token: bool,
    /// Share recipient.
    pub to: Address,
    /// Call deadline.
    pub deadline: Deadline,
}

impl AddLiquidityEth {
    /// Deposit with no minimums, no FOT flag and no deadline.
    #[must_use]
    pub const fn new(token: Asset, amount_token_desired: Amount, to: Address) -> Self {
        Self {
            token,
            amount_token_desired,
            amount_token_min: Amount::ZERO,
            amount_eth_min: Amount::ZERO,
            is_fot_token: false,
            to,
            deadline: Deadline::NEVER,
        }
    }
}

/// Parameters of a token–token withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidity {
    /// First asset.
    pub asset_a: Asset,
    /// Second asset.
    pub asset_b: Asset,
    /// Shares to redeem.
    pub liquidity: Liquidity,
    /// Least of `asset_a` that `to` must actually receive.
    pub amount_a_min: Amount,
    /// Least of `asset_b` that `to` must actually receive.
    pub amount_b_min: Amount,
    /// Fee-on-transfer flags for `[asset_a, asset_b]`.
    pub fot: [bool; 2],
    /// Recipient of both assets.
    pub to: Address,
    /// Call deadline.
    pub deadline: Deadline,
}

impl RemoveLiquidity {
    /// Withdrawal with no minimums, no FOT flags and no deadline.
    #[must_use]
    pub const fn new(asset_a: Asset, asset_b: Asset, liquidity: Liquidity, to: Address) -> Self {
        Self {
            asset_a,
            asset_b,
            liquidity,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            fot: [false; 2],
            to,
            deadline: Deadline::NEVER,
        }
    }
}

/// Parameters of a token–native withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityEth {
    /// The token paired with the native asset.
    pub token: Asset,
    /// Shares to redeem.
    pub liquidity: Liquidity,
    /// Least of `token` that `to` must actually receive.
    pub amount_token_min: Amount,
    /// Least native value `to` must receive.
    pub amount_eth_min: Amount,
    /// Whether `token` is fee-on-transfer.
    pub is_fot_token: bool,
    /// Recipient.
    pub to: Address,
    /// Call deadline.
    pub deadline: Deadline,
}

impl RemoveLiquidityEth {
    /// Withdrawal with no minimums, no FOT flag and no deadline.
    #[must_use]
    pub const fn new(token: Asset, liquidity: Liquidity, to: Address) -> Self {
        Self {
            token,
            liquidity,
            amount_token_min: Amount::ZERO,
            amount_eth_min: Amount::ZERO,
            is_fot_token: false,
            to,
            deadline: Deadline::NEVER,
        }
    }
}

/// One side of a deposit.
#[derive(Debug, Clone, Copy)]
struct DepositLeg {
    asset: Asset,
    from: Address,
    desired: Amount,
    min: Amount,
    is_fot: bool,
}

impl<L, R, C> Router<L, R, C>
where
    L: TokenLedger + Clone,
    R: PairRegistry + Clone,
    C: Clock,
{
    /// Deposits into the `(asset_a, asset_b)` pool, creating it if needed.
    ///
    /// Returns `(amount_a, amount_b, liquidity)` where the amounts are what
    /// the pool actually received.
    ///
    /// # Errors
    ///
    /// - [`RouterError::DeadlineExpired`] past the deadline.
    /// - [`RouterError::InsufficientAmountA`] / [`RouterError::InsufficientAmountB`]
    ///   if an actual amount is below its minimum.
    /// - Pool and ledger errors.
    pub fn add_liquidity_supporting_fot_tokens(
        &mut self,
        sender: Address,
        params: &AddLiquidity,
    ) -> Result<(Amount, Amount, Liquidity), RouterError> {
        self.transact(params.deadline, |session| {
            deposit(
                session,
                DepositLeg {
                    asset: params.asset_a,
                    from: sender,
                    desired: params.amount_a_desired,
                    min: params.amount_a_min,
                    is_fot: params.fot[0],
                },
                DepositLeg {
                    asset: params.asset_b,
                    from: sender,
                    desired: params.amount_b_desired,
                    min: params.amount_b_min,
                    is_fot: params.fot[1],
                },
                params.to,
            )
        })
    }

    /// Deposits `params.token` and up to `value` of native currency.
    ///
    /// The full `value` is paid to the router; whatever the deposit does not
    /// use is refunded to `sender`.  Returns `(amount_token, amount_eth,
    /// liquidity)` as actually received by the pool.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InsufficientAmountA`] for the token minimum,
    ///   [`RouterError::InsufficientAmountB`] for the native minimum.
    /// - Otherwise as [`Self::add_liquidity_supporting_fot_tokens`].
    pub fn add_liquidity_eth_supporting_fot_tokens(
        &mut self,
        sender: Address,
        params: &AddLiquidityEth,
        value: Amount,
    ) -> Result<(Amount, Amount, Liquidity), RouterError> {
        self.transact(params.deadline, |session| {
            let native = session.config.wrapped_native();
            let router = session.config.account();
            session.receive_native(sender, value)?;
            let (amount_token, amount_eth, liquidity) = deposit(
                session,
                DepositLeg {
                    asset: params.token,
                    from: sender,
                    desired: params.amount_token_desired,
                    min: params.amount_token_min,
                    is_fot: params.is_fot_token,
                },
                DepositLeg {
                    asset: native,
                    from: router,
                    desired: value,
                    min: params.amount_eth_min,
                    is_fot: false,
                },
                params.to,
            )?;
            let refund = value.sub_or(&amount_eth, "native refund")?;
            session.send_native(sender, refund)?;
            Ok((amount_token, amount_eth, liquidity))
        })
    }

    /// Redeems `params.liquidity` of `sender`'s shares to `params.to`.
    ///
    /// Returns `(amount_a, amount_b)` as actually received by `to`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::PairNotFound`] if the pool does not exist.
    /// - [`RouterError::InsufficientShares`] if `sender` holds too few.
    /// - [`RouterError::InsufficientAmountA`] / [`RouterError::InsufficientAmountB`]
    ///   if an actual amount is below its minimum.
    pub fn remove_liquidity_supporting_fot_tokens(
        &mut self,
        sender: Address,
        params: &RemoveLiquidity,
    ) -> Result<(Amount, Amount), RouterError> {
        self.transact(params.deadline, |session| {
            let (amount_a, amount_b) = withdraw(
                session,
                [params.asset_a, params.asset_b],
                params.fot,
                sender,
                params.liquidity,
                params.to,
            )?;
            check_minimums(amount_a, params.amount_a_min, amount_b, params.amount_b_min)?;
            Ok((amount_a, amount_b))
        })
    }

    /// Redeems shares of the `(token, native)` pool; the token goes to
    /// `params.to` via the router, the native value is sent after it.
    ///
    /// Returns `(amount_token, amount_eth)` as actually received by `to`.
    /// A fee-on-transfer token is taxed twice on this route (pool to
    /// router, router to recipient); both are measured.
    ///
    /// # Errors
    ///
    /// As [`Self::remove_liquidity_supporting_fot_tokens`].
    pub fn remove_liquidity_eth_supporting_fot_tokens(
        &mut self,
        sender: Address,
        params: &RemoveLiquidityEth,
    ) -> Result<(Amount, Amount), RouterError> {
        self.transact(params.deadline, |session| {
            let native = session.config.wrapped_native();
            let router = session.config.account();
            let (token_at_router, amount_eth) = withdraw(
                session,
                [params.token, native],
                [params.is_fot_token, false],
                sender,
                params.liquidity,
                router,
            )?;
            let amount_token = FotAdjuster::transfer(
                &mut session.ledger,
                params.token,
                router,
                params.to,
                token_at_router,
                params.is_fot_token,
            )?;
            session.send_native(params.to, amount_eth)?;
            check_minimums(
                amount_token,
                params.amount_token_min,
                amount_eth,
                params.amount_eth_min,
            )?;
            Ok((amount_token, amount_eth))
        })
    }
}

/// Deposit amounts at the current reserve ratio, bounded by the desired
/// amounts; an empty pool takes the desired amounts as given.
///
/// # Errors
///
/// [`RouterError::InsufficientAmountA`] / [`RouterError::InsufficientAmountB`]
/// if the ratio pushes a side below its minimum.
pub(crate) fn optimal_amounts(
    desired: (Amount, Amount),
    min: (Amount, Amount),
    reserves: (Amount, Amount),
) -> Result<(Amount, Amount), RouterError> {
    if reserves.0.is_zero() && reserves.1.is_zero() {
        return Ok(desired);
    }
    let b_optimal = quote(desired.0, reserves.0, reserves.1)?;
    if b_optimal <= desired.1 {
        if b_optimal < min.1 {
            return Err(RouterError::InsufficientAmountB);
        }
        return Ok((desired.0, b_optimal));
    }
    let a_optimal = quote(desired.1, reserves.1, reserves.0)?;
    if a_optimal > desired.0 {
        return Err(RouterError::InsufficientAmountA);
    }
    if a_optimal < min.0 {
        return Err(RouterError::InsufficientAmountA);
    }
    Ok((a_optimal, desired.1))
}

fn deposit<L, R>(
    session: &mut Session<L, R>,
    a: DepositLeg,
    b: DepositLeg,
    to: Address,
) -> Result<(Amount, Amount, Liquidity), RouterError>
where
    L: TokenLedger,
    R: PairRegistry,
{
    if session.registry.get_pair(a.asset, b.asset).is_none() {
        session.registry.create_pair(a.asset, b.asset)?;
    }
    let pool = session
        .registry
        .pool_mut(a.asset, b.asset)
        .ok_or(RouterError::PairNotFound)?;
    let pool_address = pool.address();
    let reserves = pool.reserves_for(a.asset)?;
    let (amount_a, amount_b) =
        optimal_amounts((a.desired, b.desired), (a.min, b.min), reserves)?;

    let ledger = &mut session.ledger;
    let empty = reserves.0.is_zero() && reserves.1.is_zero();
    let (actual_a, actual_b) = if empty || (!a.is_fot && !b.is_fot) {
        let actual_a = send_leg(ledger, a, pool_address, amount_a)?;
        (actual_a, send_leg(ledger, b, pool_address, amount_b)?)
    } else if b.is_fot && !a.is_fot {
        let actual_b = send_leg(ledger, b, pool_address, amount_b)?;
        let needed_a = quote(actual_b, reserves.1, reserves.0)?;
        (send_leg(ledger, a, pool_address, needed_a)?, actual_b)
    } else {
        let actual_a = send_leg(ledger, a, pool_address, amount_a)?;
        let needed_b = quote(actual_a, reserves.0, reserves.1)?;
        (actual_a, send_leg(ledger, b, pool_address, needed_b)?)
    };
    check_minimums(actual_a, a.min, actual_b, b.min)?;

    let (mint_a, mint_b) = if pool.pair().is_first(&a.asset) {
        (actual_a, actual_b)
    } else {
        (actual_b, actual_a)
    };
    let liquidity = pool.mint(&session.ledger, mint_a, mint_b, to)?;
    debug!(
        asset_a = %a.asset,
        asset_b = %b.asset,
        %actual_a,
        %actual_b,
        %liquidity,
        "liquidity added"
    );
    Ok((actual_a, actual_b, liquidity))
}

fn send_leg<L: TokenLedger>(
    ledger: &mut L,
    leg: DepositLeg,
    pool: Address,
    amount: Amount,
) -> Result<Amount, RouterError> {
    FotAdjuster::transfer(ledger, leg.asset, leg.from, pool, amount, leg.is_fot)
}

/// Burns `shares` of `holder` to `to` and returns what `to` received of
/// `assets[0]` and `assets[1]`.
fn withdraw<L, R>(
    session: &mut Session<L, R>,
    assets: [Asset; 2],
    fot: [bool; 2],
    holder: Address,
    shares: Liquidity,
    to: Address,
) -> Result<(Amount, Amount), RouterError>
where
    L: TokenLedger,
    R: PairRegistry,
{
    let pool = session
        .registry
        .pool_mut(assets[0], assets[1])
        .ok_or(RouterError::PairNotFound)?;
    let pending_a = fot[0].then(|| FotAdjuster::begin(&session.ledger, assets[0], to));
    let pending_b = fot[1].then(|| FotAdjuster::begin(&session.ledger, assets[1], to));

    let (first, second) = pool.burn(&mut session.ledger, holder, shares, to)?;
    let (nominal_a, nominal_b) = if pool.pair().is_first(&assets[0]) {
        (first, second)
    } else {
        (second, first)
    };
    let actual_a = match pending_a {
        Some(pending) => pending.finish(&session.ledger)?,
        None => nominal_a,
    };
    let actual_b = match pending_b {
        Some(pending) => pending.finish(&session.ledger)?,
        None => nominal_b,
    };
    debug!(%holder, %shares, %actual_a, %actual_b, "liquidity removed");
    Ok((actual_a, actual_b))
}

fn check_minimums(
    amount_a: Amount,
    min_a: Amount,
    amount_b: Amount,
    min_b: Amount,
) -> Result<(), RouterError> {
    if amount_a < min_a {
        return Err(RouterError::InsufficientAmountA);
    }
    if amount_b < min_b {
        return Err(RouterError::InsufficientAmountB);
    }
    Ok(())
}
