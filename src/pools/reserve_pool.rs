//! Two-asset constant-product reserve pool (Uniswap V2 pair style).
//!
//! The pool owns an account in the [`TokenLedger`] and tracks its last
//! known balances as reserves.  Swaps are balance-driven: the caller
//! transfers input into the pool account first, the pool pays out, reads
//! its real balances, and derives what came in.  This is what makes the
//! pool safe for fee-on-transfer assets: it never trusts a nominal input.
//!
//! # Swap check
//!
//! With `in_x = balance_x − (reserve_x − out_x)` and the fee in basis
//! points:
//!
//! ```text
//! (balance_a·10⁴ − in_a·fee) · (balance_b·10⁴ − in_b·fee) ≥ reserve_a · reserve_b · 10⁸
//! ```
//!
//! # Shares
//!
//! The first mint issues `√(a·b) − minimum_liquidity` shares and locks
//! `minimum_liquidity` at the zero address; later mints issue
//! `min(a·S/Ra, b·S/Rb)`.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use tracing::{debug, trace};

use crate::config::PoolConfig;
use crate::domain::{Amount, Asset, AssetPair, BasisPoints, FeeTier, Liquidity, Rounding};
use crate::error::RouterError;
use crate::math::{isqrt, CheckedArithmetic};
use crate::traits::TokenLedger;

/// Largest reserve a pool may hold (`2¹¹² − 1`).
pub const MAX_RESERVE: Amount =
    Amount::from_u256(U256::from_limbs([u64::MAX, 0xFFFF_FFFF_FFFF, 0, 0]));

/// A constant-product pool over one canonical asset pair.
///
/// Amount arguments and results are ordered as the pair: `a` is
/// [`AssetPair::first`], `b` is [`AssetPair::second`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservePool {
    pair: AssetPair,
    address: Address,
    fee_tier: FeeTier,
    minimum_liquidity: Liquidity,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Liquidity,
    shares: BTreeMap<Address, Liquidity>,
    k_last: Amount,
}

impl ReservePool {
    /// Creates an empty pool for `pair`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn new(pair: AssetPair, config: &PoolConfig) -> Result<Self, RouterError> {
        config.validate()?;
        Ok(Self {
            pair,
            address: pair.pool_address(),
            fee_tier: config.fee_tier(),
            minimum_liquidity: config.minimum_liquidity(),
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            total_shares: Liquidity::ZERO,
            shares: BTreeMap::new(),
            k_last: Amount::ZERO,
        })
    }

    /// The canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// The pool's ledger account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Reserves in pair order.
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Reserves oriented as `(reserve of asset, reserve of the other)`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] if `asset` is not in the pair.
    pub fn reserves_for(&self, asset: Asset) -> Result<(Amount, Amount), RouterError> {
        if !self.pair.contains(&asset) {
            return Err(RouterError::InvalidPath("asset not in pool"));
        }
        if self.pair.is_first(&asset) {
            Ok((self.reserve_a, self.reserve_b))
        } else {
            Ok((self.reserve_b, self.reserve_a))
        }
    }

    /// Outstanding shares, including the locked minimum.
    #[must_use]
    pub const fn total_shares(&self) -> Liquidity {
        self.total_shares
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn shares_of(&self, holder: Address) -> Liquidity {
        self.shares.get(&holder).copied().unwrap_or(Liquidity::ZERO)
    }

    /// `reserve_a · reserve_b` as of the last mint or burn.
    pub const fn k_last(&self) -> Amount {
        self.k_last
    }

    /// Issues shares to `to` for `amount_a` / `amount_b` already sitting in
    /// the pool account above the reserves.
    ///
    /// The amounts must be what the pool actually received; the pool checks
    /// that its balances cover them.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InsufficientInputAmount`] if the pool's balances do
    ///   not cover `reserve + amount` for either asset.
    /// - [`RouterError::InsufficientLiquidityMinted`] if the deposit mints
    ///   no shares (including a first deposit with `√(a·b)` at or below the
    ///   lock).
    /// - [`RouterError::Overflow`] if a reserve would exceed
    ///   [`MAX_RESERVE`].
    pub fn mint<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &L,
        amount_a: Amount,
        amount_b: Amount,
        to: Address,
    ) -> Result<Liquidity, RouterError> {
        let new_a = self.reserve_a.add_or(&amount_a, "reserve a")?;
        let new_b = self.reserve_b.add_or(&amount_b, "reserve b")?;
        if ledger.balance_of(self.pair.first(), self.address) < new_a
            || ledger.balance_of(self.pair.second(), self.address) < new_b
        {
            return Err(RouterError::InsufficientInputAmount);
        }
        check_reserve_cap(new_a, new_b)?;

        let minted = if self.total_shares.is_zero() {
            let root = Liquidity::from_u256(isqrt(amount_a.safe_mul(&amount_b)?.get()));
            if root <= self.minimum_liquidity {
                return Err(RouterError::InsufficientLiquidityMinted);
            }
            self.credit_shares(Address::ZERO, self.minimum_liquidity)?;
            root.sub_or(&self.minimum_liquidity, "first mint")?
        } else {
            let total = self.total_shares.as_amount();
            let by_a = amount_a
                .mul_or(&total, "mint share a")?
                .safe_div(&self.reserve_a, Rounding::Down)?;
            let by_b = amount_b
                .mul_or(&total, "mint share b")?
                .safe_div(&self.reserve_b, Rounding::Down)?;
            Liquidity::from(by_a.min(by_b))
        };
        if minted.is_zero() {
            return Err(RouterError::InsufficientLiquidityMinted);
        }

        self.credit_shares(to, minted)?;
        self.reserve_a = new_a;
        self.reserve_b = new_b;
        self.k_last = new_a.mul_or(&new_b, "k last")?;
        debug!(pool = %self.address, %amount_a, %amount_b, shares = %minted, %to, "mint");
        Ok(minted)
    }

    /// Redeems `shares` of `holder` and sends the pro-rata reserves to `to`.
    ///
    /// Returns the nominal amounts sent, in pair order.  A fee-on-transfer
    /// asset delivers less; the caller measures the receipt.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InsufficientShares`] if `holder` owns fewer shares.
    /// - [`RouterError::InsufficientLiquidityBurned`] if either amount
    ///   rounds to zero.
    /// - Ledger errors from the payout.
    pub fn burn<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        holder: Address,
        shares: Liquidity,
        to: Address,
    ) -> Result<(Amount, Amount), RouterError> {
        let held = self.shares_of(holder);
        if shares > held {
            return Err(RouterError::InsufficientShares);
        }
        let total = self.total_shares.as_amount();
        let amount_a = self
            .reserve_a
            .mul_or(&shares.as_amount(), "burn a")?
            .safe_div(&total, Rounding::Down)?;
        let amount_b = self
            .reserve_b
            .mul_or(&shares.as_amount(), "burn b")?
            .safe_div(&total, Rounding::Down)?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(RouterError::InsufficientLiquidityBurned);
        }

        ledger.transfer(self.pair.first(), self.address, to, amount_a)?;
        ledger.transfer(self.pair.second(), self.address, to, amount_b)?;

        self.set_shares(holder, held.sub_or(&shares, "holder shares")?);
        self.total_shares = self.total_shares.sub_or(&shares, "total shares")?;
        self.reserve_a = self.reserve_a.sub_or(&amount_a, "reserve a")?;
        self.reserve_b = self.reserve_b.sub_or(&amount_b, "reserve b")?;
        self.k_last = self.reserve_a.mul_or(&self.reserve_b, "k last")?;
        debug!(pool = %self.address, %holder, %shares, %amount_a, %amount_b, %to, "burn");
        Ok((amount_a, amount_b))
    }

    /// Pays out `amount_a_out` / `amount_b_out` to `to`, then validates the
    /// fee-adjusted invariant against the pool's real balances.
    ///
    /// The input must already be in the pool account.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InsufficientOutputAmount`] if both outs are zero.
    /// - [`RouterError::InsufficientLiquidity`] if an out reaches its
    ///   reserve.
    /// - [`RouterError::InvalidRecipient`] if `to` is one of the pool's
    ///   assets.
    /// - [`RouterError::InsufficientInputAmount`] if nothing came in.
    /// - [`RouterError::InvariantViolation`] if the adjusted product
    ///   shrank.
    /// - [`RouterError::Overflow`] if a balance exceeds [`MAX_RESERVE`].
    pub fn swap<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        amount_a_out: Amount,
        amount_b_out: Amount,
        to: Address,
    ) -> Result<(), RouterError> {
        if amount_a_out.is_zero() && amount_b_out.is_zero() {
            return Err(RouterError::InsufficientOutputAmount);
        }
        if amount_a_out >= self.reserve_a || amount_b_out >= self.reserve_b {
            return Err(RouterError::InsufficientLiquidity);
        }
        if to == self.pair.first().address() || to == self.pair.second().address() {
            return Err(RouterError::InvalidRecipient);
        }

        if !amount_a_out.is_zero() {
            ledger.transfer(self.pair.first(), self.address, to, amount_a_out)?;
        }
        if !amount_b_out.is_zero() {
            ledger.transfer(self.pair.second(), self.address, to, amount_b_out)?;
        }
        let balance_a = ledger.balance_of(self.pair.first(), self.address);
        let balance_b = ledger.balance_of(self.pair.second(), self.address);

        let amount_a_in = balance_a.saturating_sub(&self.reserve_a.sub_or(&amount_a_out, "a")?);
        let amount_b_in = balance_b.saturating_sub(&self.reserve_b.sub_or(&amount_b_out, "b")?);
        if amount_a_in.is_zero() && amount_b_in.is_zero() {
            return Err(RouterError::InsufficientInputAmount);
        }
        check_reserve_cap(balance_a, balance_b)?;

        let fee = self.fee_tier.basis_points().as_amount();
        let adjusted_a = balance_a
            .mul_or(&BasisPoints::DENOMINATOR, "adjusted balance a")?
            .sub_or(&amount_a_in.mul_or(&fee, "fee a")?, "adjusted balance a")?;
        let adjusted_b = balance_b
            .mul_or(&BasisPoints::DENOMINATOR, "adjusted balance b")?
            .sub_or(&amount_b_in.mul_or(&fee, "fee b")?, "adjusted balance b")?;
        let scale = BasisPoints::DENOMINATOR.mul_or(&BasisPoints::DENOMINATOR, "k scale")?;
        let k_before = self
            .reserve_a
            .mul_or(&self.reserve_b, "k before")?
            .mul_or(&scale, "k before")?;
        if adjusted_a.mul_or(&adjusted_b, "k after")? < k_before {
            return Err(RouterError::InvariantViolation);
        }

        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        debug!(
            pool = %self.address,
            %amount_a_in,
            %amount_b_in,
            %amount_a_out,
            %amount_b_out,
            %to,
            "swap"
        );
        Ok(())
    }

    /// Sends balances held above the reserves to `to`.
    ///
    /// # Errors
    ///
    /// Propagates ledger errors.
    pub fn skim<L: TokenLedger + ?Sized>(
        &self,
        ledger: &mut L,
        to: Address,
    ) -> Result<(Amount, Amount), RouterError> {
        let excess_a = ledger
            .balance_of(self.pair.first(), self.address)
            .saturating_sub(&self.reserve_a);
        let excess_b = ledger
            .balance_of(self.pair.second(), self.address)
            .saturating_sub(&self.reserve_b);
        if !excess_a.is_zero() {
            ledger.transfer(self.pair.first(), self.address, to, excess_a)?;
        }
        if !excess_b.is_zero() {
            ledger.transfer(self.pair.second(), self.address, to, excess_b)?;
        }
        trace!(pool = %self.address, %excess_a, %excess_b, "skim");
        Ok((excess_a, excess_b))
    }

    /// Sets the reserves to the pool's real balances.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if a balance exceeds
    /// [`MAX_RESERVE`].
    pub fn sync<L: TokenLedger + ?Sized>(&mut self, ledger: &L) -> Result<(), RouterError> {
        let balance_a = ledger.balance_of(self.pair.first(), self.address);
        let balance_b = ledger.balance_of(self.pair.second(), self.address);
        check_reserve_cap(balance_a, balance_b)?;
        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        trace!(pool = %self.address, %balance_a, %balance_b, "sync");
        Ok(())
    }

    fn credit_shares(&mut self, holder: Address, shares: Liquidity) -> Result<(), RouterError> {
        let held = self.shares_of(holder).add_or(&shares, "holder shares")?;
        self.total_shares = self.total_shares.add_or(&shares, "total shares")?;
        self.set_shares(holder, held);
        Ok(())
    }

    fn set_shares(&mut self, holder: Address, shares: Liquidity) {
        if shares.is_zero() {
            self.shares.remove(&holder);
        } else {
            self.shares.insert(holder, shares);
        }
    }
}

fn check_reserve_cap(a: Amount, b: Amount) -> Result<(), RouterError> {
    if a > MAX_RESERVE || b > MAX_RESERVE {
        return Err(RouterError::Overflow("reserve exceeds 112 bits"));
    }
    Ok(())
}
