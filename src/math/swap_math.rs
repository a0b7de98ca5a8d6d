//! Constant-product quoting.
//!
//! Pure functions over `(reserve_in, reserve_out, fee)`.  Every division
//! truncates except the `+ 1` of the inverse quote, so rounding always
//! favours the pool over the trader.
//!
//! # Forward (exact-in)
//!
//! ```text
//! after_fee  = amount_in × (10 000 − fee_bps) / 10 000
//! amount_out = reserve_out × after_fee / (reserve_in + after_fee)
//! ```
//!
//! # Inverse (exact-out)
//!
//! ```text
//! amount_in = reserve_in × amount_out × 10 000
//!             / ((reserve_out − amount_out) × (10 000 − fee_bps)) + 1
//! ```
//!
//! Multi-hop chains here are nominal only.  Transfer-tax correction is
//! interleaved per hop by the router, because each hop's actual forwarded
//! amount becomes the next hop's input.

use alloy_primitives::U256;

use super::CheckedArithmetic;
use crate::domain::{Amount, BasisPoints, FeeTier, Rounding};
use crate::error::{Result, RouterError};

/// Reserves and fee of one hop, oriented in trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HopReserves {
    /// Reserve of the asset sold into the pool.
    pub reserve_in: Amount,
    /// Reserve of the asset bought from the pool.
    pub reserve_out: Amount,
    /// Pool swap fee.
    pub fee: FeeTier,
}

impl HopReserves {
    /// Creates oriented hop reserves.
    pub const fn new(reserve_in: Amount, reserve_out: Amount, fee: FeeTier) -> Self {
        Self {
            reserve_in,
            reserve_out,
            fee,
        }
    }
}

/// Output of one hop for an exact input.
///
/// # Errors
///
/// - [`RouterError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`RouterError::InsufficientLiquidity`] if either reserve is zero.
/// - [`RouterError::Overflow`] if an intermediate product overflows.
///
/// # Examples
///
/// ```
/// use fot_router::domain::{Amount, FeeTier};
/// use fot_router::math::quote_amount_out;
///
/// let out = quote_amount_out(
///     Amount::new(100),
///     Amount::new(1_000),
///     Amount::new(1_000),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// assert_eq!(out, Ok(Amount::new(90)));
/// ```
pub fn quote_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(RouterError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(RouterError::InsufficientLiquidity);
    }
    let after_fee = fee.amount_after_fee(amount_in)?;
    let numerator = reserve_out.mul_or(&after_fee, "amount-out numerator")?;
    let denominator = reserve_in.add_or(&after_fee, "amount-out denominator")?;
    numerator.safe_div(&denominator, Rounding::Down)
}

/// Input one hop needs to pay out exactly `amount_out`.
///
/// # Errors
///
/// - [`RouterError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`RouterError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out >= reserve_out`.
/// - [`RouterError::InvalidFee`] for a 100% fee.
/// - [`RouterError::Overflow`] if an intermediate product overflows.
pub fn quote_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(RouterError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(RouterError::InsufficientLiquidity);
    }
    fee.validate()?;
    let numerator = reserve_in
        .mul_or(&amount_out, "amount-in numerator")?
        .mul_or(&BasisPoints::DENOMINATOR, "amount-in numerator")?;
    let denominator = reserve_out
        .sub_or(&amount_out, "amount-in denominator")?
        .mul_or(&fee.complement(), "amount-in denominator")?;
    numerator
        .safe_div(&denominator, Rounding::Down)?
        .add_or(&Amount::ONE, "amount-in ceiling")
}

/// Amount of asset B equivalent to `amount_a` at the current reserve ratio.
///
/// Used to size the second leg of a liquidity deposit.
///
/// # Errors
///
/// - [`RouterError::InsufficientAmount`] if `amount_a` is zero.
/// - [`RouterError::InsufficientLiquidity`] if either reserve is zero.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(RouterError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(RouterError::InsufficientLiquidity);
    }
    amount_a
        .mul_or(&reserve_b, "quote numerator")?
        .safe_div(&reserve_a, Rounding::Down)
}

/// Integer square root (floor) via Newton's method.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::ZERO;
    }
    let two = U256::from(2u8);
    let mut x = n;
    let mut y = n / two + n % two;
    while y < x {
        x = y;
        y = (x + n / x) / two;
    }
    x
}

/// Nominal exact-in chain, left to right.
///
/// Returns `amount_in` followed by the output of every hop.
///
/// # Errors
///
/// Propagates [`quote_amount_out`] errors.
pub fn amounts_out(amount_in: Amount, hops: &[HopReserves]) -> Result<Vec<Amount>> {
    let mut amounts = Vec::with_capacity(hops.len() + 1);
    amounts.push(amount_in);
    let mut current = amount_in;
    for hop in hops {
        current = quote_amount_out(current, hop.reserve_in, hop.reserve_out, hop.fee)?;
        amounts.push(current);
    }
    Ok(amounts)
}

/// Nominal exact-out chain, right to left.
///
/// Returns the input of every hop followed by `amount_out`.
///
/// # Errors
///
/// Propagates [`quote_amount_in`] errors.
pub fn amounts_in(amount_out: Amount, hops: &[HopReserves]) -> Result<Vec<Amount>> {
    let mut amounts = vec![Amount::ZERO; hops.len() + 1];
    amounts[hops.len()] = amount_out;
    for (i, hop) in hops.iter().enumerate().rev() {
        amounts[i] = quote_amount_in(amounts[i + 1], hop.reserve_in, hop.reserve_out, hop.fee)?;
    }
    Ok(amounts)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const FEE: FeeTier = FeeTier::TIER_0_30_PERCENT;

    fn out(amount_in: u128, r_in: u128, r_out: u128) -> Amount {
        let Ok(v) = quote_amount_out(
            Amount::new(amount_in),
            Amount::new(r_in),
            Amount::new(r_out),
            FEE,
        ) else {
            panic!("expected Ok");
        };
        v
    }

    fn inv(amount_out: u128, r_in: u128, r_out: u128) -> Amount {
        let Ok(v) = quote_amount_in(
            Amount::new(amount_out),
            Amount::new(r_in),
            Amount::new(r_out),
            FEE,
        ) else {
            panic!("expected Ok");
        };
        v
    }

    // -- forward ----------------------------------------------------------

    #[test]
    fn balanced_pool_hundred_in() {
        // after_fee = floor(100 * 9970 / 10000) = 99
        // out = floor(1000 * 99 / 1099) = 90
        assert_eq!(out(100, 1_000, 1_000), Amount::new(90));
    }

    #[test]
    fn forward_matches_formula_on_large_reserves() {
        // after_fee = 997_000, out = floor(2e9 * 997_000 / (1e9 + 997_000)) = 1_992_013
        assert_eq!(
            out(1_000_000, 1_000_000_000, 2_000_000_000),
            Amount::new(1_992_013)
        );
    }

    #[test]
    fn forward_rejects_zero_input() {
        let r = quote_amount_out(Amount::ZERO, Amount::new(1), Amount::new(1), FEE);
        assert_eq!(r, Err(RouterError::InsufficientInputAmount));
    }

    #[test]
    fn forward_rejects_empty_pool() {
        let r = quote_amount_out(Amount::new(5), Amount::ZERO, Amount::new(1), FEE);
        assert_eq!(r, Err(RouterError::InsufficientLiquidity));
    }

    #[test]
    fn forward_overflow_is_reported() {
        let r = quote_amount_out(Amount::MAX, Amount::new(1), Amount::new(1), FEE);
        assert!(matches!(r, Err(RouterError::Overflow(_))));
    }

    // -- inverse ----------------------------------------------------------

    #[test]
    fn inverse_matches_formula() {
        // 1000 * 90 * 10000 / (910 * 9970) = 99.19.. -> 99 + 1
        assert_eq!(inv(90, 1_000, 1_000), Amount::new(100));
    }

    #[test]
    fn inverse_rejects_draining_the_pool() {
        let r = quote_amount_in(Amount::new(1_000), Amount::new(1_000), Amount::new(1_000), FEE);
        assert_eq!(r, Err(RouterError::InsufficientLiquidity));
        let r = quote_amount_in(Amount::new(1_001), Amount::new(1_000), Amount::new(1_000), FEE);
        assert_eq!(r, Err(RouterError::InsufficientLiquidity));
    }

    #[test]
    fn inverse_rejects_zero_output() {
        let r = quote_amount_in(Amount::ZERO, Amount::new(1), Amount::new(5), FEE);
        assert_eq!(r, Err(RouterError::InsufficientOutputAmount));
    }

    #[test]
    fn inverse_round_trips_on_balanced_pool() {
        let needed = inv(90, 1_000, 1_000);
        assert_eq!(out(100, 1_000, 1_000), Amount::new(90));
        assert_eq!(needed, Amount::new(100));
    }

    #[test]
    fn exact_division_boundary_is_one_unit_above() {
        // Zero fee, 100/100 reserves: 100 in -> exactly 50 out, and the
        // inverse of 50 is 100 * 50 / 50 + 1 = 101.
        let zero = FeeTier::new(BasisPoints::ZERO);
        let Ok(o) = quote_amount_out(Amount::new(100), Amount::new(100), Amount::new(100), zero)
        else {
            panic!("expected Ok");
        };
        assert_eq!(o, Amount::new(50));
        let Ok(i) = quote_amount_in(o, Amount::new(100), Amount::new(100), zero) else {
            panic!("expected Ok");
        };
        assert_eq!(i, Amount::new(101));
    }

    #[test]
    fn exact_division_at_default_fee_is_one_unit_above() {
        // 10_000 in against 9_970/2 buys exactly 1, whose inverse is
        // 9_970 * 10_000 / 9_970 + 1.
        let fee = FeeTier::default();
        let (ri, ro) = (Amount::new(9_970), Amount::new(2));
        let Ok(o) = quote_amount_out(Amount::new(10_000), ri, ro, fee) else {
            panic!("expected Ok");
        };
        assert_eq!(o, Amount::ONE);
        let Ok(i) = quote_amount_in(o, ri, ro, fee) else {
            panic!("expected Ok");
        };
        assert_eq!(i, Amount::new(10_001));
    }

    // -- quote / isqrt ----------------------------------------------------

    #[test]
    fn quote_is_proportional() {
        assert_eq!(
            quote(Amount::new(10), Amount::new(100), Amount::new(250)),
            Ok(Amount::new(25))
        );
        assert_eq!(
            quote(Amount::ZERO, Amount::new(1), Amount::new(1)),
            Err(RouterError::InsufficientAmount)
        );
        assert_eq!(
            quote(Amount::new(1), Amount::ZERO, Amount::new(1)),
            Err(RouterError::InsufficientLiquidity)
        );
    }

    #[test]
    fn isqrt_values() {
        assert_eq!(isqrt(U256::ZERO), U256::ZERO);
        assert_eq!(isqrt(U256::from(1u8)), U256::from(1u8));
        assert_eq!(isqrt(U256::from(15u8)), U256::from(3u8));
        assert_eq!(isqrt(U256::from(16u8)), U256::from(4u8));
        let four_e34 = U256::from(4u128 * 10u128.pow(34));
        assert_eq!(isqrt(four_e34), U256::from(2u128 * 10u128.pow(17)));
        let root = isqrt(U256::MAX);
        assert_eq!(root, U256::from(u128::MAX));
    }

    // -- chains -----------------------------------------------------------

    #[test]
    fn chains_compose_hops() {
        let hops = [
            HopReserves::new(Amount::new(1_000_000), Amount::new(1_000_000), FEE),
            HopReserves::new(Amount::new(500_000), Amount::new(2_000_000), FEE),
        ];
        let Ok(fwd) = amounts_out(Amount::new(10_000), &hops) else {
            panic!("expected Ok");
        };
        assert_eq!(fwd.len(), 3);
        assert_eq!(fwd[1], out(10_000, 1_000_000, 1_000_000));
        let Ok(mid) = u128::try_from(fwd[1].get()) else {
            panic!("fits");
        };
        assert_eq!(fwd[2], out(mid, 500_000, 2_000_000));

        let Ok(back) = amounts_in(fwd[2], &hops) else {
            panic!("expected Ok");
        };
        assert_eq!(back[2], fwd[2]);
        assert!(back[0] <= Amount::new(10_000));
    }
}
