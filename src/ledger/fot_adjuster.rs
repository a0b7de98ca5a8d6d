//! Balance-delta measurement for fee-on-transfer legs.
//!
//! The router never asks a token for its fee rate.  Instead it measures
//! what actually arrived: read the receiver's balance, transfer, read
//! again.  The measurement is two-phase so the transfer in between can be
//! anything, including a pool paying out a swap:
//!
//! ```text
//! let pending = FotAdjuster::begin(&ledger, asset, pool);
//! ledger.transfer(asset, sender, pool, amount)?;
//! let received = pending.finish(&ledger)?;
//! ```

use alloy_primitives::Address;
use tracing::trace;

use crate::domain::{Amount, Asset, Rounding};
use crate::error::RouterError;
use crate::math::CheckedArithmetic;
use crate::traits::TokenLedger;

/// Probe rounds [`FotAdjuster::gross_up`] spends searching for a covering
/// amount.
const MAX_PROBE_ROUNDS: usize = 8;

/// `after − before`.
///
/// # Errors
///
/// Returns [`RouterError::InvariantViolation`] if the balance decreased.
pub fn measure_actual_received(before: Amount, after: Amount) -> Result<Amount, RouterError> {
    after
        .checked_sub(&before)
        .ok_or(RouterError::InvariantViolation)
}

/// First half of a balance-delta measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a measurement must be finished"]
pub struct PendingMeasurement {
    asset: Asset,
    holder: Address,
    before: Amount,
}

impl PendingMeasurement {
    /// Balance recorded by [`FotAdjuster::begin`].
    pub const fn before(&self) -> Amount {
        self.before
    }

    /// Reads the balance again and returns the increase.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvariantViolation`] if the balance decreased.
    pub fn finish<L: TokenLedger + ?Sized>(self, ledger: &L) -> Result<Amount, RouterError> {
        let after = ledger.balance_of(self.asset, self.holder);
        measure_actual_received(self.before, after)
    }
}

/// Measures and corrects amounts on fee-on-transfer legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FotAdjuster;

impl FotAdjuster {
    /// Records `holder`'s current balance of `asset`.
    pub fn begin<L: TokenLedger + ?Sized>(
        ledger: &L,
        asset: Asset,
        holder: Address,
    ) -> PendingMeasurement {
        PendingMeasurement {
            asset,
            holder,
            before: ledger.balance_of(asset, holder),
        }
    }

    /// Transfers `amount` and returns what `to` received.
    ///
    /// Unflagged legs trust the nominal amount; flagged legs are measured.
    ///
    /// # Errors
    ///
    /// Propagates ledger errors, and [`RouterError::InvariantViolation`] if
    /// a measured balance decreased.
    pub fn transfer<L: TokenLedger + ?Sized>(
        ledger: &mut L,
        asset: Asset,
        from: Address,
        to: Address,
        amount: Amount,
        is_fot: bool,
    ) -> Result<Amount, RouterError> {
        if !is_fot {
            ledger.transfer(asset, from, to, amount)?;
            return Ok(amount);
        }
        let pending = Self::begin(ledger, asset, to);
        ledger.transfer(asset, from, to, amount)?;
        let received = pending.finish(ledger)?;
        trace!(%asset, %to, sent = %amount, %received, "measured transfer");
        Ok(received)
    }

    /// Smallest nominal amount `from` must send so that `to` receives at
    /// least `needed`.
    ///
    /// Probes transfers on scratch copies of `ledger`; the real ledger is
    /// untouched.  The first probe sends `needed`; a short receipt scales
    /// the send by `needed / received` and later rounds add the remaining
    /// shortfall.  Once a send covers `needed`, the range between it and
    /// the last short send is bisected down to the boundary.
    ///
    /// # Errors
    ///
    /// - [`RouterError::ExcessiveInputAmount`] if no covering amount is
    ///   found within the probe budget.
    /// - Ledger errors from the probes (e.g. the sender cannot afford it).
    pub fn gross_up<L: TokenLedger + Clone>(
        ledger: &L,
        asset: Asset,
        from: Address,
        to: Address,
        needed: Amount,
    ) -> Result<Amount, RouterError> {
        let probe = |amount: Amount| -> Result<Amount, RouterError> {
            let mut scratch = ledger.clone();
            Self::transfer(&mut scratch, asset, from, to, amount, true)
        };

        let mut gross = needed;
        let mut covering = None;
        let mut short = None;
        for _ in 0..MAX_PROBE_ROUNDS {
            let received = probe(gross)?;
            if received >= needed {
                covering = Some(gross);
                break;
            }
            short = Some(gross);
            let shortfall = needed.sub_or(&received, "gross-up shortfall")?;
            let next = if received.is_zero() {
                gross.mul_or(&Amount::new(2), "gross-up doubling")?
            } else {
                needed
                    .mul_or(&gross, "gross-up scaling")?
                    .safe_div(&received, Rounding::Up)?
            };
            let floor = gross.add_or(&shortfall, "gross-up shortfall")?;
            gross = if next > floor { next } else { floor };
        }
        let Some(mut gross) = covering else {
            return Err(RouterError::ExcessiveInputAmount);
        };

        // `short` never covers and `gross` always does; receipts grow with
        // the amount sent.
        if let Some(mut low) = short {
            loop {
                let gap = gross.sub_or(&low, "gross-up bisection")?;
                if gap <= Amount::ONE {
                    break;
                }
                let half = gap.safe_div(&Amount::new(2), Rounding::Down)?;
                let mid = low.add_or(&half, "gross-up bisection")?;
                if probe(mid)? >= needed {
                    gross = mid;
                } else {
                    low = mid;
                }
            }
        }
        trace!(%asset, %needed, %gross, "grossed up");
        Ok(gross)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;
    use crate::ledger::InMemoryLedger;

    const TAXED: Asset = Asset::new(Address::repeat_byte(1));
    const PLAIN: Asset = Asset::new(Address::repeat_byte(2));
    const SENDER: Address = Address::repeat_byte(0x51);
    const POOL: Address = Address::repeat_byte(0x90);

    fn ledger(tax_bps: u16) -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.set_transfer_tax(TAXED, BasisPoints::new(tax_bps)) else {
            panic!("valid tax");
        };
        for asset in [TAXED, PLAIN] {
            let Ok(()) = ledger.mint(asset, SENDER, Amount::new(1_000_000_000)) else {
                panic!("mint");
            };
        }
        ledger
    }

    // -- measurement ------------------------------------------------------

    #[test]
    fn measure_rejects_decrease() {
        assert_eq!(
            measure_actual_received(Amount::new(5), Amount::new(4)),
            Err(RouterError::InvariantViolation)
        );
        assert_eq!(
            measure_actual_received(Amount::new(5), Amount::new(9)),
            Ok(Amount::new(4))
        );
    }

    #[test]
    fn two_phase_measurement_sees_tax() {
        let mut l = ledger(500);
        let pending = FotAdjuster::begin(&l, TAXED, POOL);
        assert_eq!(pending.before(), Amount::ZERO);
        let Ok(()) = l.transfer(TAXED, SENDER, POOL, Amount::new(1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(pending.finish(&l), Ok(Amount::new(950)));
    }

    #[test]
    fn unflagged_leg_trusts_nominal() {
        let mut l = ledger(500);
        let r = FotAdjuster::transfer(&mut l, PLAIN, SENDER, POOL, Amount::new(77), false);
        assert_eq!(r, Ok(Amount::new(77)));
    }

    #[test]
    fn flagged_leg_is_measured() {
        let mut l = ledger(1_000);
        let r = FotAdjuster::transfer(&mut l, TAXED, SENDER, POOL, Amount::new(1_000), true);
        assert_eq!(r, Ok(Amount::new(900)));
    }

    // -- gross-up ---------------------------------------------------------

    #[test]
    fn gross_up_on_plain_asset_is_identity() {
        let l = ledger(0);
        let r = FotAdjuster::gross_up(&l, PLAIN, SENDER, POOL, Amount::new(1_234));
        assert_eq!(r, Ok(Amount::new(1_234)));
    }

    #[test]
    fn gross_up_covers_ten_percent_tax() {
        let l = ledger(1_000);
        let Ok(gross) = FotAdjuster::gross_up(&l, TAXED, SENDER, POOL, Amount::new(900)) else {
            panic!("expected Ok");
        };
        // 1000 delivers exactly 900; 999 delivers 900 too (fee floor(99.9) = 99).
        assert_eq!(gross, Amount::new(999));
    }

    #[test]
    fn gross_up_is_minimal_across_amounts() {
        let l = ledger(300);
        for needed in [1u128, 2, 97, 1_000, 123_457] {
            let needed = Amount::new(needed);
            let Ok(gross) = FotAdjuster::gross_up(&l, TAXED, SENDER, POOL, needed) else {
                panic!("expected Ok");
            };
            let mut scratch = l.clone();
            let Ok(got) = FotAdjuster::transfer(&mut scratch, TAXED, SENDER, POOL, gross, true)
            else {
                panic!("expected Ok");
            };
            assert!(got >= needed);
            let Ok(lower) = gross.safe_sub(&Amount::ONE) else {
                panic!("gross is non-zero");
            };
            let mut scratch = l.clone();
            let Ok(got) = FotAdjuster::transfer(&mut scratch, TAXED, SENDER, POOL, lower, true)
            else {
                panic!("expected Ok");
            };
            assert!(got < needed);
        }
    }

    #[test]
    fn gross_up_is_minimal_under_near_total_tax() {
        let mut l = ledger(9_999);
        let Ok(()) = l.mint(TAXED, SENDER, Amount::new(100_000_000_000_000_000_000_000)) else {
            panic!("mint");
        };
        let needed = Amount::new(1_000_000_000_000_000_000);
        let Ok(gross) = FotAdjuster::gross_up(&l, TAXED, SENDER, POOL, needed) else {
            panic!("expected Ok");
        };
        // A 99.99% tax lands ceil(x / 10_000).
        assert_eq!(gross, Amount::new(9_999_999_999_999_999_990_001));
        let Ok(lower) = gross.safe_sub(&Amount::ONE) else {
            panic!("gross is non-zero");
        };
        let mut scratch = l.clone();
        let Ok(got) = FotAdjuster::transfer(&mut scratch, TAXED, SENDER, POOL, lower, true) else {
            panic!("expected Ok");
        };
        assert!(got < needed);
    }

    #[test]
    fn gross_up_leaves_ledger_untouched() {
        let l = ledger(1_000);
        let before = l.clone();
        let _ = FotAdjuster::gross_up(&l, TAXED, SENDER, POOL, Amount::new(5_000));
        assert_eq!(l, before);
    }

    #[test]
    fn full_tax_cannot_be_grossed_up() {
        let l = ledger(10_000);
        let r = FotAdjuster::gross_up(&l, TAXED, SENDER, POOL, Amount::new(10));
        assert_eq!(r, Err(RouterError::ExcessiveInputAmount));
    }

    #[test]
    fn unaffordable_gross_up_reports_balance() {
        let l = ledger(1_000);
        let r = FotAdjuster::gross_up(&l, TAXED, POOL, SENDER, Amount::new(10));
        assert_eq!(r, Err(RouterError::InsufficientBalance));
    }
}
