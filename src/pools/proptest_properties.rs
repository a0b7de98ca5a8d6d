//! Property-based tests for pool and routing invariants.
//!
//! 1. **Quote inverse**: the exact-out input never exceeds the exact-in
//!    amount that produced the output, and always buys at least that output.
//! 2. **Invariant preservation**: `k` never decreases across a swap.
//! 3. **Liquidity conservation**: add then remove returns at most the
//!    deposit.
//! 4. **Transfer tax**: a taxed transfer lands `x − ⌊x·p⌋`, and gross-up
//!    finds the minimal amount that lands a target.

use alloy_primitives::{Address, U256};
use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{Amount, Asset, AssetPair, BasisPoints, FeeTier};
use crate::error::RouterError;
use crate::ledger::{FotAdjuster, InMemoryLedger};
use crate::math::{quote, quote_amount_in, quote_amount_out};
use crate::pools::ReservePool;
use crate::traits::TokenLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const ASSET_A: Asset = Asset::new(Address::repeat_byte(0x0a));
const ASSET_B: Asset = Asset::new(Address::repeat_byte(0x0b));
const PROVIDER: Address = Address::repeat_byte(0x11);
const TRADER: Address = Address::repeat_byte(0x22);
const HOLDER: Address = Address::repeat_byte(0x33);
const FUNDING: u128 = 1_000_000_000_000_000_000_000_000_000;

fn amt(value: u128) -> Amount {
    Amount::new(value)
}

fn funded_ledger() -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for holder in [PROVIDER, TRADER] {
        for asset in [ASSET_A, ASSET_B] {
            let Ok(()) = ledger.mint(asset, holder, amt(FUNDING)) else {
                panic!("mint");
            };
        }
    }
    ledger
}

/// Pool seeded by `PROVIDER` with `ra` of the pair's first asset and `rb`
/// of its second.
fn make_pool(ra: u128, rb: u128) -> (InMemoryLedger, ReservePool) {
    let mut ledger = funded_ledger();
    let Ok(pair) = AssetPair::new(ASSET_A, ASSET_B) else {
        panic!("valid pair");
    };
    let Ok(mut pool) = ReservePool::new(pair, &PoolConfig::default()) else {
        panic!("valid pool");
    };
    deposit(&mut ledger, &pool, PROVIDER, ra, rb);
    let Ok(_) = pool.mint(&ledger, amt(ra), amt(rb), PROVIDER) else {
        panic!("first mint");
    };
    (ledger, pool)
}

fn deposit(ledger: &mut InMemoryLedger, pool: &ReservePool, from: Address, a: u128, b: u128) {
    let Ok(()) = ledger.transfer(pool.pair().first(), from, pool.address(), amt(a)) else {
        panic!("deposit a");
    };
    let Ok(()) = ledger.transfer(pool.pair().second(), from, pool.address(), amt(b)) else {
        panic!("deposit b");
    };
}

fn product(reserves: (Amount, Amount)) -> U256 {
    reserves.0.get() * reserves.1.get()
}

/// What lands after a `tax_bps` transfer tax.
fn landed(sent: u128, tax_bps: u16) -> u128 {
    sent - sent * u128::from(tax_bps) / 10_000
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000
}

// ---------------------------------------------------------------------------
// 1. Quote inverse
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_inverse_quote_never_exceeds_forward_input(
        ri in reserve_strategy(),
        ro in reserve_strategy(),
        per_mille in 1u128..=1_000,
    ) {
        let fee = FeeTier::default();
        let x = (ri / 1_000 * per_mille).max(1);
        let Ok(out) = quote_amount_out(amt(x), amt(ri), amt(ro), fee) else {
            return Ok(());
        };
        if out.is_zero() { return Ok(()); }

        // An exact quotient rounds the inverse up by one whole unit.
        let out_u = out.get();
        let numerator = U256::from(ri) * out_u * U256::from(10_000u64);
        let denominator = (U256::from(ro) - out_u) * U256::from(9_970u64);
        prop_assume!(numerator % denominator != U256::ZERO);

        let Ok(back) = quote_amount_in(out, amt(ri), amt(ro), fee) else {
            return Err(TestCaseError::fail("inverse of a valid quote must succeed"));
        };
        prop_assert!(back <= amt(x), "inverse {} exceeds input {}", back, x);

        let Ok(forward) = quote_amount_out(back, amt(ri), amt(ro), fee) else {
            return Err(TestCaseError::fail("forward of the inverse must succeed"));
        };
        prop_assert!(forward >= out, "inverse {} buys {} < {}", back, forward, out);
    }
}

// ---------------------------------------------------------------------------
// 2. Invariant preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_k_never_decreases_across_swap(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        per_mille in 1u128..=2_000,
    ) {
        let (mut ledger, mut pool) = make_pool(ra, rb);
        let k_before = product(pool.reserves());
        let k_last = pool.k_last();

        let x = (ra / 1_000 * per_mille).max(1);
        let Ok(out) = quote_amount_out(amt(x), amt(ra), amt(rb), pool.fee_tier()) else {
            return Ok(());
        };
        if out.is_zero() { return Ok(()); }

        let Ok(()) = ledger.transfer(pool.pair().first(), TRADER, pool.address(), amt(x)) else {
            return Err(TestCaseError::fail("trader is funded"));
        };
        let swapped = pool.swap(&mut ledger, Amount::ZERO, out, TRADER);
        prop_assert!(swapped.is_ok(), "quoted swap rejected: {:?}", swapped);

        let k_after = product(pool.reserves());
        prop_assert!(k_after >= k_before, "k shrank: {} -> {}", k_before, k_after);
        prop_assert_eq!(pool.k_last(), k_last);
    }
}

// ---------------------------------------------------------------------------
// 3. Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_add_then_remove_returns_at_most_deposit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        per_mille in 1u128..=1_000,
    ) {
        let (mut ledger, mut pool) = make_pool(ra, rb);
        let a = (ra / 1_000 * per_mille).max(1);
        let Ok(b) = quote(amt(a), amt(ra), amt(rb)) else {
            return Ok(());
        };
        let b = b.get().to::<u128>();
        if b == 0 { return Ok(()); }

        deposit(&mut ledger, &pool, TRADER, a, b);
        let shares = match pool.mint(&ledger, amt(a), amt(b), TRADER) {
            Ok(shares) => shares,
            Err(RouterError::InsufficientLiquidityMinted) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("mint failed: {e:?}"))),
        };
        let (out_a, out_b) = match pool.burn(&mut ledger, TRADER, shares, HOLDER) {
            Ok(amounts) => amounts,
            Err(RouterError::InsufficientLiquidityBurned) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("burn failed: {e:?}"))),
        };
        prop_assert!(out_a <= amt(a), "returned {} of {}", out_a, a);
        prop_assert!(out_b <= amt(b), "returned {} of {}", out_b, b);
        prop_assert!(pool.shares_of(TRADER).is_zero());
    }
}

// ---------------------------------------------------------------------------
// 4. Transfer tax
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_taxed_transfer_lands_complement(
        tax in 0u16..10_000,
        x in 1u128..=1_000_000_000_000_000_000_000_000,
    ) {
        let mut ledger = funded_ledger();
        let Ok(()) = ledger.set_transfer_tax(ASSET_A, BasisPoints::new(tax)) else {
            return Err(TestCaseError::fail("tax below 100% is valid"));
        };
        let transferred = FotAdjuster::transfer(&mut ledger, ASSET_A, TRADER, HOLDER, amt(x), true);
        let Ok(received) = transferred else {
            return Err(TestCaseError::fail("funded transfer"));
        };
        prop_assert_eq!(received, amt(landed(x, tax)));
        prop_assert_eq!(ledger.balance_of(ASSET_A, HOLDER), received);
    }

    #[test]
    fn prop_gross_up_is_minimal(
        tax in 1u16..=9_999,
        needed in 1u128..=1_000_000_000_000_000_000,
    ) {
        let mut ledger = funded_ledger();
        let Ok(()) = ledger.set_transfer_tax(ASSET_A, BasisPoints::new(tax)) else {
            return Err(TestCaseError::fail("valid tax"));
        };
        let grossed = FotAdjuster::gross_up(&ledger, ASSET_A, TRADER, HOLDER, amt(needed));
        let Ok(gross) = grossed else {
            return Err(TestCaseError::fail("funded gross-up"));
        };
        let gross = gross.get().to::<u128>();
        prop_assert!(landed(gross, tax) >= needed);
        prop_assert!(landed(gross - 1, tax) < needed);
    }
}
