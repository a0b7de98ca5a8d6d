//! Fee-on-transfer router walkthrough.
//!
//! Seeds two pools, one of them with an asset that burns 10% of every
//! transfer, then routes swaps and liquidity through them.  Set
//! `RUST_LOG=fot_router=debug` to watch each hop.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=fot_router=debug cargo run --example fot_router
//! ```

use alloy_primitives::Address;
use fot_router::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Fee-on-transfer router ===\n");

    // ── 1. Assets and accounts ──────────────────────────────────────────
    let weth = Asset::new(Address::repeat_byte(0xee));
    let usdc = Asset::new(Address::repeat_byte(0x01));
    let moon = Asset::new(Address::repeat_byte(0x02));
    let alice = Address::repeat_byte(0xa1);
    let bob = Address::repeat_byte(0xb0);

    let mut ledger = InMemoryLedger::new();
    ledger.set_transfer_tax(moon, BasisPoints::new(1_000))?;
    for asset in [weth, usdc, moon] {
        ledger.mint(asset, alice, Amount::new(1_000_000_000_000))?;
    }
    println!("MOON transfer tax: {}", ledger.transfer_tax(moon));

    // ── 2. Router over an empty registry ────────────────────────────────
    let config = RouterConfig::new(weth, Address::repeat_byte(0x77))?;
    let registry = PoolRegistry::from_config(&PoolConfig::default())?;
    let mut router = Router::new(config, ledger, registry, SystemClock)?;

    // ── 3. Seed USDC/MOON and MOON/WETH ─────────────────────────────────
    let mut deposit = AddLiquidity::new(
        usdc,
        moon,
        Amount::new(10_000_000),
        Amount::new(10_000_000),
        alice,
    );
    deposit.fot = [false, true];
    let (a, b, shares) = router.add_liquidity_supporting_fot_tokens(alice, &deposit)?;
    println!("\nUSDC/MOON: deposited {a} USDC + {b} MOON (after tax), minted {shares}");

    let mut deposit = AddLiquidityEth::new(moon, Amount::new(10_000_000), alice);
    deposit.is_fot_token = true;
    let (token, eth, shares) =
        router.add_liquidity_eth_supporting_fot_tokens(alice, &deposit, Amount::new(5_000_000))?;
    println!("MOON/WETH: deposited {token} MOON (after tax) + {eth} ETH, minted {shares}");

    // ── 4. Quote and execute USDC → MOON → ETH ──────────────────────────
    let path = SwapPath::new(vec![usdc, moon, weth], vec![false, true, false])?;
    let quoted = router.get_amounts_out(Amount::new(50_000), &path, alice, bob)?;
    println!("\n--- Sell 50 000 USDC for ETH via MOON ---");
    println!("  Nominal hops:  {:?}", quoted.amounts());
    println!("  Pool inputs:   {:?}", quoted.pool_inputs());
    println!("  Bob receives:  {}", quoted.actual_amount_out());

    let deadline = Deadline::at(SystemClock.now() + 300);
    let out = router.swap_exact_tokens_for_tokens_supporting_fot_tokens(
        alice,
        Amount::new(50_000),
        quoted.actual_amount_out(),
        &path,
        bob,
        deadline,
    )?;
    println!("  Executed:      {out}");

    // ── 5. Buy exactly 1 000 MOON for Bob with ETH ──────────────────────
    let path = SwapPath::new(vec![weth, moon], vec![false, true])?;
    let needed =
        router.get_amounts_in_supporting_fot_tokens(Amount::new(1_000), &path, alice, bob)?;
    let spent = router.swap_eth_for_exact_tokens_supporting_fot_tokens(
        alice,
        Amount::new(10_000),
        Amount::new(1_000),
        &path,
        bob,
        deadline,
    )?;
    println!("\n--- Buy exactly 1 000 MOON ---");
    println!("  Quoted input:  {}", needed.actual_amount_in());
    println!("  Spent:         {spent}");
    println!("  Bob holds:     {} MOON", router.ledger().balance_of(moon, bob));

    // ── 6. A slippage failure leaves no trace ───────────────────────────
    let before = router.ledger().clone();
    let path = SwapPath::new(vec![usdc, moon], vec![false, true])?;
    let quoted = router.get_amounts_out(Amount::new(1_000), &path, alice, bob)?;
    let result = router.swap_exact_tokens_for_tokens_supporting_fot_tokens(
        alice,
        Amount::new(1_000),
        quoted.nominal_amount_out(),
        &path,
        bob,
        deadline,
    );
    println!("\n--- Demand the nominal (untaxed) output ---");
    println!("  Result:        {result:?}");
    println!("  Ledger intact: {}", router.ledger() == &before);

    // ── 7. Withdraw USDC/MOON ───────────────────────────────────────────
    let Some(pool) = router.registry().pool(usdc, moon) else {
        return Err("USDC/MOON pool missing".into());
    };
    let held = pool.shares_of(alice);
    let mut withdrawal = RemoveLiquidity::new(usdc, moon, held, alice);
    withdrawal.fot = [false, true];
    let (usdc_out, moon_out) = router.remove_liquidity_supporting_fot_tokens(alice, &withdrawal)?;
    println!("\nWithdrew {usdc_out} USDC + {moon_out} MOON (after tax) for {held} shares");

    Ok(())
}
