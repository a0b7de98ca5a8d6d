//! # FOT Router
//!
//! Constant-product AMM router that stays correct when assets charge a
//! fee on every transfer (fee-on-transfer, "FOT", or deflationary tokens).
//!
//! A plain router assumes a transfer of `x` lands `x`.  For an FOT asset it
//! lands less, so quoting the next hop on `x` overpays and the pool's
//! invariant check rejects the swap.  This crate measures what actually
//! landed wherever a path flags an asset as FOT, quotes on that, and grosses
//! amounts up when a caller asks for an exact output.
//!
//! - **Exact-in swaps** quote each hop on what its pool received and check
//!   the minimum against what the recipient received.
//! - **Exact-out swaps** gross up every flagged leg so each receiver nets
//!   what the next hop needs.
//! - **Liquidity** deposits mint on measured receipts; withdrawals check
//!   minimums against measured receipts.
//! - **Native currency** entry points wrap and unwrap through the router's
//!   account, refunding unused value.
//!
//! Every mutating call is atomic: a deadline, slippage or invariant failure
//! at any step leaves the ledger and pools untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use alloy_primitives::Address;
//! use fot_router::prelude::*;
//!
//! let weth = Asset::new(Address::repeat_byte(0xee));
//! let fot = Asset::new(Address::repeat_byte(0x02));
//! let alice = Address::repeat_byte(0xa1);
//! let bob = Address::repeat_byte(0xb0);
//!
//! // A ledger whose `fot` asset burns 10% of every transfer.
//! let mut ledger = InMemoryLedger::new();
//! ledger.set_transfer_tax(fot, BasisPoints::new(1_000)).expect("valid tax");
//! ledger.mint(fot, alice, Amount::new(2_000_000)).expect("mint");
//! ledger.mint(weth, alice, Amount::new(2_000_000)).expect("mint");
//!
//! let config = RouterConfig::new(weth, Address::repeat_byte(0x77)).expect("valid");
//! let registry = PoolRegistry::from_config(&PoolConfig::default()).expect("valid");
//! let mut router = Router::new(config, ledger, registry, SystemClock).expect("valid");
//!
//! let mut deposit =
//!     AddLiquidity::new(fot, weth, Amount::new(1_000_000), Amount::new(1_000_000), alice);
//! deposit.fot = [true, false];
//! router.add_liquidity_supporting_fot_tokens(alice, &deposit).expect("deposit");
//!
//! // Sell 10 000 FOT: the pool receives 9 000 and the hop is quoted on that.
//! let path = SwapPath::new(vec![fot, weth], vec![true, false]).expect("valid path");
//! let quoted = router.get_amounts_out(Amount::new(10_000), &path, alice, bob).expect("quote");
//! assert_eq!(quoted.pool_inputs(), &[Amount::new(9_000)]);
//!
//! let out = router
//!     .swap_exact_tokens_for_tokens_supporting_fot_tokens(
//!         alice,
//!         Amount::new(10_000),
//!         quoted.actual_amount_out(),
//!         &path,
//!         bob,
//!         Deadline::NEVER,
//!     )
//!     .expect("swap");
//! assert_eq!(out, quoted.actual_amount_out());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  deadlines, atomic sessions, slippage checks
//! └──────┬──────┘
//!        │ SwapExecution (per-hop state machine) + FotAdjuster
//!        ▼
//! ┌─────────────┐
//! │ PairRegistry │  PoolRegistry: one ReservePool per canonical pair
//! └──────┬──────┘
//!        │ mint / burn / swap against real balances
//!        ▼
//! ┌─────────────┐
//! │ TokenLedger  │  InMemoryLedger: balances, per-asset transfer tax
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Asset`](domain::Asset), [`SwapPath`](domain::SwapPath), etc. |
//! | [`traits`] | Seams: [`TokenLedger`](traits::TokenLedger), [`PairRegistry`](traits::PairRegistry), [`Clock`](traits::Clock), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`RouterConfig`](config::RouterConfig) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) and the [`FotAdjuster`](ledger::FotAdjuster) |
//! | [`pools`]  | [`ReservePool`](pools::ReservePool), the constant-product pair |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry), the pair factory |
//! | [`router`] | [`Router`](router::Router) entry points |
//! | [`math`]   | Checked arithmetic and swap quotes |
//! | [`error`]  | [`RouterError`](error::RouterError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
