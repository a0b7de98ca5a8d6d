//! The fee-on-transfer aware router.
//!
//! [`Router`] orchestrates multi-hop swaps and liquidity changes over a
//! [`TokenLedger`] and a [`PairRegistry`].  Every mutating call:
//!
//! 1. checks the [`Deadline`] against the injected [`Clock`];
//! 2. runs against a copy of the ledger and registry;
//! 3. commits the copy only if the whole call succeeded.
//!
//! So a failure at any hop, measurement or slippage check leaves no trace.
//! Read-only quotes run the same code on a throw-away session.
//!
//! # Native currency
//!
//! The `*_eth_*` entry points treat [`RouterConfig::wrapped_native`] as
//! the native currency.  Native value is paid to the router's account
//! first and unused value is refunded from it.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::Address;
//! use fot_router::prelude::*;
//!
//! let weth = Asset::new(Address::repeat_byte(0xee));
//! let usdc = Asset::new(Address::repeat_byte(0x01));
//! let alice = Address::repeat_byte(0xa1);
//!
//! let config = RouterConfig::new(weth, Address::repeat_byte(0x77)).expect("valid");
//! let registry = PoolRegistry::from_config(&PoolConfig::default()).expect("valid");
//! let mut router =
//!     Router::new(config, InMemoryLedger::new(), registry, FixedClock::new(0)).expect("valid");
//!
//! router.ledger_mut().mint(usdc, alice, Amount::new(2_000_000)).expect("mint");
//! router.ledger_mut().mint(weth, alice, Amount::new(2_000_000)).expect("mint");
//! router
//!     .add_liquidity_supporting_fot_tokens(
//!         alice,
//!         &AddLiquidity::new(usdc, weth, Amount::new(1_000_000), Amount::new(1_000_000), alice),
//!     )
//!     .expect("liquidity added");
//!
//! let path = SwapPath::plain(vec![usdc, weth]).expect("valid path");
//! let out = router
//!     .swap_exact_tokens_for_tokens_supporting_fot_tokens(
//!         alice,
//!         Amount::new(10_000),
//!         Amount::new(9_000),
//!         &path,
//!         alice,
//!         Deadline::NEVER,
//!     )
//!     .expect("swap");
//! assert_eq!(out, Amount::new(9_871));
//! ```

mod execution;
mod liquidity;
mod quote;
mod swap;

use alloy_primitives::Address;
use tracing::debug;

use crate::config::RouterConfig;
use crate::domain::{Amount, Asset, AssetPair, Deadline};
use crate::error::RouterError;
use crate::traits::{Clock, PairRegistry, TokenLedger};

pub use execution::ExecutionState;
pub use liquidity::{AddLiquidity, AddLiquidityEth, RemoveLiquidity, RemoveLiquidityEth};

/// Working copy of router state for one call.
#[derive(Debug, Clone)]
pub(crate) struct Session<L, R> {
    pub(crate) ledger: L,
    pub(crate) registry: R,
    pub(crate) config: RouterConfig,
}

impl<L: TokenLedger, R> Session<L, R> {
    /// Pays `value` of the native asset from `sender` to the router.
    pub(crate) fn receive_native(
        &mut self,
        sender: Address,
        value: Amount,
    ) -> Result<(), RouterError> {
        self.ledger
            .transfer(self.config.wrapped_native(), sender, self.config.account(), value)
    }

    /// Pays `value` of the native asset from the router to `to`.
    pub(crate) fn send_native(&mut self, to: Address, value: Amount) -> Result<(), RouterError> {
        if value.is_zero() {
            return Ok(());
        }
        self.ledger
            .transfer(self.config.wrapped_native(), self.config.account(), to, value)
    }
}

/// Constant-product router with fee-on-transfer support.
#[derive(Debug, Clone)]
pub struct Router<L, R, C> {
    config: RouterConfig,
    ledger: L,
    registry: R,
    clock: C,
}

impl<L, R, C> Router<L, R, C>
where
    L: TokenLedger + Clone,
    R: PairRegistry + Clone,
    C: Clock,
{
    /// Creates a router over `ledger` and `registry`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn new(
        config: RouterConfig,
        ledger: L,
        registry: R,
        clock: C,
    ) -> Result<Self, RouterError> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            registry,
            clock,
        })
    }

    /// Router configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The committed ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, for funding accounts outside the router.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The committed registry.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Runs `f` on a copy of the state and commits it only on success.
    ///
    /// The deadline is checked before anything is copied or touched.
    pub(crate) fn transact<T>(
        &mut self,
        deadline: Deadline,
        f: impl FnOnce(&mut Session<L, R>) -> Result<T, RouterError>,
    ) -> Result<T, RouterError> {
        deadline.check(self.clock.now())?;
        let mut session = self.session();
        match f(&mut session) {
            Ok(value) => {
                self.ledger = session.ledger;
                self.registry = session.registry;
                Ok(value)
            }
            Err(error) => {
                debug!(%error, "call rolled back");
                Err(error)
            }
        }
    }

    /// A throw-away copy of the committed state.
    pub(crate) fn session(&self) -> Session<L, R> {
        Session {
            ledger: self.ledger.clone(),
            registry: self.registry.clone(),
            config: self.config,
        }
    }

    /// Reserves of the `(a, b)` pool, oriented as `(reserve_a, reserve_b)`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PairNotFound`] if the pool does not exist.
    pub fn get_reserves(&self, a: Asset, b: Asset) -> Result<(Amount, Amount), RouterError> {
        self.registry
            .pool(a, b)
            .ok_or(RouterError::PairNotFound)?
            .reserves_for(a)
    }

    /// Deterministic pool address of `(a, b)`, whether or not it exists.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::IdenticalAssets`] or
    /// [`RouterError::ZeroAddress`] for an invalid pair.
    pub fn pair_for(&self, a: Asset, b: Asset) -> Result<Address, RouterError> {
        Ok(AssetPair::new(a, b)?.pool_address())
    }

    /// Amount of B equivalent to `amount_a` at the given reserves.
    ///
    /// # Errors
    ///
    /// See [`math::quote`](crate::math::quote).
    pub fn quote(
        &self,
        amount_a: Amount,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Amount, RouterError> {
        crate::math::quote(amount_a, reserve_a, reserve_b)
    }
}
