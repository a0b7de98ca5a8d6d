//! Seams between the router and its collaborators.
//!
//! - [`TokenLedger`]: balances and (possibly taxed) transfers.
//! - [`PairRegistry`]: pool lookup and creation.
//! - [`Clock`]: the time source for deadlines.
//! - [`FromConfig`]: configuration-driven construction.

mod clock;
mod from_config;
mod pair_registry;
mod token_ledger;

pub use clock::{Clock, FixedClock, SystemClock};
pub use from_config::FromConfig;
pub use pair_registry::PairRegistry;
pub use token_ledger::TokenLedger;
