//! Constant-product reserve pools.
//!
//! A [`ReservePool`] is the on-ledger half of a pair: it owns an account,
//! tracks reserves and shares, and validates every swap against its real
//! balances.  Routing across pools lives in [`crate::router`].

mod reserve_pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use reserve_pool::{ReservePool, MAX_RESERVE};
