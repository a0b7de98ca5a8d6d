//! Pool creation and lookup.
//!
//! [`PoolRegistry`] is the in-memory
//! [`PairRegistry`](crate::traits::PairRegistry): it creates a
//! [`ReservePool`](crate::pools::ReservePool) per canonical asset pair,
//! at a deterministic address, with the parameters of its
//! [`PoolConfig`](crate::config::PoolConfig).

mod pool_registry;

pub use pool_registry::PoolRegistry;
