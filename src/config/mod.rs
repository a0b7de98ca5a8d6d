//! Validated configuration structs.
//!
//! [`PoolConfig`] holds the parameters every new pool is created with;
//! [`RouterConfig`] holds the router's wrapped-native asset and account.

mod pool_config;
mod router_config;

pub use pool_config::PoolConfig;
pub use router_config::RouterConfig;
