//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use fot_router::prelude::*;
//! ```

pub use crate::domain::{
    Amount, AmountsIn, AmountsOut, Asset, AssetPair, BasisPoints, Deadline, FeeTier, Liquidity,
    Rounding, SwapPath,
};

pub use crate::traits::{Clock, FixedClock, FromConfig, PairRegistry, SystemClock, TokenLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{PoolConfig, RouterConfig};

pub use crate::error::{Result, RouterError};

pub use crate::factory::PoolRegistry;

pub use crate::ledger::{FotAdjuster, InMemoryLedger};

pub use crate::pools::ReservePool;

pub use crate::router::{
    AddLiquidity, AddLiquidityEth, ExecutionState, RemoveLiquidity, RemoveLiquidityEth, Router,
};
