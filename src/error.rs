//! Unified error type for the router, its pools and its ledger.
//!
//! Every fallible operation in the crate returns [`RouterError`].  Errors
//! are never recovered locally: a failure anywhere in a multi-step call
//! aborts the call and the router discards every state change it made.

use thiserror::Error;

/// Errors produced by quoting, pool bookkeeping, ledger transfers and
/// router orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The call was observed after its deadline.
    #[error("deadline expired")]
    DeadlineExpired,

    /// The (FOT-corrected) output is below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// The required input exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// A zero or missing input where a positive one is required.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Pool reserves are zero or too small for the requested direction.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The post-swap constant-product check failed.
    ///
    /// Unreachable under correct fee accounting; it signals a logic or
    /// integration bug, such as an unflagged asset that taxes transfers.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// A burn exceeds the holder's share balance.
    #[error("insufficient shares")]
    InsufficientShares,

    /// Path shorter than two assets, FOT flag count mismatch, or a native
    /// leg in the wrong position.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// A zero amount passed to a ratio quote.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// Actual amount of the first asset is below the caller's minimum.
    #[error("insufficient amount of asset A")]
    InsufficientAmountA,

    /// Actual amount of the second asset is below the caller's minimum.
    #[error("insufficient amount of asset B")]
    InsufficientAmountB,

    /// A deposit too small to mint any share.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A burn too small to return any token.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// A ledger transfer exceeds the sender's balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Both sides of a pair are the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// The zero address was used as an asset.
    #[error("zero address")]
    ZeroAddress,

    /// `create_pair` for a pair that already exists.
    #[error("pair already exists")]
    PairExists,

    /// No pool is registered for the requested pair.
    #[error("pair not found")]
    PairNotFound,

    /// A pool was asked to pay out to one of its own assets.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// A fee of 100% or more.
    #[error("invalid fee")]
    InvalidFee,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Arithmetic overflow, with the computation that overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow, with the computation that underflowed.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, RouterError>;
