//! Overflow-checked arithmetic and constant-product quoting.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning checked operations of
//! the domain newtypes into [`RouterError`](crate::error::RouterError)
//! results.  The quote functions are pure: they take reserves and a fee
//! and never touch a ledger.

mod checked;
mod swap_math;

pub use checked::CheckedArithmetic;
pub use swap_math::{
    amounts_in, amounts_out, isqrt, quote, quote_amount_in, quote_amount_out, HopReserves,
};
