//! Token ledger implementation and fee-on-transfer measurement.
//!
//! [`InMemoryLedger`] is a [`TokenLedger`](crate::traits::TokenLedger) whose
//! assets may burn a share of every transfer.  [`FotAdjuster`] measures
//! what a transfer actually delivered and sizes sends that must deliver a
//! given amount.

mod fot_adjuster;
mod in_memory;

pub use fot_adjuster::{measure_actual_received, FotAdjuster, PendingMeasurement};
pub use in_memory::InMemoryLedger;
