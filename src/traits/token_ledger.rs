//! Token balance ledger consumed by pools and the router.

use alloy_primitives::Address;

use crate::domain::{Amount, Asset};
use crate::error::RouterError;

/// Fungible-token balances for every asset.
///
/// A transfer may deliver less than `amount` to `to`: fee-on-transfer
/// assets retain part of it.  The sender is always debited the full
/// `amount`.  Callers that need the delivered quantity measure it with
/// [`FotAdjuster`](crate::ledger::FotAdjuster); nothing in this trait
/// exposes a token's fee rate.
pub trait TokenLedger {
    /// Current balance of `holder` in `asset`.
    fn balance_of(&self, asset: Asset, holder: Address) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`RouterError::Overflow`] if the recipient balance would overflow.
    fn transfer(
        &mut self,
        asset: Asset,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), RouterError>;
}
