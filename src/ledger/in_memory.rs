//! In-memory token ledger with per-asset transfer tax.

use std::collections::BTreeMap;

use alloy_primitives::Address;
use tracing::trace;

use crate::domain::{Amount, Asset, BasisPoints, Rounding};
use crate::error::RouterError;
use crate::math::CheckedArithmetic;
use crate::traits::TokenLedger;

/// Balances for any number of assets, some of which may tax transfers.
///
/// A taxed transfer debits the sender the full amount, credits the
/// recipient `amount − floor(amount × tax / 10 000)` and burns the
/// difference from the asset's total supply.  Assets without a configured
/// tax behave as ordinary tokens.
///
/// The ledger is `Clone`, which the router relies on for copy-on-write
/// atomicity and for read-only simulation.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use fot_router::domain::{Amount, Asset, BasisPoints};
/// use fot_router::ledger::InMemoryLedger;
/// use fot_router::traits::TokenLedger;
///
/// let taxed = Asset::new(Address::repeat_byte(1));
/// let (alice, bob) = (Address::repeat_byte(0xa1), Address::repeat_byte(0xb0));
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.set_transfer_tax(taxed, BasisPoints::new(1_000)).expect("valid tax");
/// ledger.mint(taxed, alice, Amount::new(1_000)).expect("mint");
/// ledger.transfer(taxed, alice, bob, Amount::new(1_000)).expect("transfer");
///
/// assert_eq!(ledger.balance_of(taxed, bob), Amount::new(900));
/// assert_eq!(ledger.total_supply(taxed), Amount::new(900));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<(Asset, Address), Amount>,
    supplies: BTreeMap<Asset, Amount>,
    transfer_tax: BTreeMap<Asset, BasisPoints>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the share of every transfer of `asset` that is burned.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidFee`] if `tax` exceeds 100%.
    pub fn set_transfer_tax(&mut self, asset: Asset, tax: BasisPoints) -> Result<(), RouterError> {
        if !tax.is_valid_percent() {
            return Err(RouterError::InvalidFee);
        }
        if tax == BasisPoints::ZERO {
            self.transfer_tax.remove(&asset);
        } else {
            self.transfer_tax.insert(asset, tax);
        }
        Ok(())
    }

    /// Transfer tax of `asset`; zero for ordinary assets.
    #[must_use]
    pub fn transfer_tax(&self, asset: Asset) -> BasisPoints {
        self.transfer_tax
            .get(&asset)
            .copied()
            .unwrap_or(BasisPoints::ZERO)
    }

    /// Creates `amount` new units of `asset` for `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if the balance or supply overflows.
    pub fn mint(&mut self, asset: Asset, holder: Address, amount: Amount) -> Result<(), RouterError> {
        let supply = self
            .total_supply(asset)
            .add_or(&amount, "total supply")?;
        let balance = self
            .balance_of(asset, holder)
            .add_or(&amount, "balance")?;
        self.supplies.insert(asset, supply);
        self.balances.insert((asset, holder), balance);
        trace!(%asset, %holder, %amount, "mint");
        Ok(())
    }

    /// Total units of `asset` in existence.
    #[must_use]
    pub fn total_supply(&self, asset: Asset) -> Amount {
        self.supplies.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    fn set_balance(&mut self, asset: Asset, holder: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(asset, holder));
        } else {
            self.balances.insert((asset, holder), amount);
        }
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, asset: Asset, holder: Address) -> Amount {
        self.balances
            .get(&(asset, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        asset: Asset,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), RouterError> {
        let from_balance = self.balance_of(asset, from);
        if from_balance < amount {
            return Err(RouterError::InsufficientBalance);
        }
        let burned = self.transfer_tax(asset).apply(amount, Rounding::Down)?;
        let delivered = amount.sub_or(&burned, "delivered amount")?;

        let debited = from_balance.sub_or(&amount, "sender balance")?;
        self.set_balance(asset, from, debited);
        let credited = self
            .balance_of(asset, to)
            .add_or(&delivered, "recipient balance")?;
        self.set_balance(asset, to, credited);

        if !burned.is_zero() {
            let supply = self
                .total_supply(asset)
                .sub_or(&burned, "total supply")?;
            self.supplies.insert(asset, supply);
        }
        trace!(%asset, %from, %to, %amount, %delivered, "transfer");
        Ok(())
    }
}
