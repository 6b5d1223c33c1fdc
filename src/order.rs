use chrono::NaiveDateTime;
use tracing::debug;

use crate::catalog::{self, CatalogError, CatalogItem, CATALOG, CATALOG_LEN};
use crate::model::{CustomerInfo, DeliveryInfo, Quantity};
use crate::receipt::{Receipt, ReceiptError};
use crate::validate::{validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub item: &'static CatalogItem,
    pub quantity: Quantity,
}

/// Quantities for every catalog item plus the confirmed flag.
///
/// Lines are indexed like `CATALOG`, so each item appears exactly once and
/// iteration follows menu order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    quantities: [Quantity; CATALOG_LEN],
    confirmed: bool,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self {
            quantities: [Quantity::ZERO; CATALOG_LEN],
            confirmed: false,
        }
    }

    pub fn set_quantity(&mut self, item: &str, qty: Quantity) -> Result<(), CatalogError> {
        let idx = catalog::position(item)?;
        debug!(item, qty = qty.get(), "quantity set");
        self.quantities[idx] = qty;
        Ok(())
    }

    pub fn quantity(&self, item: &str) -> Result<Quantity, CatalogError> {
        catalog::position(item).map(|idx| self.quantities[idx])
    }

    pub fn reset(&mut self) {
        self.quantities = [Quantity::ZERO; CATALOG_LEN];
        self.confirmed = false;
    }

    /// Runs the validator; on failure nothing changes, including an earlier confirmation.
    pub fn confirm(
        &mut self,
        customer: &CustomerInfo,
        delivery: &DeliveryInfo,
    ) -> Result<(), ValidationError> {
        validate(customer, delivery, self)?;
        self.confirmed = true;
        Ok(())
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn total_quantity(&self) -> u32 {
        self.quantities.iter().map(|q| q.get() as u32).sum()
    }

    pub fn lines(&self) -> impl Iterator<Item = OrderLine> + '_ {
        CATALOG
            .iter()
            .zip(self.quantities.iter())
            .map(|(item, &quantity)| OrderLine { item, quantity })
    }

    pub fn ordered_lines(&self) -> impl Iterator<Item = OrderLine> + '_ {
        self.lines().filter(|l| l.quantity.get() > 0)
    }

    pub fn subtotal(&self) -> u32 {
        self.ordered_lines()
            .map(|l| l.item.unit_price * l.quantity.get() as u32)
            .sum()
    }
}

/// Everything one customer is editing. Each interactive run owns exactly one.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub customer: CustomerInfo,
    pub delivery: DeliveryInfo,
    pub draft: OrderDraft,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm(&mut self) -> Result<(), ValidationError> {
        let outcome = self.draft.confirm(&self.customer, &self.delivery);
        debug!(?outcome, total = self.draft.total_quantity(), "confirm attempted");
        outcome
    }

    pub fn reset(&mut self) {
        self.draft.reset();
        debug!("order reset");
    }

    pub fn receipt(&self, at: NaiveDateTime) -> Result<Receipt, ReceiptError> {
        Receipt::build(&self.draft, &self.customer, &self.delivery, at)
    }
}
