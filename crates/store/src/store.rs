//! The in-memory session state.

use std::sync::Arc;

use tracing::info;

use rxstock_billing::{PurchaseBill, SalesBill};
use rxstock_catalog::{Catalog, Product, ProductSpec};
use rxstock_core::{DomainError, DomainResult, ProductId};
use rxstock_events::{InMemorySignalBus, SignalBus, Subscription};
use rxstock_history::{HistoryLog, UndoSlot};
use rxstock_ledger::StockLedger;
use rxstock_parties::{Customer, PartyBook, Supplier};

use crate::config::StoreConfig;
use crate::counter::BillCounter;
use crate::signal::StoreSignal;

/// A single client's working state, loaded wholesale from the backing
/// store. One logical actor, run-to-completion mutations; there is no
/// cross-collection transaction beyond the ordering inside each mutation.
#[derive(Debug)]
pub struct Store {
    pub(crate) catalog: Catalog,
    pub(crate) purchase_bills: Vec<PurchaseBill>,
    pub(crate) sales_bills: Vec<SalesBill>,
    pub(crate) last_purchase_bill_number: BillCounter,
    pub(crate) last_sales_bill_number: BillCounter,
    pub(crate) history: HistoryLog,
    pub(crate) undo: UndoSlot,
    pub(crate) customers: PartyBook<Customer>,
    pub(crate) suppliers: PartyBook<Supplier>,
    pub(crate) config: StoreConfig,
    pub(crate) bus: Arc<InMemorySignalBus<StoreSignal>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            purchase_bills: Vec::new(),
            sales_bills: Vec::new(),
            last_purchase_bill_number: BillCounter::new(),
            last_sales_bill_number: BillCounter::new(),
            history: HistoryLog::new(),
            undo: UndoSlot::new(),
            customers: PartyBook::new(),
            suppliers: PartyBook::new(),
            config,
            bus: Arc::new(InMemorySignalBus::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn purchase_bills(&self) -> &[PurchaseBill] {
        &self.purchase_bills
    }

    pub fn sales_bills(&self) -> &[SalesBill] {
        &self.sales_bills
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn customers(&self) -> &PartyBook<Customer> {
        &self.customers
    }

    pub fn suppliers(&self) -> &PartyBook<Supplier> {
        &self.suppliers
    }

    /// Subscribe to change signals. Every signal means "reload everything".
    pub fn subscribe(&self) -> Subscription<StoreSignal> {
        self.bus.subscribe()
    }

    pub(crate) fn publish(&self, signal: StoreSignal) {
        // Best-effort: a full bus never blocks a committed mutation.
        let _ = self.bus.publish(signal);
    }

    /// Recompute the lot view from the full bill history.
    pub fn stock_ledger(&self) -> StockLedger {
        StockLedger::reconcile(&self.purchase_bills, &self.sales_bills)
    }

    /// Products whose cached quantity disagrees with the reconciled total
    /// (clamped at zero, since the cache is never allowed below it).
    ///
    /// Empty after any clean mutation sequence; a non-empty result means a
    /// clamp happened somewhere in the past or the backing store handed us
    /// diverged data.
    pub fn verify_catalog_consistency(&self) -> Vec<String> {
        let ledger = self.stock_ledger();
        self.catalog
            .products()
            .iter()
            .filter(|p| p.quantity() != ledger.total_for_product(p.name()).max(0))
            .map(|p| p.name().to_string())
            .collect()
    }

    // ---- catalog management (quantity-preserving; stock never moves here)

    pub fn add_product(&mut self, spec: ProductSpec) -> DomainResult<()> {
        let product = Product::new(spec)?;
        let name = product.name().to_string();
        self.catalog.add(product)?;
        self.history.record(format!("Added product {name}"));
        info!(product = %name, "product added");
        self.publish(StoreSignal::catalog_changed());
        Ok(())
    }

    pub fn update_product(&mut self, id: &ProductId, spec: ProductSpec) -> DomainResult<()> {
        self.catalog.update(id, spec)?;
        let name = self
            .catalog
            .get(id)
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        self.history.record(format!("Updated product {name}"));
        self.publish(StoreSignal::catalog_changed());
        Ok(())
    }

    /// Remove a product. Bills that reference it stay untouched: their
    /// lots drop out of the display view but remain in the history.
    pub fn remove_product(&mut self, id: &ProductId) -> DomainResult<()> {
        let removed = self.catalog.remove(id)?;
        self.history
            .record(format!("Removed product {}", removed.name()));
        self.publish(StoreSignal::catalog_changed());
        Ok(())
    }

    // ---- party management (pass-through)

    pub fn add_customer(&mut self, customer: Customer) -> DomainResult<()> {
        let name = customer.name.clone();
        self.customers.add(customer)?;
        self.history.record(format!("Added customer {name}"));
        Ok(())
    }

    pub fn update_customer(&mut self, name: &str, customer: Customer) -> DomainResult<()> {
        self.customers.update(name, customer)?;
        self.history.record(format!("Updated customer {name}"));
        Ok(())
    }

    pub fn remove_customer(&mut self, name: &str) -> DomainResult<()> {
        let removed = self.customers.remove(name)?;
        self.history
            .record(format!("Removed customer {}", removed.name));
        Ok(())
    }

    pub fn add_supplier(&mut self, supplier: Supplier) -> DomainResult<()> {
        let name = supplier.name.clone();
        self.suppliers.add(supplier)?;
        self.history.record(format!("Added supplier {name}"));
        Ok(())
    }

    pub fn update_supplier(&mut self, name: &str, supplier: Supplier) -> DomainResult<()> {
        self.suppliers.update(name, supplier)?;
        self.history.record(format!("Updated supplier {name}"));
        Ok(())
    }

    pub fn remove_supplier(&mut self, name: &str) -> DomainResult<()> {
        let removed = self.suppliers.remove(name)?;
        self.history
            .record(format!("Removed supplier {}", removed.name));
        Ok(())
    }

    // ---- undo

    /// Revert the catalog to its snapshot from just before the most recent
    /// stock-affecting action.
    ///
    /// Contract: this undoes **catalog quantities only** — the bill that
    /// caused the change stays exactly as committed, and only one step is
    /// available (the slot is overwritten by every stock-affecting
    /// mutation). Callers wanting a full reversal must delete or edit the
    /// bill instead.
    pub fn undo_last_stock_change(&mut self) -> DomainResult<()> {
        let snapshot = self
            .undo
            .take()
            .ok_or_else(|| DomainError::validation("nothing to undo"))?;
        self.catalog = snapshot;
        self.history
            .record("Reverted catalog quantities to pre-action snapshot");
        self.publish(StoreSignal::catalog_changed());
        Ok(())
    }
}
