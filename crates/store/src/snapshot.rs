//! Wholesale load/export of the persisted state.
//!
//! The backing store is an external collaborator; it hands over every
//! collection at session start and takes them back verbatim. This module
//! is the ingestion boundary: every record is validated here, once, and
//! legacy collection names (`bills`, `lastBillNumber`) are absorbed via
//! serde aliases.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use rxstock_billing::{Bill, BillKind, PurchaseBill, SalesBill};
use rxstock_catalog::{Catalog, Product, normalize_name};
use rxstock_core::{DomainError, DomainResult};
use rxstock_events::InMemorySignalBus;
use rxstock_history::{HistoryLog, UndoSlot};
use rxstock_parties::{Customer, Party, PartyBook, Supplier};

use crate::config::StoreConfig;
use crate::counter::BillCounter;
use crate::signal::StoreSignal;
use crate::store::Store;

/// The full persisted state, shaped the way the backing store keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub purchase_bills: Vec<PurchaseBill>,
    /// The sales collection was historically named just `bills`.
    #[serde(alias = "bills")]
    pub sales_bills: Vec<SalesBill>,
    /// The purchase counter was historically named `lastBillNumber`.
    #[serde(alias = "lastBillNumber")]
    pub last_purchase_bill_number: BillCounter,
    pub last_sales_bill_number: BillCounter,
    pub history: HistoryLog,
    pub customers: PartyBook<Customer>,
    pub suppliers: PartyBook<Supplier>,
}

impl StoreSnapshot {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::validation(format!("snapshot: {e}")))
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::validation(format!("snapshot: {e}")))
    }
}

fn ensure_unique_bill_numbers<B: Bill>(bills: &[B]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for bill in bills {
        if !seen.insert(bill.bill_number().to_string()) {
            return Err(DomainError::duplicate_bill_number(bill.bill_number()));
        }
    }
    Ok(())
}

fn ensure_unique_party_names<T: Party>(book: &PartyBook<T>, label: &str) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for entry in book.entries() {
        if !seen.insert(normalize_name(entry.name())) {
            return Err(DomainError::validation(format!(
                "duplicate {label} '{}' in snapshot",
                entry.name()
            )));
        }
    }
    Ok(())
}

impl Store {
    /// Build a session from a snapshot, validating every record.
    ///
    /// Rejects duplicate product names (case-insensitively), duplicate
    /// bill numbers within a namespace, malformed bills, and duplicate
    /// party names. Counters resume from the stored value or the largest
    /// numeric bill number, whichever is higher.
    pub fn from_snapshot(snapshot: StoreSnapshot, config: StoreConfig) -> DomainResult<Self> {
        let mut catalog = Catalog::new();
        for product in snapshot.products {
            catalog.add(product)?;
        }

        ensure_unique_bill_numbers(&snapshot.purchase_bills)?;
        ensure_unique_bill_numbers(&snapshot.sales_bills)?;

        let mut last_purchase_bill_number = snapshot.last_purchase_bill_number;
        for bill in &snapshot.purchase_bills {
            bill.validate_loaded()?;
            last_purchase_bill_number.observe(bill.bill_number());
        }

        let mut last_sales_bill_number = snapshot.last_sales_bill_number;
        for bill in &snapshot.sales_bills {
            bill.validate_loaded()?;
            last_sales_bill_number.observe(bill.bill_number());
        }

        ensure_unique_party_names(&snapshot.customers, "customer")?;
        ensure_unique_party_names(&snapshot.suppliers, "supplier")?;

        Ok(Self {
            catalog,
            purchase_bills: snapshot.purchase_bills,
            sales_bills: snapshot.sales_bills,
            last_purchase_bill_number,
            last_sales_bill_number,
            history: snapshot.history,
            undo: UndoSlot::new(),
            customers: snapshot.customers,
            suppliers: snapshot.suppliers,
            config,
            bus: Arc::new(InMemorySignalBus::new()),
        })
    }

    /// Replace this session's state from a fresh snapshot, keeping the
    /// signal bus (and its subscribers) and the config.
    ///
    /// This is the "data changed" reload path: the backing store says
    /// something changed, the embedder re-fetches everything and swaps it
    /// in. The undo slot is cleared — it described state that no longer
    /// exists.
    pub fn reload_from_snapshot(&mut self, snapshot: StoreSnapshot) -> DomainResult<()> {
        let fresh = Store::from_snapshot(snapshot, self.config)?;

        self.catalog = fresh.catalog;
        self.purchase_bills = fresh.purchase_bills;
        self.sales_bills = fresh.sales_bills;
        self.last_purchase_bill_number = fresh.last_purchase_bill_number;
        self.last_sales_bill_number = fresh.last_sales_bill_number;
        self.history = fresh.history;
        self.customers = fresh.customers;
        self.suppliers = fresh.suppliers;
        self.undo = UndoSlot::new();

        self.publish(StoreSignal::bills_changed(BillKind::Purchase));
        self.publish(StoreSignal::bills_changed(BillKind::Sales));
        self.publish(StoreSignal::catalog_changed());
        Ok(())
    }

    /// Export the full state for the backing store.
    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            products: self.catalog.products().to_vec(),
            purchase_bills: self.purchase_bills.clone(),
            sales_bills: self.sales_bills.clone(),
            last_purchase_bill_number: self.last_purchase_bill_number,
            last_sales_bill_number: self.last_sales_bill_number,
            history: self.history.clone(),
            customers: self.customers.clone(),
            suppliers: self.suppliers.clone(),
        }
    }
}
