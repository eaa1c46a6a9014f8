//! The bill mutation service: create, edit, and delete with compensating
//! stock deltas.
//!
//! Every mutation is synchronous and run-to-completion. Validation happens
//! before the first quantity change, so a rejected mutation leaves no
//! partial state; the one documented exception is the skip-with-warning
//! path for products the catalog no longer knows — the bill is kept, the
//! stock update is skipped, and the skip is reported in the outcome.

use std::collections::HashMap;

use tracing::{debug, warn};

use rxstock_billing::{
    Bill, BillKind, PurchaseBill, PurchaseBillDraft, PurchaseItem, SalesBill, SalesBillDraft,
    SalesItem,
};
use rxstock_catalog::normalize_name;
use rxstock_core::{ConsistencyWarning, DomainError, DomainResult};
use rxstock_ledger::{LotKey, StockLedger};

use crate::signal::StoreSignal;
use crate::store::Store;

/// What a committed mutation did beyond the obvious.
///
/// `warnings` lists quantity clamps (the mutation still committed);
/// `skipped_products` lists products whose stock update was skipped
/// because the catalog no longer knows them. Both are empty on the happy
/// path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationOutcome {
    pub bill_number: String,
    pub warnings: Vec<ConsistencyWarning>,
    pub skipped_products: Vec<String>,
}

impl MutationOutcome {
    fn new(bill_number: &str) -> Self {
        Self {
            bill_number: bill_number.to_string(),
            ..Self::default()
        }
    }
}

/// Per-product quantity totals of a bill's lines, keyed by normalized name
/// (display name kept for messages).
fn purchase_quantities(items: &[PurchaseItem]) -> HashMap<String, (String, i64)> {
    let mut totals: HashMap<String, (String, i64)> = HashMap::new();
    for item in items {
        let entry = totals
            .entry(normalize_name(&item.product))
            .or_insert_with(|| (item.product.clone(), 0));
        entry.1 += i64::from(item.quantity);
    }
    totals
}

fn sales_quantities(items: &[SalesItem]) -> HashMap<String, (String, i64)> {
    let mut totals: HashMap<String, (String, i64)> = HashMap::new();
    for item in items {
        let entry = totals
            .entry(normalize_name(&item.product))
            .or_insert_with(|| (item.product.clone(), 0));
        entry.1 += i64::from(item.quantity_sold);
    }
    totals
}

/// Compensating deltas for an edit: for every product in either version,
/// `original_total - edited_total` (missing side counts as zero). Sorted
/// by name so application order is deterministic.
fn original_minus_edited(
    original: HashMap<String, (String, i64)>,
    edited: HashMap<String, (String, i64)>,
) -> Vec<(String, i64)> {
    let mut deltas: HashMap<String, (String, i64)> = original;
    for (key, (display, qty)) in edited {
        let entry = deltas.entry(key).or_insert_with(|| (display, 0));
        entry.1 -= qty;
    }

    let mut out: Vec<(String, i64)> = deltas
        .into_iter()
        .filter(|(_, (_, delta))| *delta != 0)
        .map(|(key, (display, delta))| {
            debug!(product = %key, delta, "edit compensation");
            (display, delta)
        })
        .collect();
    out.sort_by(|a, b| normalize_name(&a.0).cmp(&normalize_name(&b.0)));
    out
}

impl Store {
    pub(crate) fn purchase_index(&self, bill_number: &str) -> Option<usize> {
        let wanted = bill_number.trim();
        self.purchase_bills
            .iter()
            .position(|b| b.bill_number() == wanted)
    }

    pub(crate) fn sales_index(&self, bill_number: &str) -> Option<usize> {
        let wanted = bill_number.trim();
        self.sales_bills
            .iter()
            .position(|b| b.bill_number() == wanted)
    }

    /// Suggested number for the next bill in a namespace.
    pub fn next_bill_number(&self, kind: BillKind) -> String {
        match kind {
            BillKind::Purchase => self.last_purchase_bill_number.next(),
            BillKind::Sales => self.last_sales_bill_number.next(),
        }
    }

    /// Apply one signed quantity delta to the catalog cache, degrading to
    /// skip-with-warning when the product does not resolve.
    fn apply_delta(
        &mut self,
        product: &str,
        delta: i64,
        outcome: &mut MutationOutcome,
    ) -> DomainResult<()> {
        match self.catalog.adjust_quantity(product, delta) {
            Ok(Some(warning)) => {
                outcome.warnings.push(warning);
                Ok(())
            }
            Ok(None) => {
                debug!(product, delta, "stock adjusted");
                Ok(())
            }
            Err(DomainError::NotFound(_)) => {
                warn!(
                    product,
                    delta, "product not in catalog; stock update skipped, bill kept"
                );
                outcome.skipped_products.push(product.trim().to_string());
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Check a sales bill's lines against lot availability, aggregating
    /// duplicate lot lines within the bill before comparing.
    fn ensure_sales_availability(
        &self,
        bill: &SalesBill,
        ledger: &StockLedger,
    ) -> DomainResult<()> {
        let mut requested: HashMap<LotKey, (String, String, i64)> = HashMap::new();
        for item in bill.items() {
            let Some(key) = LotKey::normalize(&item.product, &item.batch, &item.expiry) else {
                // The builder rejects blank components, so this line is
                // unreachable for bills built in-process; loaded data can
                // still get here and is simply not sellable.
                return Err(DomainError::validation(format!(
                    "line for '{}' has no usable lot identity",
                    item.product
                )));
            };
            let entry = requested
                .entry(key)
                .or_insert_with(|| (item.product.clone(), item.batch.clone(), 0));
            entry.2 += i64::from(item.quantity_sold);
        }

        for (key, (product, batch, quantity)) in &requested {
            let available = ledger.available(key);
            if *quantity > available {
                return Err(DomainError::validation(format!(
                    "insufficient stock for {product} batch {batch}: requested {quantity}, available {available}"
                )));
            }
        }

        Ok(())
    }

    // ---- create

    /// Create a purchase bill: stock arrives.
    ///
    /// Duplicate bill numbers fail before any stock effect, so the bill
    /// insertion and the stock mutation commit together or not at all.
    pub fn create_purchase_bill(
        &mut self,
        draft: PurchaseBillDraft,
    ) -> DomainResult<MutationOutcome> {
        let bill = PurchaseBill::build(draft, &self.catalog)?;
        if self.purchase_index(bill.bill_number()).is_some() {
            return Err(DomainError::duplicate_bill_number(bill.bill_number()));
        }

        self.undo.stash(&self.catalog);
        let mut outcome = MutationOutcome::new(bill.bill_number());
        for item in bill.items() {
            self.apply_delta(&item.product, i64::from(item.quantity), &mut outcome)?;
        }

        self.last_purchase_bill_number.observe(bill.bill_number());
        self.history.record(format!(
            "Created purchase bill {} from {}",
            bill.bill_number(),
            bill.supplier_name()
        ));
        self.purchase_bills.push(bill);

        self.publish(StoreSignal::bills_changed(BillKind::Purchase));
        self.publish(StoreSignal::catalog_changed());
        Ok(outcome)
    }

    /// Create a sales bill: stock leaves.
    ///
    /// Every line must resolve in the catalog, and each lot (aggregated
    /// across the bill's lines) must have enough reconciled stock.
    pub fn create_sales_bill(&mut self, draft: SalesBillDraft) -> DomainResult<MutationOutcome> {
        let bill = SalesBill::build(draft, &self.catalog)?;
        if self.sales_index(bill.bill_number()).is_some() {
            return Err(DomainError::duplicate_bill_number(bill.bill_number()));
        }
        self.ensure_sales_availability(&bill, &self.stock_ledger())?;

        self.undo.stash(&self.catalog);
        let mut outcome = MutationOutcome::new(bill.bill_number());
        for item in bill.items() {
            self.apply_delta(
                &item.product,
                -i64::from(item.quantity_sold),
                &mut outcome,
            )?;
        }

        self.last_sales_bill_number.observe(bill.bill_number());
        self.history.record(format!(
            "Created sales bill {} for {}",
            bill.bill_number(),
            bill.customer_name()
        ));
        self.sales_bills.push(bill);

        self.publish(StoreSignal::bills_changed(BillKind::Sales));
        self.publish(StoreSignal::catalog_changed());
        Ok(outcome)
    }

    // ---- edit

    /// Replace a sales bill in place under the same bill number.
    ///
    /// The original bill's stock effect is reversed and the edited bill's
    /// applied, as one compensating delta per referenced product:
    /// `original - edited` added to the cache. Availability is checked
    /// against the history with the original bill excluded (it is being
    /// replaced).
    pub fn edit_sales_bill(
        &mut self,
        bill_number: &str,
        draft: SalesBillDraft,
    ) -> DomainResult<MutationOutcome> {
        let idx = self.sales_index(bill_number).ok_or_else(|| {
            DomainError::not_found(format!("sales bill '{}'", bill_number.trim()))
        })?;
        if draft.bill_number.trim() != self.sales_bills[idx].bill_number() {
            return Err(DomainError::validation("bill number cannot change on edit"));
        }

        let edited = SalesBill::build(draft, &self.catalog)?;

        let without_original: Vec<SalesBill> = self
            .sales_bills
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, b)| b.clone())
            .collect();
        let ledger = StockLedger::reconcile(&self.purchase_bills, &without_original);
        self.ensure_sales_availability(&edited, &ledger)?;

        let deltas = original_minus_edited(
            sales_quantities(self.sales_bills[idx].items()),
            sales_quantities(edited.items()),
        );

        self.undo.stash(&self.catalog);
        let mut outcome = MutationOutcome::new(edited.bill_number());
        for (product, delta) in deltas {
            self.apply_delta(&product, delta, &mut outcome)?;
        }

        self.history
            .record(format!("Edited sales bill {}", edited.bill_number()));
        self.sales_bills[idx] = edited;

        self.publish(StoreSignal::bills_changed(BillKind::Sales));
        self.publish(StoreSignal::catalog_changed());
        Ok(outcome)
    }

    /// Replace a purchase bill in place under the same bill number.
    ///
    /// Mirror image of the sales edit: the cache moves by
    /// `edited - original` per product.
    pub fn edit_purchase_bill(
        &mut self,
        bill_number: &str,
        draft: PurchaseBillDraft,
    ) -> DomainResult<MutationOutcome> {
        let idx = self.purchase_index(bill_number).ok_or_else(|| {
            DomainError::not_found(format!("purchase bill '{}'", bill_number.trim()))
        })?;
        if draft.bill_number.trim() != self.purchase_bills[idx].bill_number() {
            return Err(DomainError::validation("bill number cannot change on edit"));
        }

        let edited = PurchaseBill::build(draft, &self.catalog)?;

        let deltas = original_minus_edited(
            purchase_quantities(self.purchase_bills[idx].items()),
            purchase_quantities(edited.items()),
        );

        self.undo.stash(&self.catalog);
        let mut outcome = MutationOutcome::new(edited.bill_number());
        for (product, delta) in deltas {
            // Purchases added stock, so the compensation flips sign.
            self.apply_delta(&product, -delta, &mut outcome)?;
        }

        self.history
            .record(format!("Edited purchase bill {}", edited.bill_number()));
        self.purchase_bills[idx] = edited;

        self.publish(StoreSignal::bills_changed(BillKind::Purchase));
        self.publish(StoreSignal::catalog_changed());
        Ok(outcome)
    }

    // ---- delete

    /// Delete a sales bill, restoring every line's quantity.
    pub fn delete_sales_bill(&mut self, bill_number: &str) -> DomainResult<MutationOutcome> {
        let idx = self.sales_index(bill_number).ok_or_else(|| {
            DomainError::not_found(format!("sales bill '{}'", bill_number.trim()))
        })?;
        let bill = self.sales_bills.remove(idx);

        self.undo.stash(&self.catalog);
        let mut outcome = MutationOutcome::new(bill.bill_number());
        for item in bill.items() {
            self.apply_delta(&item.product, i64::from(item.quantity_sold), &mut outcome)?;
        }

        self.history
            .record(format!("Deleted sales bill {}", bill.bill_number()));

        self.publish(StoreSignal::bills_changed(BillKind::Sales));
        self.publish(StoreSignal::catalog_changed());
        Ok(outcome)
    }

    /// Delete a purchase bill.
    ///
    /// Whether the stock effect is reversed is governed by
    /// [`StoreConfig::reverse_purchase_bill_deletes`]: `true` removes the
    /// purchased quantities again (clamped at zero where they were already
    /// sold), `false` reproduces the historical behavior of leaving
    /// quantities untouched.
    ///
    /// [`StoreConfig::reverse_purchase_bill_deletes`]: crate::config::StoreConfig
    pub fn delete_purchase_bill(&mut self, bill_number: &str) -> DomainResult<MutationOutcome> {
        let idx = self.purchase_index(bill_number).ok_or_else(|| {
            DomainError::not_found(format!("purchase bill '{}'", bill_number.trim()))
        })?;
        let bill = self.purchase_bills.remove(idx);

        let mut outcome = MutationOutcome::new(bill.bill_number());
        if self.config.reverse_purchase_bill_deletes {
            self.undo.stash(&self.catalog);
            for item in bill.items() {
                self.apply_delta(&item.product, -i64::from(item.quantity), &mut outcome)?;
            }
        }

        self.history
            .record(format!("Deleted purchase bill {}", bill.bill_number()));

        self.publish(StoreSignal::bills_changed(BillKind::Purchase));
        if self.config.reverse_purchase_bill_deletes {
            self.publish(StoreSignal::catalog_changed());
        }
        Ok(outcome)
    }
}
