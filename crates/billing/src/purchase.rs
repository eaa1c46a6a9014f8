//! Purchase bills: stock arrives, priced per pack at PTR.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rxstock_catalog::Catalog;
use rxstock_core::{DomainError, DomainResult};
use rxstock_costing::compute_profit_and_margin;

use crate::bill::{
    Bill, BillKind, validate_bill_number, validate_party_name, validate_percentage,
    validate_price,
};
use crate::expiry::ExpiryDate;

/// Raw purchase line as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItemDraft {
    pub product: String,
    pub batch: String,
    /// Canonical `MM-YYYY`.
    pub expiry: String,
    /// Total individual items purchased.
    pub quantity: u32,
    /// Price to retailer, per pack.
    pub ptr: f64,
    pub items_per_pack: u32,
    /// Entered/confirmed MRP per pack.
    pub mrp: f64,
    pub discount: f64,
}

/// A validated purchase line with its derived amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub product: String,
    pub batch: String,
    pub expiry: String,
    pub quantity: u32,
    pub ptr: f64,
    pub items_per_pack: u32,
    pub mrp: f64,
    /// Catalog MRP at time of entry; informational only. `None` when the
    /// product did not resolve in the catalog at build time.
    pub original_mrp: Option<f64>,
    pub discount: f64,
    /// Amount paid for the line (PTR after discount).
    pub total_item_amount: f64,
    pub calculated_profit_per_pack: Option<f64>,
    pub calculated_total_profit: Option<f64>,
    pub calculated_margin: Option<f64>,
}

impl PurchaseItem {
    /// Validate a draft and derive its amounts.
    ///
    /// The product does not have to resolve in the catalog — a purchase
    /// line for an unknown product is still a historical record; only its
    /// `original_mrp` stays empty. The costing fields are `None` whenever
    /// the calculator's domain rejects the inputs (e.g. a zero MRP).
    pub fn build(draft: PurchaseItemDraft, catalog: &Catalog) -> DomainResult<Self> {
        let product = draft.product.trim().to_string();
        if product.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        let batch = draft.batch.trim().to_string();
        if batch.is_empty() {
            return Err(DomainError::validation("batch cannot be empty"));
        }
        let expiry = draft.expiry.trim().to_string();
        if !ExpiryDate::is_canonical(&expiry) {
            return Err(DomainError::validation(format!(
                "expiry '{expiry}' must be in MM-YYYY format"
            )));
        }
        if draft.quantity == 0 {
            return Err(DomainError::validation("quantity must be a positive integer"));
        }
        if draft.items_per_pack == 0 {
            return Err(DomainError::validation("items per pack must be at least 1"));
        }
        validate_price(draft.ptr, "PTR")?;
        validate_price(draft.mrp, "MRP")?;
        validate_percentage(draft.discount, "discount")?;

        let original_mrp = catalog.find(&product).map(|p| p.mrp());

        let packs = f64::from(draft.quantity) / f64::from(draft.items_per_pack);
        let total_item_amount = draft.ptr * packs * (1.0 - draft.discount / 100.0);

        let costing = compute_profit_and_margin(
            f64::from(draft.quantity),
            draft.ptr,
            f64::from(draft.items_per_pack),
            draft.mrp,
            draft.discount,
        );

        Ok(Self {
            product,
            batch,
            expiry,
            quantity: draft.quantity,
            ptr: draft.ptr,
            items_per_pack: draft.items_per_pack,
            mrp: draft.mrp,
            original_mrp,
            discount: draft.discount,
            total_item_amount,
            calculated_profit_per_pack: costing.map(|c| c.profit_per_pack),
            calculated_total_profit: costing.map(|c| c.total_profit),
            calculated_margin: costing.and_then(|c| c.margin_pct),
        })
    }
}

/// Raw purchase bill as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseBillDraft {
    pub bill_number: String,
    pub date: NaiveDate,
    pub supplier_name: String,
    pub items: Vec<PurchaseItemDraft>,
}

/// A committed purchase bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseBill {
    bill_number: String,
    date: NaiveDate,
    supplier_name: String,
    items: Vec<PurchaseItem>,
    total_amount: f64,
}

impl PurchaseBill {
    /// Validate a draft into a bill, deriving every line's amounts and the
    /// bill total.
    pub fn build(draft: PurchaseBillDraft, catalog: &Catalog) -> DomainResult<Self> {
        let bill_number = validate_bill_number(&draft.bill_number)?;
        let supplier_name = validate_party_name(&draft.supplier_name, "supplier name")?;
        if draft.items.is_empty() {
            return Err(DomainError::validation(
                "a purchase bill needs at least one item",
            ));
        }

        let items = draft
            .items
            .into_iter()
            .map(|item| PurchaseItem::build(item, catalog))
            .collect::<DomainResult<Vec<_>>>()?;
        let total_amount = items.iter().map(|i| i.total_item_amount).sum();

        Ok(Self {
            bill_number,
            date: draft.date,
            supplier_name,
            items,
            total_amount,
        })
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn items(&self) -> &[PurchaseItem] {
        &self.items
    }

    /// Lenient shape check for records arriving from the backing store.
    /// Legacy `MM-YY` expiries are accepted here; only new input is held to
    /// the canonical format.
    pub fn validate_loaded(&self) -> DomainResult<()> {
        if self.bill_number.trim().is_empty() {
            return Err(DomainError::validation("bill number cannot be empty"));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation(format!(
                "purchase bill '{}' has no items",
                self.bill_number
            )));
        }
        for item in &self.items {
            if item.quantity == 0 {
                return Err(DomainError::validation(format!(
                    "purchase bill '{}': zero-quantity line for '{}'",
                    self.bill_number, item.product
                )));
            }
        }
        Ok(())
    }
}

impl Bill for PurchaseBill {
    fn bill_number(&self) -> &str {
        &self.bill_number
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn kind(&self) -> BillKind {
        BillKind::Purchase
    }

    fn total_amount(&self) -> f64 {
        self.total_amount
    }
}
