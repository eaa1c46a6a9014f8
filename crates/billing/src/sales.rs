//! Sales bills: stock leaves, priced per individual item off the pack MRP.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rxstock_catalog::Catalog;
use rxstock_core::{DomainError, DomainResult};
use rxstock_costing::{line_amount, sales_unit_price};

use crate::bill::{Bill, BillKind, validate_bill_number, validate_party_name, validate_percentage};
use crate::expiry::ExpiryDate;

/// Raw sales line as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesItemDraft {
    pub product: String,
    pub batch: String,
    /// Canonical `MM-YYYY`.
    pub expiry: String,
    /// Individual items sold.
    pub quantity_sold: u32,
    pub discount: f64,
}

/// A validated sales line with its derived amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesItem {
    pub product: String,
    pub batch: String,
    pub expiry: String,
    pub quantity_sold: u32,
    /// Pack MRP divided by the pack size, both taken from the catalog at
    /// build time.
    pub price_per_item: f64,
    pub discount: f64,
    pub total_item_amount: f64,
}

impl SalesItem {
    /// Validate a draft and derive its amounts.
    ///
    /// Unlike purchases, a sales line *must* resolve in the catalog: the
    /// unit price comes from the product's pack economics, and selling a
    /// product the catalog does not know is a data-entry error.
    pub fn build(draft: SalesItemDraft, catalog: &Catalog) -> DomainResult<Self> {
        let product_name = draft.product.trim().to_string();
        if product_name.is_empty() {
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
        if draft.quantity_sold == 0 {
            return Err(DomainError::validation("quantity must be a positive integer"));
        }
        validate_percentage(draft.discount, "discount")?;

        let product = catalog.find(&product_name).ok_or_else(|| {
            DomainError::validation(format!("product '{product_name}' is not in the catalog"))
        })?;

        let price_per_item =
            sales_unit_price(product.mrp(), f64::from(product.items_per_pack())).ok_or_else(
                || {
                    DomainError::validation(format!(
                        "product '{product_name}' has no usable pack price"
                    ))
                },
            )?;
        let total_item_amount = line_amount(
            f64::from(draft.quantity_sold),
            price_per_item,
            draft.discount,
        )
        .ok_or_else(|| DomainError::validation("line amount is not computable"))?;

        Ok(Self {
            product: product_name,
            batch,
            expiry,
            quantity_sold: draft.quantity_sold,
            price_per_item,
            discount: draft.discount,
            total_item_amount,
        })
    }
}

/// Raw sales bill as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBillDraft {
    pub bill_number: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub items: Vec<SalesItemDraft>,
}

/// A committed sales bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBill {
    bill_number: String,
    date: NaiveDate,
    customer_name: String,
    items: Vec<SalesItem>,
    total_amount: f64,
}

impl SalesBill {
    /// Validate a draft into a bill. Lot availability is checked by the
    /// mutation service, not here.
    pub fn build(draft: SalesBillDraft, catalog: &Catalog) -> DomainResult<Self> {
        let bill_number = validate_bill_number(&draft.bill_number)?;
        let customer_name = validate_party_name(&draft.customer_name, "customer name")?;
        if draft.items.is_empty() {
            return Err(DomainError::validation(
                "a sales bill needs at least one item",
            ));
        }

        let items = draft
            .items
            .into_iter()
            .map(|item| SalesItem::build(item, catalog))
            .collect::<DomainResult<Vec<_>>>()?;
        let total_amount = items.iter().map(|i| i.total_item_amount).sum();

        Ok(Self {
            bill_number,
            date: draft.date,
            customer_name,
            items,
            total_amount,
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn items(&self) -> &[SalesItem] {
        &self.items
    }

    /// Lenient shape check for records arriving from the backing store.
    pub fn validate_loaded(&self) -> DomainResult<()> {
        if self.bill_number.trim().is_empty() {
            return Err(DomainError::validation("bill number cannot be empty"));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation(format!(
                "sales bill '{}' has no items",
                self.bill_number
            )));
        }
        for item in &self.items {
            if item.quantity_sold == 0 {
                return Err(DomainError::validation(format!(
                    "sales bill '{}': zero-quantity line for '{}'",
                    self.bill_number, item.product
                )));
            }
        }
        Ok(())
    }
}

impl Bill for SalesBill {
    fn bill_number(&self) -> &str {
        &self.bill_number
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn kind(&self) -> BillKind {
        BillKind::Sales
    }

    fn total_amount(&self) -> f64 {
        self.total_amount
    }
}
