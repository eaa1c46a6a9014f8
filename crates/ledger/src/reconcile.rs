//! Full-history stock replay.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use rxstock_billing::{Bill, ExpiryDate, PurchaseBill, SalesBill};
use rxstock_catalog::{Catalog, Product, normalize_name};

use crate::key::LotKey;

/// On-hand stock for one lot.
///
/// `quantity_on_hand` is a signed accumulator: transient negatives are
/// tolerated mid-replay (a sale recorded before its purchase in the
/// history), and queries clamp for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotStock {
    /// Display strings preserve the original casing of the first occurrence.
    pub product: String,
    pub batch: String,
    pub expiry: String,
    pub quantity_on_hand: i64,
}

/// One catalog product with its positive lots, expiry-ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLots<'a> {
    pub product: &'a Product,
    pub lots: Vec<&'a LotStock>,
}

/// The reconciled lot map, derived from the complete bill history.
///
/// Reconciliation is total and stateless: no delta state survives between
/// calls, so the result is a pure function of the inputs — at the cost of
/// O(total line items) per call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLedger {
    lots: HashMap<LotKey, LotStock>,
}

impl StockLedger {
    /// Replay every purchase line (additive) and sales line (subtractive)
    /// into a fresh lot map. Lines that fail key normalization are logged
    /// and skipped; they never affect any lot.
    pub fn reconcile(purchase_bills: &[PurchaseBill], sales_bills: &[SalesBill]) -> Self {
        let mut ledger = Self::default();

        for bill in purchase_bills {
            for item in bill.items() {
                match LotKey::normalize(&item.product, &item.batch, &item.expiry) {
                    Some(key) => ledger.accumulate(
                        key,
                        (&item.product, &item.batch, &item.expiry),
                        i64::from(item.quantity),
                    ),
                    None => warn!(
                        bill_number = bill.bill_number(),
                        product = %item.product,
                        "skipping unreconcilable purchase line"
                    ),
                }
            }
        }

        for bill in sales_bills {
            for item in bill.items() {
                match LotKey::normalize(&item.product, &item.batch, &item.expiry) {
                    Some(key) => ledger.accumulate(
                        key,
                        (&item.product, &item.batch, &item.expiry),
                        -i64::from(item.quantity_sold),
                    ),
                    None => warn!(
                        bill_number = bill.bill_number(),
                        product = %item.product,
                        "skipping unreconcilable sales line"
                    ),
                }
            }
        }

        ledger
    }

    fn accumulate(&mut self, key: LotKey, display: (&str, &str, &str), delta: i64) {
        let (product, batch, expiry) = display;
        let lot = self.lots.entry(key).or_insert_with(|| LotStock {
            product: product.to_string(),
            batch: batch.to_string(),
            expiry: expiry.to_string(),
            quantity_on_hand: 0,
        });
        lot.quantity_on_hand += delta;
    }

    pub fn lot(&self, key: &LotKey) -> Option<&LotStock> {
        self.lots.get(key)
    }

    /// Sellable quantity for a lot: the signed accumulator clamped at zero.
    pub fn available(&self, key: &LotKey) -> i64 {
        self.lots
            .get(key)
            .map(|lot| lot.quantity_on_hand.max(0))
            .unwrap_or(0)
    }

    /// Signed total across every lot of a product, case-insensitively.
    ///
    /// This is the number the catalog's cached `quantity` must agree with
    /// after any committed mutation.
    pub fn total_for_product(&self, name: &str) -> i64 {
        let wanted = normalize_name(name);
        self.lots
            .iter()
            .filter(|(key, _)| key.product() == wanted)
            .map(|(_, lot)| lot.quantity_on_hand)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LotKey, &LotStock)> {
        self.lots.iter()
    }

    /// Per-product lot breakdown for display.
    ///
    /// Products are resolved through the catalog case-insensitively; lots
    /// whose product no longer exists are dropped from the view (their
    /// history stays replayable). Only lots with positive quantity are
    /// listed, sorted by parsed expiry ascending; lots with unparsable
    /// expiry sort last, keeping their relative order.
    pub fn product_breakdown<'a>(&'a self, catalog: &'a Catalog) -> Vec<ProductLots<'a>> {
        let mut by_product: HashMap<String, Vec<&LotStock>> = HashMap::new();
        for (key, lot) in &self.lots {
            if lot.quantity_on_hand > 0 {
                by_product
                    .entry(key.product().to_string())
                    .or_default()
                    .push(lot);
            }
        }

        let mut breakdown = Vec::new();
        for product in catalog {
            let Some(mut lots) = by_product.remove(&normalize_name(product.name())) else {
                continue;
            };
            // HashMap iteration order is arbitrary; fix it before the
            // stable expiry sort so "stable" means something.
            lots.sort_by(|a, b| (&a.batch, &a.expiry).cmp(&(&b.batch, &b.expiry)));
            lots.sort_by_key(|lot| {
                let parsed = ExpiryDate::parse(&lot.expiry);
                (parsed.is_none(), parsed)
            });
            breakdown.push(ProductLots { product, lots });
        }

        breakdown
    }

    /// Positive lots whose parsed expiry falls strictly before `cutoff`.
    pub fn expiring_before(&self, cutoff: NaiveDate) -> Vec<&LotStock> {
        let mut lots: Vec<&LotStock> = self
            .lots
            .values()
            .filter(|lot| lot.quantity_on_hand > 0)
            .filter(|lot| {
                ExpiryDate::parse(&lot.expiry)
                    .is_some_and(|expiry| expiry.first_of_month() < cutoff)
            })
            .collect();
        lots.sort_by(|a, b| {
            (ExpiryDate::parse(&a.expiry), &a.product, &a.batch)
                .cmp(&(ExpiryDate::parse(&b.expiry), &b.product, &b.batch))
        });
        lots
    }
}
