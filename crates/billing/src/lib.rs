//! `rxstock-billing` — purchase and sales bill records.
//!
//! Bills are built from *drafts* (raw user input) against the current
//! catalog: the builders validate shape, derive line amounts and costing
//! figures, and return immutable records. Stock-aware validation (lot
//! availability) is the mutation service's job, not this crate's.

pub mod bill;
pub mod expiry;
pub mod purchase;
pub mod sales;

pub use bill::{Bill, BillKind};
pub use expiry::ExpiryDate;
pub use purchase::{PurchaseBill, PurchaseBillDraft, PurchaseItem, PurchaseItemDraft};
pub use sales::{SalesBill, SalesBillDraft, SalesItem, SalesItemDraft};
