//! `rxstock-ledger` — batch-level stock reconciliation.
//!
//! On-hand stock is a *view*: it is recomputed in full from the purchase and
//! sales bill history every time it is needed, never stored. The replay is a
//! pure function of its inputs, so calling it at any moment — after a
//! mutation, after a reload, twice in a row — always yields the same lots.

pub mod key;
pub mod reconcile;

pub use key::LotKey;
pub use reconcile::{LotStock, ProductLots, StockLedger};
