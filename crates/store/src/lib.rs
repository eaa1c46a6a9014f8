//! `rxstock-store` — the in-memory session state and mutation service.
//!
//! A [`Store`] holds the catalog, both bill collections, the history log,
//! the undo slot, and the party books, loaded wholesale from an external
//! backing store and exported the same way. All mutations go through it:
//! it validates, applies compensating stock deltas, keeps the bill-number
//! counters, records history, and publishes change signals that
//! subscribers must treat as "reload everything".

pub mod config;
pub mod counter;
pub mod service;
pub mod signal;
pub mod snapshot;
pub mod store;


pub use config::StoreConfig;
pub use counter::BillCounter;
pub use service::MutationOutcome;
pub use signal::StoreSignal;
pub use snapshot::StoreSnapshot;
pub use store::Store;
