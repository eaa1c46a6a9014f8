//! `rxstock-parties` — customers and suppliers.
//!
//! Plain contact records with pass-through CRUD; parties never interact
//! with stock. Names are the key, matched case-insensitively.

pub mod party;

pub use party::{ContactInfo, Customer, Party, PartyBook, Supplier};
