//! `rxstock-history` — the action log and the one-step undo slot.
//!
//! The log is append-only and newest-first. Undo is deliberately narrow: a
//! single catalog snapshot, overwritten by every stock-affecting mutation,
//! restoring catalog quantities only — never bills.

pub mod log;
pub mod undo;

pub use log::{HistoryEntry, HistoryLog};
pub use undo::UndoSlot;
