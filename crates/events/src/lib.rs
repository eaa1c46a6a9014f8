//! `rxstock-events` — change-notification mechanics.
//!
//! The store emits typed signals after every committed mutation; UI
//! collaborators subscribe and reload wholesale. This crate carries only
//! the mechanics (trait + bus + subscription); the concrete signal types
//! live with their emitter.

pub mod bus;
pub mod in_memory_bus;
pub mod signal;

pub use bus::{SignalBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemorySignalBus};
pub use signal::Signal;
