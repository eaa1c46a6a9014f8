//! `rxstock-costing` — pack-based pricing arithmetic.
//!
//! Pure functions only: no state, no IO. All amounts are `f64` and no
//! rounding is applied here; presentation rounding belongs to the caller.

pub mod margin;

pub use margin::{LineCosting, compute_profit_and_margin, line_amount, sales_unit_price};
