//! Profit and margin derivation for purchase lines, and the unit-price /
//! line-amount helpers shared with sales lines.
//!
//! Quantities are individual items; prices are per pack. A pack contains
//! `items_per_pack` items, and fractional packs are allowed (a bill can buy
//! half a pack).

use serde::{Deserialize, Serialize};

/// Derived costing figures for one purchase line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineCosting {
    /// Profit per pack if the whole pack sells at MRP.
    pub profit_per_pack: f64,
    /// Profit across the line if everything sells at MRP.
    pub total_profit: f64,
    /// Margin as a percentage of potential revenue; `None` when potential
    /// revenue is not positive.
    pub margin_pct: Option<f64>,
    /// Amount actually paid for the line (PTR, after discount).
    pub total_item_amount: f64,
}

/// Derive profit, margin, and amount paid for a purchase line.
///
/// Returns `None` when the inputs cannot produce a meaningful answer:
/// any non-finite value, `quantity_items <= 0`, `items_per_pack <= 0`,
/// `mrp_per_pack <= 0`, `ptr_per_pack < 0`, or `discount_pct < 0`.
pub fn compute_profit_and_margin(
    quantity_items: f64,
    ptr_per_pack: f64,
    items_per_pack: f64,
    mrp_per_pack: f64,
    discount_pct: f64,
) -> Option<LineCosting> {
    let inputs = [
        quantity_items,
        ptr_per_pack,
        items_per_pack,
        mrp_per_pack,
        discount_pct,
    ];
    if inputs.iter().any(|v| !v.is_finite()) {
        return None;
    }
    if quantity_items <= 0.0
        || items_per_pack <= 0.0
        || mrp_per_pack <= 0.0
        || ptr_per_pack < 0.0
        || discount_pct < 0.0
    {
        return None;
    }

    let number_of_packs = quantity_items / items_per_pack;
    let total_amount_paid = ptr_per_pack * number_of_packs * (1.0 - discount_pct / 100.0);
    let total_potential_revenue = mrp_per_pack * number_of_packs;
    let total_profit = total_potential_revenue - total_amount_paid;
    let profit_per_pack = total_profit / number_of_packs;
    let margin_pct = if total_potential_revenue > 0.0 {
        Some(total_profit / total_potential_revenue * 100.0)
    } else {
        None
    };

    Some(LineCosting {
        profit_per_pack,
        total_profit,
        margin_pct,
        total_item_amount: total_amount_paid,
    })
}

/// Price of one individual item given the pack price.
///
/// Returns `None` for non-finite inputs, negative pack price, or a
/// non-positive pack size.
pub fn sales_unit_price(pack_price: f64, items_per_pack: f64) -> Option<f64> {
    if !pack_price.is_finite() || !items_per_pack.is_finite() {
        return None;
    }
    if pack_price < 0.0 || items_per_pack <= 0.0 {
        return None;
    }
    Some(pack_price / items_per_pack)
}

/// Discounted amount for a line of `quantity` items at `unit_price` each.
pub fn line_amount(quantity: f64, unit_price: f64, discount_pct: f64) -> Option<f64> {
    if !quantity.is_finite() || !unit_price.is_finite() || !discount_pct.is_finite() {
        return None;
    }
    if quantity <= 0.0 || unit_price < 0.0 || discount_pct < 0.0 {
        return None;
    }
    Some(quantity * unit_price * (1.0 - discount_pct / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn worked_example_two_packs_ten_percent_discount() {
        // 20 items in packs of 10: 2 packs. PTR 80, MRP 100, 10% discount.
        let costing = compute_profit_and_margin(20.0, 80.0, 10.0, 100.0, 10.0).unwrap();

        assert!(close(costing.total_item_amount, 144.0));
        assert!(close(costing.total_profit, 56.0));
        assert!(close(costing.profit_per_pack, 28.0));
        assert!(close(costing.margin_pct.unwrap(), 28.0));
    }

    #[test]
    fn fractional_packs_are_allowed() {
        // 5 items in packs of 10: half a pack, no discount.
        let costing = compute_profit_and_margin(5.0, 80.0, 10.0, 100.0, 0.0).unwrap();

        assert!(close(costing.total_item_amount, 40.0));
        assert!(close(costing.total_profit, 10.0));
        assert!(close(costing.profit_per_pack, 20.0));
    }

    #[test]
    fn rejects_out_of_domain_inputs() {
        assert!(compute_profit_and_margin(0.0, 80.0, 10.0, 100.0, 0.0).is_none());
        assert!(compute_profit_and_margin(-5.0, 80.0, 10.0, 100.0, 0.0).is_none());
        assert!(compute_profit_and_margin(20.0, 80.0, 0.0, 100.0, 0.0).is_none());
        assert!(compute_profit_and_margin(20.0, 80.0, 10.0, 0.0, 0.0).is_none());
        assert!(compute_profit_and_margin(20.0, -1.0, 10.0, 100.0, 0.0).is_none());
        assert!(compute_profit_and_margin(20.0, 80.0, 10.0, 100.0, -0.1).is_none());
    }

    #[test]
    fn rejects_non_finite_inputs() {
        assert!(compute_profit_and_margin(f64::NAN, 80.0, 10.0, 100.0, 0.0).is_none());
        assert!(compute_profit_and_margin(20.0, f64::INFINITY, 10.0, 100.0, 0.0).is_none());
    }

    #[test]
    fn free_stock_can_exceed_full_margin() {
        // PTR 0 with a positive MRP: everything is profit.
        let costing = compute_profit_and_margin(10.0, 0.0, 10.0, 100.0, 0.0).unwrap();
        assert!(close(costing.margin_pct.unwrap(), 100.0));
        assert!(close(costing.total_item_amount, 0.0));
    }

    #[test]
    fn unit_price_divides_pack_price() {
        assert!(close(sales_unit_price(50.0, 10.0).unwrap(), 5.0));
        assert!(sales_unit_price(50.0, 0.0).is_none());
        assert!(sales_unit_price(-1.0, 10.0).is_none());
    }

    #[test]
    fn line_amount_applies_discount() {
        assert!(close(line_amount(30.0, 5.0, 10.0).unwrap(), 135.0));
        assert!(line_amount(0.0, 5.0, 10.0).is_none());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: profit always equals potential revenue minus amount paid.
            #[test]
            fn profit_is_revenue_minus_cost(
                quantity in 1.0f64..10_000.0,
                ptr in 0.0f64..10_000.0,
                ipp in 1.0f64..1_000.0,
                mrp in 0.01f64..10_000.0,
                discount in 0.0f64..100.0,
            ) {
                let costing = compute_profit_and_margin(quantity, ptr, ipp, mrp, discount).unwrap();
                let packs = quantity / ipp;
                let revenue = mrp * packs;

                prop_assert!((costing.total_profit - (revenue - costing.total_item_amount)).abs() < 1e-6);
            }

            /// Property: the calculator is a pure function (same inputs, same outputs).
            #[test]
            fn deterministic(
                quantity in 1.0f64..10_000.0,
                ptr in 0.0f64..10_000.0,
                ipp in 1.0f64..1_000.0,
                mrp in 0.01f64..10_000.0,
                discount in 0.0f64..100.0,
            ) {
                let a = compute_profit_and_margin(quantity, ptr, ipp, mrp, discount);
                let b = compute_profit_and_margin(quantity, ptr, ipp, mrp, discount);
                prop_assert_eq!(a, b);
            }

            /// Property: zero-discount amount paid scales linearly with quantity.
            #[test]
            fn amount_paid_scales_with_quantity(
                quantity in 1.0f64..5_000.0,
                ptr in 0.01f64..10_000.0,
                ipp in 1.0f64..1_000.0,
                mrp in 0.01f64..10_000.0,
            ) {
                let one = compute_profit_and_margin(quantity, ptr, ipp, mrp, 0.0).unwrap();
                let two = compute_profit_and_margin(quantity * 2.0, ptr, ipp, mrp, 0.0).unwrap();
                prop_assert!((two.total_item_amount - one.total_item_amount * 2.0).abs() < 1e-6);
            }
        }
    }
}
