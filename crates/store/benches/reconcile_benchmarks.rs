//! Reconciliation cost over synthetic bill histories.
//!
//! The lot view is recomputed from the full history on every call, so the
//! interesting number is how that O(total line items) replay scales with
//! history size.

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use rxstock_billing::{
    PurchaseBill, PurchaseBillDraft, PurchaseItemDraft, SalesBill, SalesBillDraft, SalesItemDraft,
};
use rxstock_catalog::{Catalog, Product, ProductSpec};
use rxstock_core::ProductId;
use rxstock_ledger::StockLedger;

const PRODUCTS: usize = 50;
const LINES_PER_BILL: usize = 5;

fn catalog() -> Catalog {
    (0..PRODUCTS)
        .map(|i| {
            Product::new(ProductSpec {
                id: ProductId::new(format!("p{i}")).unwrap(),
                name: format!("Product {i}"),
                unit: "strip".to_string(),
                category: "tablet".to_string(),
                company: "Acme Pharma".to_string(),
                items_per_pack: 10,
                mrp: 50.0,
                min_stock: 10,
                max_stock: 10_000,
                discount: 0.0,
                tax_rate: 12.0,
                quantity: 0,
            })
            .unwrap()
        })
        .collect()
}

fn history(catalog: &Catalog, bills: usize) -> (Vec<PurchaseBill>, Vec<SalesBill>) {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let purchases: Vec<PurchaseBill> = (0..bills)
        .map(|b| {
            PurchaseBill::build(
                PurchaseBillDraft {
                    bill_number: format!("P{b}"),
                    date,
                    supplier_name: "HealthDist".to_string(),
                    items: (0..LINES_PER_BILL)
                        .map(|l| PurchaseItemDraft {
                            product: format!("Product {}", (b * LINES_PER_BILL + l) % PRODUCTS),
                            batch: format!("B{}", b % 7),
                            expiry: format!("{:02}-{}", (b % 12) + 1, 2025 + (b % 3)),
                            quantity: 100,
                            ptr: 40.0,
                            items_per_pack: 10,
                            mrp: 50.0,
                            discount: 5.0,
                        })
                        .collect(),
                },
                catalog,
            )
            .unwrap()
        })
        .collect();

    let sales: Vec<SalesBill> = (0..bills)
        .map(|b| {
            SalesBill::build(
                SalesBillDraft {
                    bill_number: format!("S{b}"),
                    date,
                    customer_name: "Walk-in".to_string(),
                    items: (0..LINES_PER_BILL)
                        .map(|l| SalesItemDraft {
                            product: format!("Product {}", (b * LINES_PER_BILL + l) % PRODUCTS),
                            batch: format!("B{}", b % 7),
                            expiry: format!("{:02}-{}", (b % 12) + 1, 2025 + (b % 3)),
                            quantity_sold: 30,
                            discount: 0.0,
                        })
                        .collect(),
                },
                catalog,
            )
            .unwrap()
        })
        .collect();

    (purchases, sales)
}

fn bench_reconcile(c: &mut Criterion) {
    let catalog = catalog();
    let mut group = c.benchmark_group("reconcile");

    for bills in [50usize, 500, 2_000] {
        let (purchases, sales) = history(&catalog, bills);
        group.bench_with_input(
            BenchmarkId::from_parameter(bills),
            &(purchases, sales),
            |bench, (purchases, sales)| {
                bench.iter(|| StockLedger::reconcile(purchases, sales));
            },
        );
    }

    group.finish();
}

fn bench_breakdown(c: &mut Criterion) {
    let catalog = catalog();
    let (purchases, sales) = history(&catalog, 500);
    let ledger = StockLedger::reconcile(&purchases, &sales);

    c.bench_function("product_breakdown/500", |bench| {
        bench.iter(|| ledger.product_breakdown(&catalog));
    });
}

criterion_group!(benches, bench_reconcile, bench_breakdown);
criterion_main!(benches);
