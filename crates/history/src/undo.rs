use rxstock_catalog::Catalog;

/// One-element undo stack holding a full catalog snapshot.
///
/// Every stock-affecting mutation stashes the catalog *before* touching it,
/// overwriting whatever was stashed before. Taking the snapshot empties the
/// slot, so undo is strictly one step deep.
#[derive(Debug, Clone, Default)]
pub struct UndoSlot {
    snapshot: Option<Catalog>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash a snapshot, replacing any previous one.
    pub fn stash(&mut self, catalog: &Catalog) {
        self.snapshot = Some(catalog.clone());
    }

    /// Pop the snapshot, if any.
    pub fn take(&mut self) -> Option<Catalog> {
        self.snapshot.take()
    }

    pub fn is_armed(&self) -> bool {
        self.snapshot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxstock_catalog::{Product, ProductSpec};
    use rxstock_core::ProductId;

    fn catalog_with_quantity(quantity: i64) -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add(
                Product::new(ProductSpec {
                    id: ProductId::new("p1").unwrap(),
                    name: "ParaTab".to_string(),
                    unit: String::new(),
                    category: String::new(),
                    company: String::new(),
                    items_per_pack: 10,
                    mrp: 50.0,
                    min_stock: 0,
                    max_stock: 100,
                    discount: 0.0,
                    tax_rate: 0.0,
                    quantity,
                })
                .unwrap(),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn stash_overwrites_previous_snapshot() {
        let mut slot = UndoSlot::new();
        slot.stash(&catalog_with_quantity(10));
        slot.stash(&catalog_with_quantity(99));

        let restored = slot.take().unwrap();
        assert_eq!(restored.find("ParaTab").unwrap().quantity(), 99);
        assert!(!slot.is_armed());
    }

    #[test]
    fn take_on_empty_slot_is_none() {
        let mut slot = UndoSlot::new();
        assert!(slot.take().is_none());
    }
}
