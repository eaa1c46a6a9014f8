//! The product collection with case-insensitive, trimmed name resolution.

use tracing::warn;

use rxstock_core::{ConsistencyWarning, DomainError, DomainResult, ProductId};

use crate::product::{Product, ProductSpec};

/// Canonical form of a product name for matching: trimmed and lowercased.
///
/// Every lookup in the system — catalog resolution, lot keys, edit deltas —
/// goes through this one function so the components cannot disagree.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The product master.
///
/// Names are unique case-insensitively; insertion order is preserved (the
/// display order the original data carried). Quantity is mutated only via
/// [`Catalog::adjust_quantity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Resolve a product by name, case-insensitively and ignoring
    /// surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Product> {
        let wanted = normalize_name(name);
        self.products
            .iter()
            .find(|p| normalize_name(p.name()) == wanted)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Add a product. Names collide case-insensitively; ids must be unique.
    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        if self.contains(product.name()) {
            return Err(DomainError::validation(format!(
                "a product named '{}' already exists",
                product.name()
            )));
        }
        if self.get(product.id()).is_some() {
            return Err(DomainError::validation(format!(
                "product id '{}' is already in use",
                product.id()
            )));
        }
        self.products.push(product);
        Ok(())
    }

    /// Edit a product in place.
    ///
    /// Identity and cached quantity are preserved no matter what the spec
    /// carries; the name may change as long as it stays unique.
    pub fn update(&mut self, id: &ProductId, spec: ProductSpec) -> DomainResult<()> {
        let new_name = normalize_name(&spec.name);
        if self
            .products
            .iter()
            .any(|p| p.id() != id && normalize_name(p.name()) == new_name)
        {
            return Err(DomainError::validation(format!(
                "a product named '{}' already exists",
                spec.name.trim()
            )));
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("product id '{id}'")))?;
        product.reconfigure(spec)
    }

    pub fn remove(&mut self, id: &ProductId) -> DomainResult<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("product id '{id}'")))?;
        Ok(self.products.remove(idx))
    }

    /// Apply a signed quantity delta to the named product's cache.
    ///
    /// A result that would go negative is clamped to zero and reported as a
    /// [`ConsistencyWarning`]; the adjustment itself still commits. Callers
    /// that cannot resolve the product decide for themselves whether that
    /// is fatal (direct lookups) or a skip-with-warning (bill replay).
    pub fn adjust_quantity(
        &mut self,
        name: &str,
        delta: i64,
    ) -> DomainResult<Option<ConsistencyWarning>> {
        let wanted = normalize_name(name);
        let product = self
            .products
            .iter_mut()
            .find(|p| normalize_name(p.name()) == wanted)
            .ok_or_else(|| DomainError::not_found(format!("product '{}'", name.trim())))?;

        let computed = product.quantity() + delta;
        if computed < 0 {
            warn!(
                product = product.name(),
                computed, "stock arithmetic went negative; clamping to 0"
            );
            let warning = ConsistencyWarning {
                product: product.name().to_string(),
                computed,
            };
            product.set_quantity(0);
            return Ok(Some(warning));
        }

        product.set_quantity(computed);
        Ok(None)
    }

    /// Products whose cached quantity has fallen below their minimum stock.
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_below_min_stock())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = core::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}
