use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult, ProductId};

fn default_items_per_pack() -> u32 {
    1
}

/// Raw product fields as entered or loaded.
///
/// This is the ingestion boundary: every defaulting rule lives here, and
/// [`Product::new`] validates once. Missing optional fields default to empty
/// strings / zero; `items_per_pack` defaults to 1 (a product is always
/// sellable by the single item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub company: String,
    #[serde(default = "default_items_per_pack")]
    pub items_per_pack: u32,
    #[serde(default)]
    pub mrp: f64,
    #[serde(default)]
    pub min_stock: u32,
    #[serde(default)]
    pub max_stock: u32,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub quantity: i64,
}

/// A catalog entry.
///
/// `quantity` is a denormalized cache of the reconciled lot totals for this
/// product name; after any committed mutation it must equal the sum over
/// the stock ledger's lots (invariant enforced by the store's consistency
/// check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductSpec", into = "ProductSpec")]
pub struct Product {
    id: ProductId,
    name: String,
    unit: String,
    category: String,
    company: String,
    items_per_pack: u32,
    mrp: f64,
    min_stock: u32,
    max_stock: u32,
    discount: f64,
    tax_rate: f64,
    quantity: i64,
}

impl Product {
    /// Validate a spec into a product. The name is stored trimmed; lookups
    /// additionally fold case.
    pub fn new(spec: ProductSpec) -> DomainResult<Self> {
        if spec.id.as_str().trim().is_empty() {
            return Err(DomainError::validation("product id cannot be empty"));
        }
        let name = spec.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if spec.items_per_pack < 1 {
            return Err(DomainError::validation("items per pack must be at least 1"));
        }
        if !spec.mrp.is_finite() || spec.mrp < 0.0 {
            return Err(DomainError::validation("MRP must be a non-negative number"));
        }
        if spec.min_stock > spec.max_stock {
            return Err(DomainError::validation(
                "minimum stock cannot exceed maximum stock",
            ));
        }
        if !spec.discount.is_finite() || !(0.0..=100.0).contains(&spec.discount) {
            return Err(DomainError::validation("discount must be between 0 and 100"));
        }
        if !spec.tax_rate.is_finite() || !(0.0..=100.0).contains(&spec.tax_rate) {
            return Err(DomainError::validation("tax rate must be between 0 and 100"));
        }
        if spec.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        Ok(Self {
            id: spec.id,
            name,
            unit: spec.unit,
            category: spec.category,
            company: spec.company,
            items_per_pack: spec.items_per_pack,
            mrp: spec.mrp,
            min_stock: spec.min_stock,
            max_stock: spec.max_stock,
            discount: spec.discount,
            tax_rate: spec.tax_rate,
            quantity: spec.quantity,
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn items_per_pack(&self) -> u32 {
        self.items_per_pack
    }

    pub fn mrp(&self) -> f64 {
        self.mrp
    }

    pub fn min_stock(&self) -> u32 {
        self.min_stock
    }

    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Cached on-hand quantity in individual items.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_below_min_stock(&self) -> bool {
        self.quantity < i64::from(self.min_stock)
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Replace editable fields from a spec, preserving identity and the
    /// cached quantity whatever the spec says.
    pub(crate) fn reconfigure(&mut self, spec: ProductSpec) -> DomainResult<()> {
        let quantity = self.quantity;
        let id = self.id.clone();
        let mut updated = Product::new(spec)?;
        updated.id = id;
        updated.quantity = quantity;
        *self = updated;
        Ok(())
    }
}

impl TryFrom<ProductSpec> for Product {
    type Error = DomainError;

    fn try_from(spec: ProductSpec) -> Result<Self, Self::Error> {
        Product::new(spec)
    }
}

impl From<Product> for ProductSpec {
    fn from(p: Product) -> Self {
        ProductSpec {
            id: p.id,
            name: p.name,
            unit: p.unit,
            category: p.category,
            company: p.company,
            items_per_pack: p.items_per_pack,
            mrp: p.mrp,
            min_stock: p.min_stock,
            max_stock: p.max_stock,
            discount: p.discount,
            tax_rate: p.tax_rate,
            quantity: p.quantity,
        }
    }
}
