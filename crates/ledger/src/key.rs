//! Lot identity.

use rxstock_catalog::normalize_name;

/// Normalized identity of a stock-keeping lot: (product, batch, expiry),
/// each trimmed and lowercased.
///
/// Normalization happens exactly once, here. A key cannot be constructed
/// from blank components — lines that fail to normalize are unreconcilable
/// noise and are skipped (and logged) by the replay, never counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LotKey {
    product: String,
    batch: String,
    expiry: String,
}

impl LotKey {
    /// Build a key from raw line fields. Returns `None` when any component
    /// is empty after trimming.
    pub fn normalize(product: &str, batch: &str, expiry: &str) -> Option<Self> {
        let product = normalize_name(product);
        let batch = batch.trim().to_lowercase();
        let expiry = expiry.trim().to_lowercase();

        if product.is_empty() || batch.is_empty() || expiry.is_empty() {
            return None;
        }

        Some(Self {
            product,
            batch,
            expiry,
        })
    }

    /// Normalized product component (shared with catalog lookups).
    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn batch(&self) -> &str {
        &self.batch
    }

    pub fn expiry(&self) -> &str {
        &self.expiry
    }
}

impl core::fmt::Display for LotKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}|{}|{}", self.product, self.batch, self.expiry)
    }
}
