use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Store behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Whether deleting a purchase bill reverses its stock effect, making
    /// purchase deletion symmetric with sales deletion. `false` reproduces
    /// the historical behavior where purchase deletion left quantities
    /// untouched.
    #[serde(default = "default_true")]
    pub reverse_purchase_bill_deletes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            reverse_purchase_bill_deletes: true,
        }
    }
}
