//! Per-namespace bill-number counters.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tracks the largest *numeric* bill number accepted in one namespace.
///
/// Bill numbers are free-form strings; only the ones that parse as
/// integers move the counter. The backing store keeps counters
/// string-encoded, so serde round-trips them as strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillCounter(u64);

impl BillCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Fold an accepted bill number into the counter. Non-numeric numbers
    /// and values at or below the current maximum leave it untouched.
    pub fn observe(&mut self, bill_number: &str) {
        if let Ok(n) = bill_number.trim().parse::<u64>() {
            if n > self.0 {
                self.0 = n;
            }
        }
    }

    /// Suggested next bill number for UI prefill.
    pub fn next(&self) -> String {
        (self.0 + 1).to_string()
    }
}

impl Serialize for BillCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BillCounter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let value = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("bill counter '{raw}': {e}")))?;
        Ok(Self(value))
    }
}
