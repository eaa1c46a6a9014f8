//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// missing references, key collisions). Infrastructure concerns belong
/// elsewhere. A rejected mutation never leaves partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed a precondition (e.g. malformed input, insufficient stock).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced product or bill does not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// A bill number already exists within its bill-type namespace.
    #[error("duplicate bill number: {0}")]
    DuplicateBillNumber(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate_bill_number(bill_number: impl Into<String>) -> Self {
        Self::DuplicateBillNumber(bill_number.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// A stock computation was clamped to zero instead of going negative.
///
/// This is deliberately **not** an error: the mutation proceeds and the
/// warning is surfaced to the caller (and logged) so the inconsistency is
/// visible without blocking the historical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyWarning {
    /// Product whose cached quantity was clamped.
    pub product: String,
    /// The quantity the arithmetic produced before clamping (negative).
    pub computed: i64,
}

impl core::fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "quantity for '{}' would be {}, clamped to 0",
            self.product, self.computed
        )
    }
}
