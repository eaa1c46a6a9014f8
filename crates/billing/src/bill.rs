use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult};

/// Bill-type namespace. Bill numbers are unique *within* a kind; the two
/// namespaces are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillKind {
    Purchase,
    Sales,
}

impl core::fmt::Display for BillKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BillKind::Purchase => f.write_str("purchase"),
            BillKind::Sales => f.write_str("sales"),
        }
    }
}

/// Common surface over the two bill types, for counter and duplicate logic.
pub trait Bill {
    fn bill_number(&self) -> &str;
    fn date(&self) -> NaiveDate;
    fn kind(&self) -> BillKind;
    fn total_amount(&self) -> f64;
}

pub(crate) fn validate_bill_number(bill_number: &str) -> DomainResult<String> {
    let trimmed = bill_number.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("bill number cannot be empty"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_party_name(name: &str, label: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{label} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_percentage(value: f64, label: &str) -> DomainResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(DomainError::validation(format!(
            "{label} must be between 0 and 100"
        )));
    }
    Ok(())
}

pub(crate) fn validate_price(value: f64, label: &str) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{label} must be a non-negative number"
        )));
    }
    Ok(())
}
