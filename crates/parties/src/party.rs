use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult};

/// Contact information for a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Common surface over the two party kinds.
pub trait Party {
    fn name(&self) -> &str;
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

impl Customer {
    pub fn new(name: impl Into<String>, contact: ContactInfo) -> DomainResult<Self> {
        Ok(Self {
            name: validate_name(&name.into())?,
            contact,
        })
    }
}

impl Party for Customer {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A supplier record. Suppliers additionally carry a GSTIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub gstin: Option<String>,
}

impl Supplier {
    pub fn new(
        name: impl Into<String>,
        contact: ContactInfo,
        gstin: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            name: validate_name(&name.into())?,
            contact,
            gstin,
        })
    }
}

impl Party for Supplier {
    fn name(&self) -> &str {
        &self.name
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("party name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A collection of one party kind, keyed by name (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyBook<T> {
    entries: Vec<T>,
}

impl<T> Default for PartyBook<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Party> PartyBook<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        let wanted = fold(name);
        self.entries.iter().find(|e| fold(e.name()) == wanted)
    }

    pub fn add(&mut self, entry: T) -> DomainResult<()> {
        if self.find(entry.name()).is_some() {
            return Err(DomainError::validation(format!(
                "a party named '{}' already exists",
                entry.name()
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Replace the record stored under `name` (which may also rename it,
    /// as long as the new name stays unique).
    pub fn update(&mut self, name: &str, entry: T) -> DomainResult<()> {
        let wanted = fold(name);
        let idx = self
            .entries
            .iter()
            .position(|e| fold(e.name()) == wanted)
            .ok_or_else(|| DomainError::not_found(format!("party '{}'", name.trim())))?;

        let new_name = fold(entry.name());
        if new_name != wanted && self.entries.iter().any(|e| fold(e.name()) == new_name) {
            return Err(DomainError::validation(format!(
                "a party named '{}' already exists",
                entry.name()
            )));
        }

        self.entries[idx] = entry;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> DomainResult<T> {
        let wanted = fold(name);
        let idx = self
            .entries
            .iter()
            .position(|e| fold(e.name()) == wanted)
            .ok_or_else(|| DomainError::not_found(format!("party '{}'", name.trim())))?;
        Ok(self.entries.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str) -> Customer {
        Customer::new(
            name,
            ContactInfo {
                phone: Some("555-0100".to_string()),
                email: None,
                address: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(customer("  Asha  ").name, "Asha");
        assert!(Customer::new("   ", ContactInfo::default()).is_err());
    }

    #[test]
    fn book_rejects_case_insensitive_duplicates() {
        let mut book = PartyBook::new();
        book.add(customer("Asha")).unwrap();
        assert!(book.add(customer(" ASHA ")).is_err());
    }

    #[test]
    fn update_can_rename_without_colliding() {
        let mut book = PartyBook::new();
        book.add(customer("Asha")).unwrap();
        book.add(customer("Bilal")).unwrap();

        book.update("asha", customer("Asha K")).unwrap();
        assert!(book.find("Asha K").is_some());
        assert!(book.find("Asha").is_none());

        let err = book.update("Bilal", customer("ASHA K")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn remove_unknown_party_is_not_found() {
        let mut book: PartyBook<Customer> = PartyBook::new();
        assert!(matches!(
            book.remove("ghost").unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[test]
    fn supplier_keeps_gstin() {
        let supplier = Supplier::new(
            "HealthDist",
            ContactInfo::default(),
            Some("27AAPFU0939F1ZV".to_string()),
        )
        .unwrap();
        assert_eq!(supplier.gstin.as_deref(), Some("27AAPFU0939F1ZV"));
    }
}
