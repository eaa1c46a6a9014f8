use chrono::{DateTime, Utc};

use rxstock_billing::BillKind;
use rxstock_events::Signal;

/// Change notifications the store publishes after every committed mutation.
///
/// Deliberately coarse: a signal names the collection that changed and
/// nothing else. Subscribers reload wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSignal {
    CatalogChanged {
        occurred_at: DateTime<Utc>,
    },
    BillsChanged {
        kind: BillKind,
        occurred_at: DateTime<Utc>,
    },
}

impl StoreSignal {
    pub fn catalog_changed() -> Self {
        Self::CatalogChanged {
            occurred_at: Utc::now(),
        }
    }

    pub fn bills_changed(kind: BillKind) -> Self {
        Self::BillsChanged {
            kind,
            occurred_at: Utc::now(),
        }
    }
}

impl Signal for StoreSignal {
    fn topic(&self) -> &'static str {
        match self {
            StoreSignal::CatalogChanged { .. } => "store.catalog.changed",
            StoreSignal::BillsChanged { .. } => "store.bills.changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreSignal::CatalogChanged { occurred_at } => *occurred_at,
            StoreSignal::BillsChanged { occurred_at, .. } => *occurred_at,
        }
    }
}
