use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::EntryId;

/// One recorded action, human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub action: String,
    pub date: DateTime<Utc>,
}

/// Append-only action log, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action now. The new entry becomes the head of the log.
    pub fn record(&mut self, action: impl Into<String>) -> &HistoryEntry {
        self.entries.push_front(HistoryEntry {
            id: EntryId::new(),
            action: action.into(),
            date: Utc::now(),
        });
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }
}

impl FromIterator<HistoryEntry> for HistoryLog {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prepends() {
        let mut log = HistoryLog::new();
        log.record("first");
        log.record("second");

        let actions: Vec<&str> = log.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["second", "first"]);
        assert_eq!(log.latest().unwrap().action, "second");
    }

    #[test]
    fn entries_get_distinct_ids() {
        let mut log = HistoryLog::new();
        let a = log.record("a").id;
        let b = log.record("b").id;
        assert_ne!(a, b);
    }
}
