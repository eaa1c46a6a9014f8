use chrono::{DateTime, Utc};

/// A change notification published after a committed mutation.
///
/// Signals are coarse by design: they say *that* a collection changed, never
/// *what* changed. Subscribers must treat every signal as "reload
/// everything" — the store offers no diff contract.
pub trait Signal: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable topic name (e.g. "store.catalog.changed").
    fn topic(&self) -> &'static str;

    /// When the underlying mutation committed.
    fn occurred_at(&self) -> DateTime<Utc>;
}
