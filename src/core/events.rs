use std::fmt;

use crate::storage::CollectionKey;

/// Notification sent to subscribers after the store changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A single collection was mutated.
    Changed(CollectionKey),
    /// Every collection was reset by `clear_all`.
    Reset,
    /// The in-memory change stands but could not be written.
    PersistenceFailed { key: CollectionKey, message: String },
}

impl StoreEvent {
    /// Whether the event means `key` may now hold different records.
    pub fn affects(&self, key: CollectionKey) -> bool {
        match self {
            StoreEvent::Changed(changed) => *changed == key,
            StoreEvent::Reset => true,
            StoreEvent::PersistenceFailed { .. } => false,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Last write that failed, kept so the UI can warn that changes may not be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub key: CollectionKey,
    pub message: String,
}

impl fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "changes to {} may not be saved: {}",
            self.key, self.message
        )
    }
}
