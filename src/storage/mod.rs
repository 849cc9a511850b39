pub mod json_backend;
pub mod memory_backend;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Logical names of the independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    DailyExpenses,
    RecurringExpenses,
    Categories,
    Tags,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::DailyExpenses,
        CollectionKey::RecurringExpenses,
        CollectionKey::Categories,
        CollectionKey::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::DailyExpenses => "daily_expenses",
            CollectionKey::RecurringExpenses => "recurring_expenses",
            CollectionKey::Categories => "categories",
            CollectionKey::Tags => "tags",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction over durable stores holding opaque serialized blobs by key.
pub trait StorageBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, data: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Copies the blob stored under `key` to `<key>.corrupt`, leaving the
    /// original in place.
    fn preserve(&self, key: &str) -> Result<()> {
        if let Some(data) = self.read(key)? {
            self.write(&format!("{key}.corrupt"), &data)?;
        }
        Ok(())
    }

    /// Whether blobs should be written in human-readable form.
    fn pretty(&self) -> bool {
        false
    }
}

/// Decodes the value stored under `key`.
pub fn load<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Result<Option<T>> {
    match backend.read(key)? {
        Some(data) => Ok(Some(serde_json::from_str(&data)?)),
        None => Ok(None),
    }
}

/// Encodes `value` and stores it under `key`.
pub fn save<T: Serialize + ?Sized>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> Result<()> {
    let data = if backend.pretty() {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    backend.write(key, &data)
}

pub use json_backend::JsonStorage;
pub use memory_backend::MemoryStorage;
