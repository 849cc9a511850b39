use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use crate::errors::StorageError;

use super::{Result, StorageBackend};

/// In-process backend. Clones share the same blobs, so a handle kept outside the
/// store observes what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    blobs: Mutex<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes with [`StorageError::Unavailable`] while enabled.
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn is_read_only(&self) -> bool {
        self.inner.read_only.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.blobs()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.inner
            .blobs
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.is_read_only() {
            Err(StorageError::Unavailable("memory storage is read-only".into()))
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs()?.get(key).cloned())
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        self.ensure_writable()?;
        self.blobs()?.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.ensure_writable()?;
        self.blobs()?.remove(key);
        Ok(())
    }
}
