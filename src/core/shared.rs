//! Lock-guarded store handle for hosts with more than one calling surface.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::core::{
    events::{StoreEvent, SubscriptionId},
    store::ExpenseStore,
};
use crate::errors::StorageError;

/// Cloneable handle to one [`ExpenseStore`] behind a mutex.
///
/// Mutations made through [`SharedStore::update`] queue their events and
/// deliver them once the lock is released, so a subscriber may call
/// [`SharedStore::read`] to re-render from the store it was notified about.
/// Subscribers should capture a [`WeakStore`] rather than a `SharedStore`.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<ExpenseStore>>,
}

/// Non-owning counterpart of [`SharedStore`] for use inside subscribers.
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<Mutex<ExpenseStore>>,
}

impl SharedStore {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Runs `f` with shared access to the store.
    pub fn read<R>(&self, f: impl FnOnce(&ExpenseStore) -> R) -> Result<R, StorageError> {
        let store = self.lock()?;
        Ok(f(&store))
    }

    /// Runs `f` with exclusive access, then notifies subscribers of every
    /// event it produced after the lock has been released.
    pub fn update<R>(&self, f: impl FnOnce(&mut ExpenseStore) -> R) -> Result<R, StorageError> {
        let (result, events, subscribers) = {
            let mut store = self.lock()?;
            store.defer_events();
            let result = f(&mut store);
            let (events, subscribers) = store.take_deferred();
            (result, events, subscribers)
        };
        for event in &events {
            for subscriber in &subscribers {
                subscriber(event);
            }
        }
        Ok(result)
    }

    pub fn subscribe<F>(&self, callback: F) -> Result<SubscriptionId, StorageError>
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        Ok(self.lock()?.subscribe(callback))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StorageError> {
        Ok(self.lock()?.unsubscribe(id))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ExpenseStore>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("expense store lock poisoned".into()))
    }
}

impl WeakStore {
    /// Returns `None` once every [`SharedStore`] handle has been dropped.
    pub fn upgrade(&self) -> Option<SharedStore> {
        self.inner.upgrade().map(|inner| SharedStore { inner })
    }
}
