pub mod events;
pub mod services;
pub mod shared;
pub mod store;
pub mod utils;

pub use events::{PersistenceWarning, StoreEvent, SubscriptionId};
pub use shared::{SharedStore, WeakStore};
pub use store::{ExpenseStore, LoadFailure, LoadReport};
