use std::{collections::HashSet, sync::Arc};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::{
    events::{PersistenceWarning, StoreEvent, SubscriptionId},
    shared::SharedStore,
    services::{Breakdown, BudgetProgress, CumulativePoint, DailyTotal, SummaryService},
};
use crate::domain::{
    seeds, Category, CategoryRef, ExpenseEntry, Identifiable, RecurringExpense, Tag,
};
use crate::storage::{self, CollectionKey, StorageBackend};

pub(crate) type Subscriber = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// A collection that could not be decoded on open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub key: CollectionKey,
    pub message: String,
    /// Whether the unreadable blob was copied aside before anything could
    /// overwrite it.
    pub preserved: bool,
}

/// Outcome of opening a store.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Collections that started from their defaults.
    pub defaulted: Vec<CollectionKey>,
    /// Collections whose stored blob was unreadable (also listed in `defaulted`).
    pub failures: Vec<LoadFailure>,
    /// Records given a fresh id because theirs was missing or duplicated.
    pub reassigned_ids: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.reassigned_ids == 0
    }
}

/// Owns the expense, recurring expense, category and tag collections.
///
/// Every mutation updates memory first, then writes only the touched
/// collection, then notifies subscribers. Write failures are logged and kept as
/// a [`PersistenceWarning`]; the in-memory change is never rolled back.
/// Out-of-range indices and unknown ids are no-ops.
///
/// Subscribers run synchronously inside the mutation and receive no handle to
/// the store. Hosts whose subscribers read the store back go through
/// [`SharedStore`], which dispatches after releasing its lock.
pub struct ExpenseStore {
    expenses: Vec<ExpenseEntry>,
    recurring: Vec<RecurringExpense>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    storage: Box<dyn StorageBackend>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    persistence_warning: Option<PersistenceWarning>,
    /// Events held back while a [`SharedStore`] mutation is in progress.
    deferred: Option<Vec<StoreEvent>>,
}

impl ExpenseStore {
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        Self::open_with_report(storage).0
    }

    /// Loads all four collections, falling back to defaults for anything absent
    /// or unreadable.
    pub fn open_with_report(storage: Box<dyn StorageBackend>) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let backend = storage.as_ref();
        let expenses =
            load_collection(backend, CollectionKey::DailyExpenses, Vec::new, &mut report);
        let recurring = load_collection(
            backend,
            CollectionKey::RecurringExpenses,
            seeds::default_recurring_expenses,
            &mut report,
        );
        let categories = load_collection(
            backend,
            CollectionKey::Categories,
            seeds::default_categories,
            &mut report,
        );
        let tags = load_collection(backend, CollectionKey::Tags, seeds::default_tags, &mut report);

        info!(
            expenses = expenses.len(),
            recurring = recurring.len(),
            categories = categories.len(),
            tags = tags.len(),
            defaulted = report.defaulted.len(),
            "expense store opened"
        );

        let store = Self {
            expenses,
            recurring,
            categories,
            tags,
            storage,
            subscribers: Vec::new(),
            next_subscription: 0,
            persistence_warning: None,
            deferred: None,
        };
        (store, report)
    }

    pub fn into_shared(self) -> SharedStore {
        SharedStore::new(self)
    }

    // --- observation -------------------------------------------------------

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Arc::new(callback)));
        debug!(subscription = %id, "subscriber added");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(current, _)| *current != id);
        self.subscribers.len() != before
    }

    pub fn persistence_warning(&self) -> Option<&PersistenceWarning> {
        self.persistence_warning.as_ref()
    }

    pub fn take_persistence_warning(&mut self) -> Option<PersistenceWarning> {
        self.persistence_warning.take()
    }

    // --- daily expenses ----------------------------------------------------

    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    pub fn expense(&self, id: Uuid) -> Option<&ExpenseEntry> {
        self.expenses.iter().find(|entry| entry.id == id)
    }

    pub fn index_of_expense(&self, id: Uuid) -> Option<usize> {
        position(&self.expenses, id)
    }

    pub fn add_expense(&mut self, entry: ExpenseEntry) -> Uuid {
        let id = insert(&mut self.expenses, entry);
        self.committed(CollectionKey::DailyExpenses, "add", id);
        id
    }

    pub fn update_expense_at(&mut self, index: usize, entry: ExpenseEntry) -> bool {
        match replace_at(&mut self.expenses, index, entry) {
            Some(id) => self.committed(CollectionKey::DailyExpenses, "update", id),
            None => false,
        }
    }

    pub fn update_expense(&mut self, id: Uuid, entry: ExpenseEntry) -> bool {
        match position(&self.expenses, id) {
            Some(index) => self.update_expense_at(index, with_id(entry, id)),
            None => false,
        }
    }

    pub fn delete_expense_at(&mut self, index: usize) -> Option<ExpenseEntry> {
        let removed = remove_at(&mut self.expenses, index)?;
        self.committed(CollectionKey::DailyExpenses, "delete", removed.id);
        Some(removed)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Option<ExpenseEntry> {
        let index = position(&self.expenses, id)?;
        self.delete_expense_at(index)
    }

    // --- recurring expenses ------------------------------------------------

    pub fn recurring_expenses(&self) -> &[RecurringExpense] {
        &self.recurring
    }

    pub fn index_of_recurring(&self, id: Uuid) -> Option<usize> {
        position(&self.recurring, id)
    }

    pub fn add_recurring(&mut self, line: RecurringExpense) -> Uuid {
        let id = insert(&mut self.recurring, line);
        self.committed(CollectionKey::RecurringExpenses, "add", id);
        id
    }

    pub fn update_recurring_at(&mut self, index: usize, line: RecurringExpense) -> bool {
        match replace_at(&mut self.recurring, index, line) {
            Some(id) => self.committed(CollectionKey::RecurringExpenses, "update", id),
            None => false,
        }
    }

    pub fn update_recurring(&mut self, id: Uuid, line: RecurringExpense) -> bool {
        match position(&self.recurring, id) {
            Some(index) => self.update_recurring_at(index, with_id(line, id)),
            None => false,
        }
    }

    pub fn delete_recurring_at(&mut self, index: usize) -> Option<RecurringExpense> {
        let removed = remove_at(&mut self.recurring, index)?;
        self.committed(CollectionKey::RecurringExpenses, "delete", removed.id);
        Some(removed)
    }

    pub fn delete_recurring(&mut self, id: Uuid) -> Option<RecurringExpense> {
        let index = position(&self.recurring, id)?;
        self.delete_recurring_at(index)
    }

    // --- categories --------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn index_of_category(&self, id: Uuid) -> Option<usize> {
        position(&self.categories, id)
    }

    /// Appends without checking for duplicate class pairs; see
    /// [`CategoryService`](crate::core::services::CategoryService).
    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = insert(&mut self.categories, category);
        self.committed(CollectionKey::Categories, "add", id);
        id
    }

    pub fn update_category_at(&mut self, index: usize, category: Category) -> bool {
        match replace_at(&mut self.categories, index, category) {
            Some(id) => self.committed(CollectionKey::Categories, "update", id),
            None => false,
        }
    }

    pub fn update_category(&mut self, id: Uuid, category: Category) -> bool {
        match position(&self.categories, id) {
            Some(index) => self.update_category_at(index, with_id(category, id)),
            None => false,
        }
    }

    /// Entries that referenced the category keep their reference.
    pub fn delete_category_at(&mut self, index: usize) -> Option<Category> {
        let removed = remove_at(&mut self.categories, index)?;
        self.committed(CollectionKey::Categories, "delete", removed.id);
        Some(removed)
    }

    pub fn delete_category(&mut self, id: Uuid) -> Option<Category> {
        let index = position(&self.categories, id)?;
        self.delete_category_at(index)
    }

    // --- tags --------------------------------------------------------------

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn index_of_tag(&self, id: Uuid) -> Option<usize> {
        position(&self.tags, id)
    }

    /// Appends without checking for duplicate names; see
    /// [`TagService`](crate::core::services::TagService).
    pub fn add_tag(&mut self, tag: Tag) -> Uuid {
        let id = insert(&mut self.tags, tag);
        self.committed(CollectionKey::Tags, "add", id);
        id
    }

    pub fn update_tag_at(&mut self, index: usize, tag: Tag) -> bool {
        match replace_at(&mut self.tags, index, tag) {
            Some(id) => self.committed(CollectionKey::Tags, "update", id),
            None => false,
        }
    }

    pub fn update_tag(&mut self, id: Uuid, tag: Tag) -> bool {
        match position(&self.tags, id) {
            Some(index) => self.update_tag_at(index, with_id(tag, id)),
            None => false,
        }
    }

    /// Expenses tagged with the removed name keep it as an orphaned reference.
    pub fn delete_tag_at(&mut self, index: usize) -> Option<Tag> {
        let removed = remove_at(&mut self.tags, index)?;
        self.committed(CollectionKey::Tags, "delete", removed.id);
        Some(removed)
    }

    pub fn delete_tag(&mut self, id: Uuid) -> Option<Tag> {
        let index = position(&self.tags, id)?;
        self.delete_tag_at(index)
    }

    // --- whole store -------------------------------------------------------

    /// Empties the expenses and restores the default categories, recurring
    /// expenses and tags.
    pub fn clear_all(&mut self) {
        self.expenses.clear();
        self.recurring = seeds::default_recurring_expenses();
        self.categories = seeds::default_categories();
        self.tags = seeds::default_tags();
        info!("expense store reset to defaults");
        for key in CollectionKey::ALL {
            self.persist(key);
        }
        self.notify(&StoreEvent::Reset);
    }

    /// Orphaned tag and category references among the stored expenses.
    pub fn warnings(&self) -> Vec<String> {
        SummaryService::reference_warnings(&self.expenses, &self.categories, &self.tags)
    }

    // --- queries -----------------------------------------------------------

    pub fn query_month(&self, month: NaiveDate) -> Vec<&ExpenseEntry> {
        SummaryService::month_entries(&self.expenses, month)
    }

    pub fn month_total(&self, month: NaiveDate) -> f64 {
        SummaryService::month_total(&self.expenses, month)
    }

    pub fn category_total(&self, category: &CategoryRef, month: NaiveDate) -> f64 {
        SummaryService::category_total(&self.expenses, category, month)
    }

    pub fn tag_total(&self, tag: &str, month: NaiveDate) -> f64 {
        SummaryService::tag_total(&self.expenses, tag, month)
    }

    pub fn total_recurring_budget(&self) -> f64 {
        SummaryService::total_recurring_budget(&self.recurring)
    }

    pub fn total_recurring_spent(&self) -> f64 {
        SummaryService::total_recurring_spent(&self.recurring)
    }

    pub fn recurring_progress(&self) -> BudgetProgress {
        SummaryService::recurring_progress(&self.recurring)
    }

    pub fn available_tag_names(&self) -> Vec<String> {
        SummaryService::available_tag_names(&self.tags)
    }

    pub fn tag_breakdown(&self, month: NaiveDate) -> Breakdown {
        SummaryService::tag_breakdown(&self.expenses, month)
    }

    pub fn category_breakdown(&self, month: NaiveDate) -> Breakdown {
        SummaryService::category_breakdown(&self.expenses, &self.categories, month)
    }

    pub fn large_class_breakdown(&self, month: NaiveDate) -> Breakdown {
        SummaryService::large_class_breakdown(&self.expenses, &self.categories, month)
    }

    pub fn daily_totals(&self, month: NaiveDate) -> Vec<DailyTotal> {
        SummaryService::daily_totals(&self.expenses, month)
    }

    pub fn cumulative_series(&self, month: NaiveDate) -> Vec<CumulativePoint> {
        SummaryService::cumulative_series(&self.expenses, month)
    }

    // --- internals ---------------------------------------------------------

    fn committed(&mut self, key: CollectionKey, action: &str, id: Uuid) -> bool {
        debug!(collection = %key, action, %id, "collection mutated");
        self.persist(key);
        self.notify(&StoreEvent::Changed(key));
        true
    }

    fn persist(&mut self, key: CollectionKey) {
        let backend = self.storage.as_ref();
        let result = match key {
            CollectionKey::DailyExpenses => storage::save(backend, key.as_str(), &self.expenses),
            CollectionKey::RecurringExpenses => {
                storage::save(backend, key.as_str(), &self.recurring)
            }
            CollectionKey::Categories => storage::save(backend, key.as_str(), &self.categories),
            CollectionKey::Tags => storage::save(backend, key.as_str(), &self.tags),
        };
        match result {
            Ok(()) => {
                if self
                    .persistence_warning
                    .as_ref()
                    .is_some_and(|warning| warning.key == key)
                {
                    self.persistence_warning = None;
                }
            }
            Err(err) => {
                warn!(
                    collection = %key,
                    error = %err,
                    "failed to persist collection; in-memory change kept"
                );
                let message = err.to_string();
                self.persistence_warning = Some(PersistenceWarning {
                    key,
                    message: message.clone(),
                });
                self.notify(&StoreEvent::PersistenceFailed { key, message });
            }
        }
    }

    fn notify(&mut self, event: &StoreEvent) {
        if let Some(queue) = self.deferred.as_mut() {
            queue.push(event.clone());
            return;
        }
        for (_, subscriber) in &self.subscribers {
            subscriber(event);
        }
    }

    /// Starts holding events back instead of dispatching them.
    pub(crate) fn defer_events(&mut self) {
        self.deferred.get_or_insert_with(Vec::new);
    }

    /// Stops deferring and hands back the held events with the subscribers
    /// to deliver them to.
    pub(crate) fn take_deferred(&mut self) -> (Vec<StoreEvent>, Vec<Subscriber>) {
        let events = self.deferred.take().unwrap_or_default();
        let subscribers = self
            .subscribers
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        (events, subscribers)
    }
}

fn load_collection<T>(
    backend: &dyn StorageBackend,
    key: CollectionKey,
    defaults: fn() -> Vec<T>,
    report: &mut LoadReport,
) -> Vec<T>
where
    T: DeserializeOwned + Identifiable,
{
    let mut records = match storage::load::<Vec<T>>(backend, key.as_str()) {
        Ok(Some(records)) => records,
        Ok(None) => {
            report.defaulted.push(key);
            defaults()
        }
        Err(err) => {
            warn!(collection = %key, error = %err, "stored collection unreadable; using defaults");
            let preserved = match backend.preserve(key.as_str()) {
                Ok(()) => true,
                Err(preserve_err) => {
                    warn!(
                        collection = %key,
                        error = %preserve_err,
                        "could not keep a copy of the unreadable collection"
                    );
                    false
                }
            };
            report.defaulted.push(key);
            report.failures.push(LoadFailure {
                key,
                message: err.to_string(),
                preserved,
            });
            defaults()
        }
    };
    report.reassigned_ids += ensure_unique_ids(&mut records);
    records
}

/// Gives a fresh id to records whose id is nil or already taken.
fn ensure_unique_ids<T: Identifiable>(records: &mut [T]) -> usize {
    let mut seen = HashSet::new();
    let mut reassigned = 0;
    for record in records.iter_mut() {
        if record.id().is_nil() || !seen.insert(record.id()) {
            record.set_id(Uuid::new_v4());
            seen.insert(record.id());
            reassigned += 1;
        }
    }
    reassigned
}

fn position<T: Identifiable>(records: &[T], id: Uuid) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

fn with_id<T: Identifiable>(mut record: T, id: Uuid) -> T {
    record.set_id(id);
    record
}

fn insert<T: Identifiable>(records: &mut Vec<T>, mut record: T) -> Uuid {
    if record.id().is_nil() || position(records, record.id()).is_some() {
        record.set_id(Uuid::new_v4());
    }
    let id = record.id();
    records.push(record);
    id
}

/// Replaces the record at `index`, keeping the existing id when the
/// replacement's id is nil or belongs to another record.
fn replace_at<T: Identifiable>(records: &mut [T], index: usize, mut record: T) -> Option<Uuid> {
    let current = records.get(index)?.id();
    let clashes = position(records, record.id()).is_some_and(|found| found != index);
    if record.id().is_nil() || clashes {
        record.set_id(current);
    }
    let id = record.id();
    records[index] = record;
    Some(id)
}

fn remove_at<T>(records: &mut Vec<T>, index: usize) -> Option<T> {
    if index < records.len() {
        Some(records.remove(index))
    } else {
        None
    }
}
