mod common;

use std::sync::{Arc, Mutex};

use common::date;
use expense_core::{
    core::services::{ExpenseService, TagService, UNTAGGED},
    domain::{common::uuid::Uuid, seeds, CategoryRef, ExpenseEntry, RecurringExpense, Tag},
    storage::{CollectionKey, MemoryStorage},
    ExpenseStore, StoreEvent,
};

fn memory_store() -> ExpenseStore {
    ExpenseStore::open(Box::new(MemoryStorage::new()))
}

fn november_store() -> ExpenseStore {
    let mut store = memory_store();
    store.add_expense(ExpenseEntry::new(500.0, date(2025, 11, 1)).with_tag("Cafe"));
    store.add_expense(ExpenseEntry::new(1200.0, date(2025, 11, 2)).with_tag("Supermarket"));
    store.add_expense(ExpenseEntry::new(800.0, date(2025, 12, 1)).with_tag("Cafe"));
    store
}

#[test]
fn november_scenario() {
    let store = november_store();
    let month = store.query_month(date(2025, 11, 15));
    let amounts: Vec<f64> = month.iter().map(|entry| entry.amount).collect();
    assert_eq!(amounts, vec![500.0, 1200.0]);
    assert_eq!(store.month_total(date(2025, 11, 15)), 1700.0);

    let breakdown = store.tag_breakdown(date(2025, 11, 15));
    assert_eq!(breakdown.labels(), vec!["Supermarket", "Cafe"]);
    assert_eq!(breakdown.get("Cafe").map(|e| e.total), Some(500.0));
    assert_eq!(breakdown.get("Supermarket").map(|e| e.total), Some(1200.0));
    assert_eq!(store.tag_total("cafe", date(2025, 12, 31)), 800.0);
}

#[test]
fn query_month_excludes_neighbouring_days() {
    let mut store = memory_store();
    store.add_expense(ExpenseEntry::new(10.0, date(2025, 1, 31)));
    store.add_expense(ExpenseEntry::new(20.0, date(2025, 2, 1)));
    let february = store.query_month(date(2025, 2, 15));
    assert_eq!(february.len(), 1);
    assert_eq!(february[0].date, date(2025, 2, 1));
}

#[test]
fn add_then_delete_restores_collection() {
    let mut store = november_store();
    let before = store.expenses().to_vec();
    let id = store.add_expense(ExpenseEntry::new(42.0, date(2025, 11, 9)));
    let index = store.index_of_expense(id).expect("added entry is indexed");
    assert_eq!(index, before.len());
    store.delete_expense_at(index).expect("entry removed");
    assert_eq!(store.expenses(), before.as_slice());

    let before = store.tags().to_vec();
    let id = store.add_tag(Tag::new("Bakery", "#FFCC00"));
    assert!(store.delete_tag(id).is_some());
    assert_eq!(store.tags(), before.as_slice());
}

#[test]
fn id_addressing_ignores_position_changes() {
    let mut store = november_store();
    let target = store.expenses()[1].id;
    store.delete_expense_at(0);

    let mut edited = store.expense(target).cloned().unwrap();
    edited.amount = 1300.0;
    edited.id = Uuid::nil();
    assert!(store.update_expense(target, edited));

    let updated = store.expense(target).unwrap();
    assert_eq!(updated.amount, 1300.0);
    assert_eq!(store.expenses()[0].id, target);
}

#[test]
fn category_total_over_month() {
    let mut store = memory_store();
    let groceries = CategoryRef::new("Food", "Groceries");
    store.add_expense(ExpenseEntry::new(3000.0, date(2025, 6, 1)).with_category(groceries.clone()));
    store.add_expense(
        ExpenseEntry::new(1500.0, date(2025, 6, 20)).with_category(groceries.clone()),
    );
    store.add_expense(ExpenseEntry::new(999.0, date(2025, 7, 1)).with_category(groceries.clone()));
    store.add_expense(
        ExpenseEntry::new(8000.0, date(2025, 6, 5))
            .with_category(CategoryRef::new("Utilities", "Electricity")),
    );

    assert_eq!(store.category_total(&groceries, date(2025, 6, 1)), 4500.0);
    assert_eq!(store.category_total(&groceries, date(2025, 5, 1)), 0.0);

    let breakdown = store.category_breakdown(date(2025, 6, 1));
    assert_eq!(breakdown.labels(), vec!["Utilities / Electricity", "Food / Groceries"]);
    let sum: f64 = breakdown.entries.iter().map(|e| e.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn empty_month_short_circuits() {
    let store = november_store();
    let breakdown = store.tag_breakdown(date(2026, 1, 1));
    assert!(breakdown.is_empty());
    assert_eq!(breakdown.total, 0.0);
    assert!(store.daily_totals(date(2026, 1, 1)).is_empty());
    let series = store.cumulative_series(date(2026, 1, 1));
    assert_eq!(series.len(), 31);
    assert_eq!(series.last().map(|p| p.cumulative), Some(0.0));
}

#[test]
fn cumulative_series_ends_at_month_total() {
    let store = november_store();
    let series = store.cumulative_series(date(2025, 11, 1));
    assert_eq!(series.len(), 30);
    assert_eq!(
        series.last().map(|p| p.cumulative),
        Some(store.month_total(date(2025, 11, 1)))
    );
}

#[test]
fn deleting_a_tag_orphans_existing_references() {
    let mut store = november_store();
    let cafe = store
        .tags()
        .iter()
        .find(|tag| tag.name == "Cafe")
        .map(|tag| tag.id)
        .unwrap();
    store.delete_tag(cafe);

    assert!(!store.available_tag_names().contains(&"Cafe".to_string()));
    assert_eq!(store.expenses()[0].tag.as_deref(), Some("Cafe"));
    let breakdown = store.tag_breakdown(date(2025, 11, 1));
    assert!(breakdown.get("Cafe").is_some());
    assert!(breakdown.get(UNTAGGED).is_none());
    assert_eq!(store.warnings().len(), 2);
}

#[test]
fn recurring_totals_track_manual_edits() {
    let mut store = memory_store();
    let budget = store.total_recurring_budget();
    assert_eq!(budget, 114_000.0);
    assert_eq!(store.total_recurring_spent(), 0.0);

    let mut electricity = store.recurring_expenses()[1].clone();
    electricity.actual_spent = 9_500.0;
    assert!(store.update_recurring_at(1, electricity));
    store.add_recurring(RecurringExpense::new("Gym", 7_000.0).with_actual(7_000.0));

    assert_eq!(store.total_recurring_budget(), 121_000.0);
    assert_eq!(store.total_recurring_spent(), 16_500.0);
    let progress = store.recurring_progress();
    assert_eq!(progress.remaining, 104_500.0);
    assert!(!progress.over_budget);
    assert!(store.recurring_expenses()[1].is_over_budget());
}

#[test]
fn available_tag_names_are_sorted() {
    let mut store = memory_store();
    store.add_tag(Tag::new("Bakery", "#FFCC00"));
    assert_eq!(
        store.available_tag_names(),
        vec![
            "Bakery",
            "Cafe",
            "Convenience Store",
            "Other",
            "Restaurant",
            "Supermarket",
            "Transport"
        ]
    );
}

#[test]
fn form_flow_validates_before_store() {
    let mut store = memory_store();
    let err = TagService::build(store.tags(), "supermarket", "#00FF00").unwrap_err();
    assert!(err.to_string().contains("already exists"));

    let tag = TagService::build(store.tags(), "Pharmacy", "#00ff00").unwrap();
    store.add_tag(tag);
    let entry =
        ExpenseService::build_daily("¥1,980", date(2025, 11, 7), Some("Pharmacy"), "").unwrap();
    store.add_expense(entry);
    assert_eq!(store.tag_total("Pharmacy", date(2025, 11, 1)), 1980.0);
    assert!(store.warnings().is_empty());
}

#[test]
fn events_follow_each_collection() {
    let mut store = memory_store();
    let log: Arc<Mutex<Vec<StoreEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    store.add_expense(ExpenseEntry::new(1.0, date(2025, 1, 1)));
    store.delete_category_at(0);
    store.update_tag_at(99, Tag::new("Nope", "#000000"));
    store.clear_all();

    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            StoreEvent::Changed(CollectionKey::DailyExpenses),
            StoreEvent::Changed(CollectionKey::Categories),
            StoreEvent::Reset,
        ]
    );
    assert_eq!(store.categories(), seeds::default_categories().as_slice());
}

#[test]
fn shared_store_subscriber_rerenders_from_queries() {
    let shared = memory_store().into_shared();
    let rendered: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rendered);
    let view = shared.downgrade();
    shared
        .subscribe(move |event| {
            if !event.affects(CollectionKey::DailyExpenses) {
                return;
            }
            if let Some(store) = view.upgrade() {
                let total = store
                    .read(|store| store.month_total(date(2025, 11, 1)))
                    .expect("store readable from subscriber");
                sink.lock().unwrap().push(total);
            }
        })
        .unwrap();

    let cafe = shared
        .update(|store| store.add_expense(ExpenseEntry::new(500.0, date(2025, 11, 1))))
        .unwrap();
    shared
        .update(|store| store.add_expense(ExpenseEntry::new(1200.0, date(2025, 11, 2))))
        .unwrap();
    shared.update(|store| store.delete_expense(cafe)).unwrap();

    assert_eq!(*rendered.lock().unwrap(), vec![500.0, 1700.0, 1200.0]);
}
