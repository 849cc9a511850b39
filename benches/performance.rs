use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::{
    core::services::SummaryService,
    domain::{seeds, ExpenseEntry},
    storage::{self, JsonStorage},
};
use tempfile::tempdir;

fn build_sample_expenses(count: usize) -> Vec<ExpenseEntry> {
    let tags = seeds::default_tags();
    let categories = seeds::default_categories();
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    (0..count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            let mut entry = ExpenseEntry::new(100.0 + (idx % 900) as f64, date)
                .with_tag(tags[idx % tags.len()].name.clone());
            if idx % 2 == 0 {
                entry = entry.with_category(categories[idx % categories.len()].reference());
            }
            entry
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let expenses = build_sample_expenses(10_000);
    let categories = seeds::default_categories();
    let month = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("tag_breakdown_10k", |b| {
        b.iter(|| black_box(SummaryService::tag_breakdown(&expenses, month)))
    });

    c.bench_function("category_breakdown_10k", |b| {
        b.iter(|| {
            black_box(SummaryService::category_breakdown(
                &expenses,
                &categories,
                month,
            ))
        })
    });

    c.bench_function("cumulative_series_10k", |b| {
        b.iter(|| black_box(SummaryService::cumulative_series(&expenses, month)))
    });
}

fn bench_persistence(c: &mut Criterion) {
    let expenses = build_sample_expenses(10_000);
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf()))
        .expect("json storage")
        .with_pretty(false);

    c.bench_function("expenses_save_10k", |b| {
        b.iter(|| storage::save(&storage, "daily_expenses", &expenses).expect("save expenses"))
    });

    c.bench_function("expenses_load_10k", |b| {
        b.iter(|| {
            let loaded: Option<Vec<ExpenseEntry>> =
                storage::load(&storage, "daily_expenses").expect("load expenses");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_persistence);
criterion_main!(benches);
