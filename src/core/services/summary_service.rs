use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{
    common::{days_in_month, first_of_month, labels_match, same_month},
    Amounted, Category, CategoryRef, ExpenseEntry, RecurringExpense, Tag,
};
use crate::utils::format::format_percentage;

/// Bucket label for entries without a tag.
pub const UNTAGGED: &str = "Untagged";
/// Bucket label for entries whose category is absent or no longer exists.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One group of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub total: f64,
    /// Share of the breakdown total, `0.0..=100.0`.
    pub percentage: f64,
    pub count: usize,
}

impl BreakdownEntry {
    /// Share rendered for display, e.g. `70.6%`.
    pub fn percentage_label(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// Grouped totals, largest first.
///
/// The empty state (no entries, zero total) is returned whenever the grouped
/// amounts sum to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Breakdown {
    pub total: f64,
    pub entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&BreakdownEntry> {
        self.entries
            .iter()
            .find(|entry| labels_match(&entry.label, label))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.label.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Point of a month-long running total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub daily: f64,
    pub cumulative: f64,
}

/// Budget against actual spend, for a single line or a whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    /// `spent / budget`, `0.0` when no budget is set.
    pub ratio: f64,
    pub over_budget: bool,
}

impl BudgetProgress {
    pub fn new(budget: f64, spent: f64) -> Self {
        Self {
            budget,
            spent,
            remaining: budget - spent,
            ratio: if budget > 0.0 { spent / budget } else { 0.0 },
            over_budget: spent > budget,
        }
    }
}

impl From<&RecurringExpense> for BudgetProgress {
    fn from(line: &RecurringExpense) -> Self {
        Self::new(line.budget, line.actual_spent)
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Entries dated in the same year and month as `month`, in stored order.
    pub fn month_entries(entries: &[ExpenseEntry], month: NaiveDate) -> Vec<&ExpenseEntry> {
        entries
            .iter()
            .filter(|entry| same_month(entry.date, month))
            .collect()
    }

    pub fn month_total(entries: &[ExpenseEntry], month: NaiveDate) -> f64 {
        Self::sum(Self::month_entries(entries, month))
    }

    /// Sum of the amounts recorded by `records`.
    pub fn sum<'a, T, I>(records: I) -> f64
    where
        T: Amounted + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records.into_iter().map(Amounted::amount).sum()
    }

    pub fn category_total(
        entries: &[ExpenseEntry],
        category: &CategoryRef,
        month: NaiveDate,
    ) -> f64 {
        Self::month_entries(entries, month)
            .into_iter()
            .filter(|entry| {
                entry.category.as_ref().is_some_and(|current| {
                    labels_match(&current.large_class, &category.large_class)
                        && labels_match(&current.medium_class, &category.medium_class)
                })
            })
            .map(|entry| entry.amount)
            .sum()
    }

    pub fn tag_total(entries: &[ExpenseEntry], tag: &str, month: NaiveDate) -> f64 {
        Self::month_entries(entries, month)
            .into_iter()
            .filter(|entry| entry.has_tag(tag))
            .map(|entry| entry.amount)
            .sum()
    }

    /// Per-tag totals for the month; entries without a tag land in [`UNTAGGED`].
    pub fn tag_breakdown(entries: &[ExpenseEntry], month: NaiveDate) -> Breakdown {
        let month_entries = Self::month_entries(entries, month);
        Self::group_by(&month_entries, |entry| {
            entry.tag_name().unwrap_or(UNTAGGED).to_string()
        })
    }

    /// Per-category totals labelled `Large / Medium`; unknown references land in
    /// [`UNCATEGORIZED`].
    pub fn category_breakdown(
        entries: &[ExpenseEntry],
        categories: &[Category],
        month: NaiveDate,
    ) -> Breakdown {
        let month_entries = Self::month_entries(entries, month);
        Self::group_by(&month_entries, |entry| {
            Self::resolve_category(entry, categories)
                .map(Category::path)
                .unwrap_or_else(|| UNCATEGORIZED.to_string())
        })
    }

    /// Per-large-class totals; unknown references land in [`UNCATEGORIZED`].
    pub fn large_class_breakdown(
        entries: &[ExpenseEntry],
        categories: &[Category],
        month: NaiveDate,
    ) -> Breakdown {
        let month_entries = Self::month_entries(entries, month);
        Self::group_by(&month_entries, |entry| {
            Self::resolve_category(entry, categories)
                .map(|category| category.large_class.clone())
                .unwrap_or_else(|| UNCATEGORIZED.to_string())
        })
    }

    /// Totals for each day that has spending, earliest first.
    pub fn daily_totals(entries: &[ExpenseEntry], month: NaiveDate) -> Vec<DailyTotal> {
        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for entry in Self::month_entries(entries, month) {
            *by_day.entry(entry.date).or_insert(0.0) += entry.amount;
        }
        by_day
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect()
    }

    /// Running total over every day of the month, including days without spending.
    pub fn cumulative_series(entries: &[ExpenseEntry], month: NaiveDate) -> Vec<CumulativePoint> {
        let start = first_of_month(month);
        let mut daily = vec![0.0; days_in_month(start.year(), start.month()) as usize];
        for entry in Self::month_entries(entries, month) {
            let slot = entry.date.day0() as usize;
            if let Some(total) = daily.get_mut(slot) {
                *total += entry.amount;
            }
        }

        let mut running = 0.0;
        daily
            .into_iter()
            .zip(start.iter_days())
            .map(|(amount, date)| {
                running += amount;
                CumulativePoint {
                    date,
                    daily: amount,
                    cumulative: running,
                }
            })
            .collect()
    }

    pub fn total_recurring_budget(lines: &[RecurringExpense]) -> f64 {
        lines.iter().map(|line| line.budget).sum()
    }

    pub fn total_recurring_spent(lines: &[RecurringExpense]) -> f64 {
        Self::sum(lines)
    }

    pub fn recurring_progress(lines: &[RecurringExpense]) -> BudgetProgress {
        BudgetProgress::new(
            Self::total_recurring_budget(lines),
            Self::total_recurring_spent(lines),
        )
    }

    /// Distinct tag names, alphabetical. Names differing only by case collapse
    /// to the first spelling.
    pub fn available_tag_names(tags: &[Tag]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = tags
            .iter()
            .map(|tag| tag.name.trim())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.to_lowercase()))
            .map(str::to_string)
            .collect();
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
        names
    }

    /// Describes entries whose tag or category reference no longer resolves.
    pub fn reference_warnings(
        entries: &[ExpenseEntry],
        categories: &[Category],
        tags: &[Tag],
    ) -> Vec<String> {
        let mut warnings = Vec::new();
        for entry in entries {
            if let Some(tag) = entry.tag_name() {
                if !tags.iter().any(|known| labels_match(&known.name, tag)) {
                    warnings.push(format!(
                        "expense {} references unknown tag `{}`",
                        entry.id, tag
                    ));
                }
            }
            if let Some(category) = entry.category.as_ref() {
                if !categories.iter().any(|known| known.matches(category)) {
                    warnings.push(format!(
                        "expense {} references missing category `{}`",
                        entry.id, category
                    ));
                }
            }
        }
        warnings
    }

    fn resolve_category<'a>(
        entry: &ExpenseEntry,
        categories: &'a [Category],
    ) -> Option<&'a Category> {
        let reference = entry.category.as_ref()?;
        categories
            .iter()
            .find(|category| category.matches(reference))
    }

    fn group_by<F>(entries: &[&ExpenseEntry], key: F) -> Breakdown
    where
        F: Fn(&ExpenseEntry) -> String,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<BreakdownEntry> = Vec::new();
        for entry in entries {
            let label = key(entry);
            let slot = *positions.entry(label.to_lowercase()).or_insert_with(|| {
                groups.push(BreakdownEntry {
                    label,
                    total: 0.0,
                    percentage: 0.0,
                    count: 0,
                });
                groups.len() - 1
            });
            groups[slot].total += entry.amount;
            groups[slot].count += 1;
        }

        let total: f64 = groups.iter().map(|group| group.total).sum();
        if total <= 0.0 {
            return Breakdown::default();
        }
        for group in &mut groups {
            group.percentage = group.total / total * 100.0;
        }
        // Stable: ties keep discovery order.
        groups.sort_by(|a, b| b.total.total_cmp(&a.total));
        Breakdown {
            total,
            entries: groups,
        }
    }
}
