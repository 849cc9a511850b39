use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

/// Identifies records that carry a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Exposes the spend recorded by a record.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Returns true when both dates fall in the same calendar year and month.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

/// Case-insensitive comparison of two user-entered labels, ignoring surrounding whitespace.
pub fn labels_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use uuid;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_month_rejects_adjacent_days() {
        assert!(same_month(date(2025, 2, 1), date(2025, 2, 28)));
        assert!(!same_month(date(2025, 1, 31), date(2025, 2, 1)));
        assert!(!same_month(date(2024, 2, 1), date(2025, 2, 1)));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn labels_match_ignores_case_and_padding() {
        assert!(labels_match(" Cafe ", "cafe"));
        assert!(!labels_match("Cafe", "Cafes"));
    }
}
