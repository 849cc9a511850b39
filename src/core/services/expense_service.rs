use chrono::NaiveDate;

use crate::domain::{CategoryRef, ExpenseEntry, RecurringExpense};
use crate::errors::ValidationError;

use super::ServiceResult;

/// Parses amounts typed into forms and assembles expense records.
pub struct ExpenseService;

impl ExpenseService {
    /// Accepts plain numbers with optional thousands separators, a leading
    /// currency symbol, and full-width digits.
    pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
        let cleaned: String = raw
            .trim()
            .chars()
            .map(normalize_digit)
            .filter(|c| !matches!(c, ',' | '_' | ' ' | '¥' | '$' | '€' | '£' | '円'))
            .collect();
        if cleaned.is_empty() {
            return Err(ValidationError::EmptyAmount);
        }
        let value: f64 = cleaned
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(raw.trim().to_string()))?;
        if !value.is_finite() {
            return Err(ValidationError::InvalidAmount(raw.trim().to_string()));
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeAmount);
        }
        Ok(value)
    }

    pub fn build_daily(
        raw_amount: &str,
        date: NaiveDate,
        tag: Option<&str>,
        note: &str,
    ) -> ServiceResult<ExpenseEntry> {
        let amount = Self::parse_amount(raw_amount)?;
        let mut entry = ExpenseEntry::new(amount, date).with_note(note.trim());
        entry.tag = tag
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Ok(entry)
    }

    pub fn build_categorized(
        raw_amount: &str,
        date: NaiveDate,
        category: CategoryRef,
        note: &str,
    ) -> ServiceResult<ExpenseEntry> {
        let amount = Self::parse_amount(raw_amount)?;
        Ok(ExpenseEntry::new(amount, date)
            .with_category(category)
            .with_note(note.trim()))
    }

    pub fn build_recurring(name: &str, raw_budget: &str) -> ServiceResult<RecurringExpense> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("Name"));
        }
        let budget = Self::parse_amount(raw_budget)?;
        Ok(RecurringExpense::new(name, budget))
    }
}

fn normalize_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        '．' => '.',
        '，' => ',',
        other => other,
    }
}
