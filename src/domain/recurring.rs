//! Fixed monthly budget lines tracked against a manually entered actual spend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A monthly budget line such as rent or electricity.
///
/// `actual_spent` is edited by the user and never reset automatically; moving the
/// figure into `last_month_spent` at month end is the user's call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub actual_spent: f64,
    #[serde(default)]
    pub last_month_spent: Option<f64>,
}

impl RecurringExpense {
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            budget,
            actual_spent: 0.0,
            last_month_spent: None,
        }
    }

    pub fn with_actual(mut self, actual_spent: f64) -> Self {
        self.actual_spent = actual_spent;
        self
    }

    pub fn remaining(&self) -> f64 {
        self.budget - self.actual_spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual_spent > self.budget
    }

    /// Share of the budget consumed, `0.0` when no budget is set.
    pub fn progress(&self) -> f64 {
        if self.budget > 0.0 {
            self.actual_spent / self.budget
        } else {
            0.0
        }
    }

    /// Difference between this month and the recorded previous month.
    pub fn month_over_month(&self) -> Option<f64> {
        self.last_month_spent.map(|last| self.actual_spent - last)
    }
}

impl Identifiable for RecurringExpense {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Amounted for RecurringExpense {
    fn amount(&self) -> f64 {
        self.actual_spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_follow_actual_spend() {
        let line = RecurringExpense::new("Electricity", 8000.0).with_actual(9500.0);
        assert_eq!(line.remaining(), -1500.0);
        assert!(line.is_over_budget());
        assert!((line.progress() - 1.1875).abs() < 1e-9);
    }

    #[test]
    fn spending_exactly_the_budget_is_not_over() {
        let line = RecurringExpense::new("Rent", 80000.0).with_actual(80000.0);
        assert!(!line.is_over_budget());
        assert_eq!(line.remaining(), 0.0);
    }

    #[test]
    fn zero_budget_reports_zero_progress() {
        let line = RecurringExpense::new("Misc", 0.0).with_actual(100.0);
        assert_eq!(line.progress(), 0.0);
    }

    #[test]
    fn month_over_month_needs_a_snapshot() {
        let mut line = RecurringExpense::new("Water", 3000.0).with_actual(2800.0);
        assert_eq!(line.month_over_month(), None);
        line.last_month_spent = Some(3100.0);
        assert_eq!(line.month_over_month(), Some(-300.0));
    }
}
