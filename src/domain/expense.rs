use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{category::CategoryRef, common::*};

/// A single spending event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    #[serde(default)]
    pub amount: f64,
    /// Weak reference to a [`Tag`](crate::domain::tag::Tag) by name.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub tag_note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    /// Records stored without a date decode as [`ExpenseEntry::undated`].
    #[serde(default = "ExpenseEntry::undated")]
    pub date: NaiveDate,
}

impl ExpenseEntry {
    /// Date given to records stored without one, 1970-01-01. It keeps them in
    /// the collection but outside any current month.
    pub fn undated() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn is_undated(&self) -> bool {
        self.date == Self::undated()
    }

    pub fn new(amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            tag: None,
            tag_note: String::new(),
            category: None,
            date,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.tag_note = note.into();
        self
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    /// Tag name with blank values treated as absent.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag_name().is_some_and(|tag| labels_match(tag, name))
    }
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Amounted for ExpenseEntry {
    fn amount(&self) -> f64 {
        self.amount
    }
}
