//! Default collections used when nothing has been persisted yet.
//!
//! Seed records carry fixed identifiers so a fresh store always starts from the
//! same data.

use uuid::Uuid;

use crate::domain::{
    category::{Category, CategoryColor},
    recurring::RecurringExpense,
    tag::Tag,
};

const CATEGORY_SEEDS: &[(u128, &str, &str, &str, CategoryColor)] = &[
    (0x01, "Food", "Groceries", "🛒", CategoryColor::Green),
    (0x02, "Food", "Dining Out", "🍽️", CategoryColor::Orange),
    (0x03, "Housing", "Rent", "🏠", CategoryColor::Brown),
    (0x04, "Utilities", "Electricity", "💡", CategoryColor::Yellow),
    (0x05, "Utilities", "Water", "🚰", CategoryColor::Blue),
    (0x06, "Utilities", "Gas", "🔥", CategoryColor::Red),
    (0x07, "Transport", "Train", "🚃", CategoryColor::Teal),
    (0x08, "Daily Goods", "Household", "🧴", CategoryColor::Mint),
    (0x09, "Communication", "Mobile", "📱", CategoryColor::Indigo),
    (0x0a, "Entertainment", "Hobbies", "🎮", CategoryColor::Purple),
    (0x0b, "Health", "Medical", "💊", CategoryColor::Pink),
];

const RECURRING_SEEDS: &[(u128, &str, f64)] = &[
    (0x101, "Rent", 80_000.0),
    (0x102, "Electricity", 8_000.0),
    (0x103, "Water", 3_000.0),
    (0x104, "Gas", 5_000.0),
    (0x105, "Internet", 5_000.0),
    (0x106, "Mobile Phone", 3_000.0),
    (0x107, "Insurance", 10_000.0),
];

const TAG_SEEDS: &[(u128, &str, &str)] = &[
    (0x201, "Cafe", "#A2845E"),
    (0x202, "Supermarket", "#34C759"),
    (0x203, "Convenience Store", "#FF9500"),
    (0x204, "Restaurant", "#FF3B30"),
    (0x205, "Transport", "#007AFF"),
    (0x206, "Other", "#8E8E93"),
];

pub fn default_categories() -> Vec<Category> {
    CATEGORY_SEEDS
        .iter()
        .map(|&(id, large, medium, icon, color)| Category {
            id: Uuid::from_u128(id),
            large_class: large.into(),
            medium_class: medium.into(),
            icon: icon.into(),
            color,
        })
        .collect()
}

pub fn default_recurring_expenses() -> Vec<RecurringExpense> {
    RECURRING_SEEDS
        .iter()
        .map(|&(id, name, budget)| RecurringExpense {
            id: Uuid::from_u128(id),
            name: name.into(),
            budget,
            actual_spent: 0.0,
            last_month_spent: None,
        })
        .collect()
}

pub fn default_tags() -> Vec<Tag> {
    TAG_SEEDS
        .iter()
        .map(|&(id, name, color)| Tag {
            id: Uuid::from_u128(id),
            name: name.into(),
            color_hex: color.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeds_are_stable_between_calls() {
        assert_eq!(default_categories(), default_categories());
        assert_eq!(default_recurring_expenses(), default_recurring_expenses());
        assert_eq!(default_tags(), default_tags());
    }

    #[test]
    fn seed_identifiers_are_unique_across_collections() {
        let mut ids = HashSet::new();
        ids.extend(default_categories().iter().map(|c| c.id));
        ids.extend(default_recurring_expenses().iter().map(|r| r.id));
        ids.extend(default_tags().iter().map(|t| t.id));
        assert_eq!(
            ids.len(),
            CATEGORY_SEEDS.len() + RECURRING_SEEDS.len() + TAG_SEEDS.len()
        );
    }

    #[test]
    fn seed_category_pairs_are_unique() {
        let pairs: HashSet<_> = default_categories()
            .iter()
            .map(|c| (c.large_class.to_lowercase(), c.medium_class.to_lowercase()))
            .collect();
        assert_eq!(pairs.len(), CATEGORY_SEEDS.len());
    }
}
