use uuid::Uuid;

use crate::domain::{common::labels_match, Category, CategoryColor};
use crate::errors::ValidationError;

use super::ServiceResult;

/// Form checks run before a category reaches the store.
pub struct CategoryService;

impl CategoryService {
    /// Builds a category from raw form input, rejecting blank or duplicate class pairs.
    pub fn build(
        existing: &[Category],
        large_class: &str,
        medium_class: &str,
        icon: &str,
        color: CategoryColor,
    ) -> ServiceResult<Category> {
        let large_class = Self::required(large_class, "Large class")?;
        let medium_class = Self::required(medium_class, "Medium class")?;
        Self::validate_unique(existing, None, large_class, medium_class)?;
        Ok(Category::new(large_class, medium_class, icon.trim(), color))
    }

    /// Checks that no other category (ignoring `exclude`) uses the same pair.
    pub fn validate_unique(
        existing: &[Category],
        exclude: Option<Uuid>,
        large_class: &str,
        medium_class: &str,
    ) -> ServiceResult<()> {
        let duplicate = existing.iter().any(|category| {
            labels_match(&category.large_class, large_class)
                && labels_match(&category.medium_class, medium_class)
                && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ValidationError::DuplicateCategory(format!(
                "{} / {}",
                large_class.trim(),
                medium_class.trim()
            )))
        } else {
            Ok(())
        }
    }

    /// Distinct large classes in first-seen order, for pickers.
    pub fn large_classes(categories: &[Category]) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        for category in categories {
            if !classes
                .iter()
                .any(|known| labels_match(known, &category.large_class))
            {
                classes.push(&category.large_class);
            }
        }
        classes
    }

    pub fn medium_classes<'a>(categories: &'a [Category], large_class: &str) -> Vec<&'a Category> {
        categories
            .iter()
            .filter(|category| labels_match(&category.large_class, large_class))
            .collect()
    }

    fn required<'a>(value: &'a str, field: &'static str) -> ServiceResult<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(ValidationError::EmptyName(field))
        } else {
            Ok(trimmed)
        }
    }
}
