use uuid::Uuid;

use crate::domain::{common::labels_match, Tag};
use crate::errors::ValidationError;

use super::ServiceResult;

pub struct TagService;

impl TagService {
    pub fn build(existing: &[Tag], name: &str, color_hex: &str) -> ServiceResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("Tag name"));
        }
        Self::validate_name(existing, None, name)?;
        let color = Self::normalize_color(color_hex)?;
        Ok(Tag::new(name, color))
    }

    pub fn validate_name(
        existing: &[Tag],
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let duplicate = existing.iter().any(|tag| {
            labels_match(&tag.name, candidate) && exclude.map_or(true, |id| tag.id != id)
        });
        if duplicate {
            Err(ValidationError::DuplicateTag(candidate.trim().to_string()))
        } else {
            Ok(())
        }
    }

    /// Accepts `#RRGGBB` or `RRGGBB` and returns the upper-case `#RRGGBB` form.
    /// Blank input falls back to [`Tag::DEFAULT_COLOR`].
    pub fn normalize_color(raw: &str) -> ServiceResult<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Tag::DEFAULT_COLOR.to_string());
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor(raw.to_string()));
        }
        Ok(format!("#{}", digits.to_ascii_uppercase()))
    }
}
