//! Domain types representing two-level expense categories.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Classifies expenses by a large class and a medium class, e.g. `Utilities` → `Electricity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    #[serde(default)]
    pub large_class: String,
    #[serde(default)]
    pub medium_class: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: CategoryColor,
}

impl Category {
    pub fn new(
        large_class: impl Into<String>,
        medium_class: impl Into<String>,
        icon: impl Into<String>,
        color: CategoryColor,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            large_class: large_class.into(),
            medium_class: medium_class.into(),
            icon: icon.into(),
            color,
        }
    }

    /// Weak reference to this category as stored on expense entries.
    pub fn reference(&self) -> CategoryRef {
        CategoryRef::new(self.large_class.clone(), self.medium_class.clone())
    }

    pub fn matches(&self, reference: &CategoryRef) -> bool {
        labels_match(&self.large_class, &reference.large_class)
            && labels_match(&self.medium_class, &reference.medium_class)
    }

    /// `Large / Medium` without the icon.
    pub fn path(&self) -> String {
        format!("{} / {}", self.large_class, self.medium_class)
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        if self.icon.is_empty() {
            self.path()
        } else {
            format!("{} {}", self.icon, self.path())
        }
    }
}

/// Reference from an expense entry to a category by its class names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(default)]
    pub large_class: String,
    #[serde(default)]
    pub medium_class: String,
}

impl CategoryRef {
    pub fn new(large_class: impl Into<String>, medium_class: impl Into<String>) -> Self {
        Self {
            large_class: large_class.into(),
            medium_class: medium_class.into(),
        }
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.large_class, self.medium_class)
    }
}

/// Fixed colour palette offered when creating a category.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
    #[default]
    Gray,
}

impl CategoryColor {
    pub const ALL: [CategoryColor; 12] = [
        CategoryColor::Red,
        CategoryColor::Orange,
        CategoryColor::Yellow,
        CategoryColor::Green,
        CategoryColor::Mint,
        CategoryColor::Teal,
        CategoryColor::Blue,
        CategoryColor::Indigo,
        CategoryColor::Purple,
        CategoryColor::Pink,
        CategoryColor::Brown,
        CategoryColor::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryColor::Red => "red",
            CategoryColor::Orange => "orange",
            CategoryColor::Yellow => "yellow",
            CategoryColor::Green => "green",
            CategoryColor::Mint => "mint",
            CategoryColor::Teal => "teal",
            CategoryColor::Blue => "blue",
            CategoryColor::Indigo => "indigo",
            CategoryColor::Purple => "purple",
            CategoryColor::Pink => "pink",
            CategoryColor::Brown => "brown",
            CategoryColor::Gray => "gray",
        }
    }

    /// Looks up a palette entry by name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_ascii_lowercase();
        let needle = if needle == "grey" { "gray".to_string() } else { needle };
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str() == needle)
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Values written by older builds may name colours outside the palette.
impl<'de> Deserialize<'de> for CategoryColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(CategoryColor::from_name(&raw).unwrap_or_default())
    }
}
