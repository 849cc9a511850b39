use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Flat label applied to daily expenses. Entries refer to tags by name only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default = "Tag::default_color")]
    pub color_hex: String,
}

impl Tag {
    pub const DEFAULT_COLOR: &'static str = "#8E8E93";

    pub fn new(name: impl Into<String>, color_hex: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color_hex: color_hex.into(),
        }
    }

    fn default_color() -> String {
        Self::DEFAULT_COLOR.to_string()
    }
}

impl Identifiable for Tag {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Displayable for Tag {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}
