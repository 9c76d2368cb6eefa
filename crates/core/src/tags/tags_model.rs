use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TAG_DESCRIPTION_LEN;

/// A user created tag.
///
/// Field order matters: tags sort by name, then color, shape, description and
/// finally id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    name: String,
    color: i32,
    shape: i8,
    description: String,
    id: String,
}

impl Tag {
    /// Creates a tag with a fresh id. A blank name leaves the tag unnamed.
    pub fn new(name: &str) -> Self {
        let mut tag = Self {
            name: String::new(),
            color: 0,
            shape: 0,
            description: String::new(),
            id: uuid::Uuid::new_v4().to_string(),
        };
        tag.set_name(name);
        tag
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blank names are ignored.
    pub fn set_name(&mut self, name: &str) {
        if !name.trim().is_empty() {
            self.name = name.to_string();
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Descriptions longer than `MAX_TAG_DESCRIPTION_LEN` characters are ignored.
    pub fn set_description(&mut self, description: &str) {
        if description.chars().count() <= MAX_TAG_DESCRIPTION_LEN {
            self.description = description.to_string();
        }
    }

    pub fn color(&self) -> i32 {
        self.color
    }

    pub fn set_color(&mut self, color: i32) {
        self.color = color;
    }

    pub fn shape(&self) -> i8 {
        self.shape
    }

    pub fn set_shape(&mut self, shape: i8) {
        self.shape = shape;
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
