use crate::error::{FavedError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parent id used for root-level tags
pub const ROOT_PARENT_ID: i64 = 0;

/// Fixed tag color palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    #[default]
    Gray,
    Green,
    Red,
    Yellow,
    Aqua,
    White,
    Black,
}

impl TagColor {
    pub const ALL: [TagColor; 7] = [
        TagColor::Gray,
        TagColor::Green,
        TagColor::Red,
        TagColor::Yellow,
        TagColor::Aqua,
        TagColor::White,
        TagColor::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagColor::Gray => "gray",
            TagColor::Green => "green",
            TagColor::Red => "red",
            TagColor::Yellow => "yellow",
            TagColor::Aqua => "aqua",
            TagColor::White => "white",
            TagColor::Black => "black",
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagColor {
    type Err = FavedError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TagColor::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| FavedError::Validation(format!("Unknown tag color: '{}'", s)))
    }
}

/// A persisted tag. `parent_id == 0` means the tag sits at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub parent_id: i64,
    pub title: String,
    pub description: String,
    pub color: TagColor,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tag {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }

    /// Case-insensitive title comparison used for sibling uniqueness.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Fields needed to insert one tag row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub title: String,
    pub description: String,
    pub parent_id: i64,
    pub color: Option<TagColor>,
    pub pinned: bool,
}

impl NewTag {
    pub fn new(title: impl Into<String>, parent_id: i64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            parent_id,
            color: None,
            pinned: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: TagColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }
}
