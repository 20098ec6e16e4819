use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Represents a saved bookmark with its metadata and tag membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub comments: String,
    pub image: String,
    pub tags: BTreeSet<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields needed to insert or overwrite an item row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub comments: String,
    pub image: String,
    /// Creation time carried over from an import; `None` means now
    pub created_at: Option<DateTime<Utc>>,
}

impl NewItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}
