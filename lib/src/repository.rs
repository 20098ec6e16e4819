use crate::error::Result;
use crate::models::{Item, NewItem, NewTag, Tag, TagColor};
use std::collections::HashMap;

/// Persistence operations the tag core, importers and item service rely on.
///
/// Every caller re-reads what it needs through this trait at the start of an
/// operation; implementations must not cache the tag forest across calls.
pub trait Repository {
    /// All tags keyed by id.
    fn get_tags(&self) -> Result<HashMap<i64, Tag>>;

    /// Insert one tag row and return its id.
    fn create_tag(&self, tag: &NewTag) -> Result<i64>;

    fn update_tag_color(&self, tag_id: i64, color: TagColor) -> Result<bool>;

    fn update_tag_pinned(&self, tag_id: i64, pinned: bool) -> Result<bool>;

    fn update_tag_title(&self, tag_id: i64, title: &str) -> Result<bool>;

    /// Delete the given tag rows and their item memberships; items stay.
    /// Returns how many tags were removed.
    fn delete_tags(&self, tag_ids: &[i64]) -> Result<usize>;

    /// All items with their tag ids, newest first.
    fn get_items(&self) -> Result<Vec<Item>>;

    fn get_item(&self, item_id: i64) -> Result<Option<Item>>;

    fn find_item_by_url(&self, url: &str) -> Result<Option<Item>>;

    /// Insert one item row and return its id. `parent_tag_id` is accepted for
    /// interface compatibility and only logged; membership goes through
    /// [`Repository::attach_item_tags`].
    fn create_item(&self, item: &NewItem, parent_tag_id: Option<i64>) -> Result<i64>;

    /// Add tag memberships, ignoring ones that already exist.
    fn attach_item_tags(&self, tag_ids: &[i64], item_id: i64) -> Result<()>;

    /// Overwrite the item's fields. Returns `false` when no row was touched.
    fn update_item(&self, item_id: i64, item: &NewItem) -> Result<bool>;

    /// Replace the item's tag memberships with exactly `tag_ids`.
    fn set_item_tags(&self, tag_ids: &[i64], item_id: i64) -> Result<bool>;

    fn delete_item(&self, item_id: i64) -> Result<bool>;

    /// Execute a batch of SQL statements (demo content seeding only).
    fn run_raw_sql(&self, sql: &str) -> Result<()>;
}
