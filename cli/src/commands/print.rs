use super::helpers::load_tree;
use super::{AppContext, FavedCommand};
use crate::output::colorize::{Colorize, ColorizeItem};
use faved::error::{FavedError, Result};
use faved::models::ROOT_PARENT_ID;
use faved::tags::{resolve_segments, TagTree};
use faved::Repository;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCommand {
    pub tag: Option<String>,
    pub nc: bool,
}

/// Follow a tag path from the root, matching titles case-insensitively.
fn find_tag_by_path(tree: &TagTree, path: &str) -> Option<i64> {
    let segments = resolve_segments(path);
    if segments.is_empty() {
        return None;
    }
    segments.iter().try_fold(ROOT_PARENT_ID, |parent, title| {
        tree.find_by_title_under_parent(title, parent).map(|t| t.id)
    })
}

impl FavedCommand for ListCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let tree = load_tree(ctx)?;
        let mut items = ctx.db.get_items()?;

        if let Some(path) = &self.tag {
            let tag_id = find_tag_by_path(&tree, path)
                .ok_or_else(|| FavedError::Validation(format!("No tag at path '{}'", path)))?;
            let wanted = tree.descendants(tag_id);
            items.retain(|item| item.tags.iter().any(|id| wanted.contains(id)));
        }

        if items.is_empty() {
            eprintln!("No bookmarks to display.");
            return Ok(());
        }

        for item in &items {
            println!("{}", ColorizeItem { item, tree: &tree }.render(self.nc));
        }
        Ok(())
    }
}
