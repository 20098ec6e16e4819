use super::helpers::load_tree;
use super::{AppContext, FavedCommand};
use crate::output::colorize::{Colorize, ColorizeTag};
use faved::error::Result;
use faved::items;
use faved::models::TagColor;
use faved::tags::{TagCreator, TagOptions};
use serde::{Deserialize, Serialize};

/// Create every missing tag along a path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreateCommand {
    pub path: String,
    pub description: String,
    pub color: Option<String>,
    pub pinned: bool,
}

impl FavedCommand for TagCreateCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let color = self
            .color
            .as_deref()
            .map(str::parse::<TagColor>)
            .transpose()?;
        let options = TagOptions {
            description: self.description.clone(),
            color,
            pinned: self.pinned,
        };

        let mut creator =
            TagCreator::new(ctx.db)?.with_default_color(ctx.config.default_tag_color);
        let id = creator.create_tag_from_path(&self.path, &options)?;
        eprintln!("Tag {} is {}", creator.tree().full_path(id)?, id);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagListCommand {
    pub nc: bool,
}

impl FavedCommand for TagListCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let tree = load_tree(ctx)?;
        if tree.is_empty() {
            eprintln!("No tags found in the database.");
            return Ok(());
        }
        for (depth, tag) in tree.walk() {
            println!("{}", ColorizeTag { depth, tag }.render(self.nc));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagColorCommand {
    pub id: i64,
    pub color: String,
}

impl FavedCommand for TagColorCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let color = items::update_tag_color(ctx.db, self.id, &self.color)?;
        eprintln!("Tag color updated successfully ({} is now {})", self.id, color);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPinCommand {
    pub id: i64,
    pub pinned: bool,
}

impl FavedCommand for TagPinCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        items::update_tag_pinned(ctx.db, self.id, self.pinned)?;
        let state = if self.pinned { "pinned" } else { "unpinned" };
        eprintln!("Tag {} {}", self.id, state);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRenameCommand {
    pub id: i64,
    pub title: String,
}

impl FavedCommand for TagRenameCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        items::update_tag_title(ctx.db, self.id, &self.title)?;
        eprintln!("Tag {} renamed to {}", self.id, self.title.trim());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDeleteCommand {
    pub id: i64,
}

impl FavedCommand for TagDeleteCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let deleted = items::delete_tag(ctx.db, self.id)?;
        eprintln!("Deleted {} tag(s)", deleted);
        Ok(())
    }
}
