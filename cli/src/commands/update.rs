use super::helpers::resolve_tag_paths;
use super::{AppContext, FavedCommand};
use faved::error::{FavedError, Result};
use faved::items::{self, ItemInput};
use faved::Repository;
use serde::{Deserialize, Serialize};

/// Overwrite the given fields of an item, keeping the rest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommand {
    pub id: i64,
    pub url: Option<String>,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
    pub comments: Option<String>,
    pub image: Option<String>,
}

impl FavedCommand for UpdateCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let item = ctx
            .db
            .get_item(self.id)?
            .ok_or(FavedError::ItemNotFound(self.id))?;

        let mut input = ItemInput {
            title: self.title.clone().unwrap_or(item.title),
            url: self.url.clone().unwrap_or(item.url),
            description: self.description.clone().unwrap_or(item.description),
            comments: self.comments.clone().unwrap_or(item.comments),
            image: self.image.clone().unwrap_or(item.image),
            tags: item.tags.into_iter().collect(),
        };
        input.validate()?;

        if let Some(paths) = &self.tags {
            input.tags = resolve_tag_paths(ctx, paths)?;
        }

        items::update_item(ctx.db, self.id, &input)?;
        eprintln!("Item updated successfully");
        Ok(())
    }
}
