use super::helpers::resolve_tag_paths;
use super::{AppContext, FavedCommand};
use faved::duplicates::find_url_matches;
use faved::error::Result;
use faved::items::{self, ItemInput};
use faved::Repository;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommand {
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
    pub description: String,
    pub comments: String,
    pub image: String,
}

impl FavedCommand for AddCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut input = ItemInput {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            comments: self.comments.clone(),
            image: self.image.clone(),
            tags: Vec::new(),
        };
        // Validate before creating any tags for it
        input.validate()?;

        // Advisory only; the bookmark is saved either way
        let existing = ctx.db.get_items()?;
        if let Some(notice) = find_url_matches(&self.url, &existing).summary() {
            eprintln!("{}", notice);
        }

        input.tags = resolve_tag_paths(ctx, &self.tags)?;
        let id = items::create_item(ctx.db, &input)?;
        eprintln!("Added bookmark at index {}", id);
        Ok(())
    }
}
