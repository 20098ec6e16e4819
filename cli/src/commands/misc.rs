use super::helpers::load_tree;
use super::{AppContext, FavedCommand};
use crate::output::colorize::{Colorize, ColorizeItem};
use faved::duplicates::find_url_matches;
use faved::error::Result;
use faved::items::seed_welcome_content;
use faved::Repository;
use serde::{Deserialize, Serialize};

/// Show saved items resembling a URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DupesCommand {
    pub url: String,
    pub nc: bool,
}

impl FavedCommand for DupesCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let items = ctx.db.get_items()?;
        let matches = find_url_matches(&self.url, &items);

        let Some(summary) = matches.summary() else {
            eprintln!("No similar bookmarks found.");
            return Ok(());
        };
        eprintln!("{}", summary);

        let tree = load_tree(ctx)?;
        for item in matches.exact.iter().chain(matches.domain.iter()) {
            println!("{}", ColorizeItem { item, tree: &tree }.render(self.nc));
        }
        Ok(())
    }
}

/// Create the welcome tags and bookmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCommand;

impl FavedCommand for SeedCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let count = seed_welcome_content(ctx.db)?;
        eprintln!(
            "Added {} welcome bookmarks to {}",
            count,
            ctx.db_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::with_context;

    #[test]
    fn test_seed_then_find_dupes() {
        with_context(|ctx| {
            SeedCommand.execute(ctx).unwrap();
            let items = ctx.db.get_items().unwrap();
            assert!(!items.is_empty());

            DupesCommand {
                url: items[0].url.clone(),
                nc: true,
            }
            .execute(ctx)
            .unwrap();
            assert!(!find_url_matches(&items[0].url, &items).exact.is_empty());
        });
    }

    #[test]
    fn test_dupes_on_empty_db() {
        with_context(|ctx| {
            DupesCommand {
                url: "example.com".into(),
                nc: false,
            }
            .execute(ctx)
            .unwrap();
        });
    }
}
