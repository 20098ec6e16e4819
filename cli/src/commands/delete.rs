use super::{AppContext, FavedCommand};
use faved::error::Result;
use faved::items;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommand {
    pub id: i64,
}

impl FavedCommand for DeleteCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        items::delete_item(ctx.db, self.id)?;
        eprintln!("Deleted bookmark {}", self.id);
        Ok(())
    }
}
