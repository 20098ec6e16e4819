use faved::config::Config;
use faved::db::FavedDb;
use faved::error::Result;
use std::path::Path;

/// Everything a command needs for one invocation
pub struct AppContext<'a> {
    pub db: &'a FavedDb,
    pub config: &'a Config,
    pub db_path: &'a Path,
}

pub mod add;
pub mod delete;
pub mod helpers;
pub mod import;
pub mod misc;
pub mod print;
pub mod tag;
pub mod update;

pub trait FavedCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn FavedCommand>)
pub enum CommandEnum {
    ImportPocket(import::ImportPocketCommand),
    ImportBrowser(import::ImportBrowserCommand),
    TagCreate(tag::TagCreateCommand),
    TagList(tag::TagListCommand),
    TagColor(tag::TagColorCommand),
    TagPin(tag::TagPinCommand),
    TagRename(tag::TagRenameCommand),
    TagDelete(tag::TagDeleteCommand),
    Add(add::AddCommand),
    Update(update::UpdateCommand),
    Delete(delete::DeleteCommand),
    List(print::ListCommand),
    Dupes(misc::DupesCommand),
    Seed(misc::SeedCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::ImportPocket(cmd) => cmd.execute(ctx),
            Self::ImportBrowser(cmd) => cmd.execute(ctx),
            Self::TagCreate(cmd) => cmd.execute(ctx),
            Self::TagList(cmd) => cmd.execute(ctx),
            Self::TagColor(cmd) => cmd.execute(ctx),
            Self::TagPin(cmd) => cmd.execute(ctx),
            Self::TagRename(cmd) => cmd.execute(ctx),
            Self::TagDelete(cmd) => cmd.execute(ctx),
            Self::Add(cmd) => cmd.execute(ctx),
            Self::Update(cmd) => cmd.execute(ctx),
            Self::Delete(cmd) => cmd.execute(ctx),
            Self::List(cmd) => cmd.execute(ctx),
            Self::Dupes(cmd) => cmd.execute(ctx),
            Self::Seed(cmd) => cmd.execute(ctx),
        }
    }
}
