use crate::commands::{self, AppContext, CommandEnum};
use clap::{Parser, Subcommand};
use faved::config::Config;
use faved::db::FavedDb;
use faved::error::Result;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Optional custom database file path
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import bookmarks from an export file
    Import {
        #[command(subcommand)]
        source: ImportCommands,
    },

    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagCommands,
    },

    /// Add a new bookmark
    Add {
        /// URL to bookmark (https:// is assumed when no scheme is given)
        url: String,

        /// Bookmark title
        #[arg(long)]
        title: String,

        /// Tag path, e.g. Work/Projects; missing tags are created. Repeatable
        #[arg(short, long = "tag", value_name = "PATH")]
        tags: Vec<String>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Personal notes
        #[arg(short, long)]
        comments: Option<String>,

        /// Preview image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Update an existing bookmark; unspecified fields are kept
    Update {
        /// Bookmark id
        id: i64,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// Replace all tags with these paths. Repeatable
        #[arg(short, long = "tag", value_name = "PATH")]
        tags: Option<Vec<String>>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        comments: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a bookmark
    Delete {
        /// Bookmark id
        id: i64,
    },

    /// List bookmarks
    List {
        /// Only bookmarks under this tag path (nested tags included)
        #[arg(short, long, value_name = "PATH")]
        tag: Option<String>,
    },

    /// Show saved bookmarks that look like a URL
    Dupes {
        url: String,
    },

    /// Create the welcome tags and bookmarks
    Seed,
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import a Pocket export ZIP
    Pocket {
        file: PathBuf,

        /// Declared content type of the upload (guessed from the extension by default)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Import a browser bookmarks HTML export
    Browser {
        file: PathBuf,

        /// Drop the outermost folders ("Bookmarks bar", ...) from tag paths
        #[arg(long)]
        skip_root: bool,
    },
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Create a tag path such as Work/Projects\/2024
    Create {
        path: String,

        /// Description for the last tag of the path
        #[arg(short, long)]
        description: Option<String>,

        /// One of gray, green, red, yellow, aqua, white, black
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        pinned: bool,
    },

    /// Show the tag tree
    List,

    /// Change a tag's color
    Color { id: i64, color: String },

    /// Pin a tag (or unpin with --off)
    Pin {
        id: i64,

        #[arg(long)]
        off: bool,
    },

    /// Rename a tag
    Rename { id: i64, title: String },

    /// Delete a tag and every tag nested below it; bookmarks are kept
    Delete { id: i64 },
}

impl Commands {
    pub fn into_command(self, nc: bool) -> CommandEnum {
        match self {
            Commands::Import { source } => match source {
                ImportCommands::Pocket { file, mime } => {
                    CommandEnum::ImportPocket(commands::import::ImportPocketCommand { file, mime })
                }
                ImportCommands::Browser { file, skip_root } => CommandEnum::ImportBrowser(
                    commands::import::ImportBrowserCommand { file, skip_root },
                ),
            },
            Commands::Tag { action } => match action {
                TagCommands::Create {
                    path,
                    description,
                    color,
                    pinned,
                } => CommandEnum::TagCreate(commands::tag::TagCreateCommand {
                    path,
                    description: description.unwrap_or_default(),
                    color,
                    pinned,
                }),
                TagCommands::List => CommandEnum::TagList(commands::tag::TagListCommand { nc }),
                TagCommands::Color { id, color } => {
                    CommandEnum::TagColor(commands::tag::TagColorCommand { id, color })
                }
                TagCommands::Pin { id, off } => {
                    CommandEnum::TagPin(commands::tag::TagPinCommand { id, pinned: !off })
                }
                TagCommands::Rename { id, title } => {
                    CommandEnum::TagRename(commands::tag::TagRenameCommand { id, title })
                }
                TagCommands::Delete { id } => {
                    CommandEnum::TagDelete(commands::tag::TagDeleteCommand { id })
                }
            },
            Commands::Add {
                url,
                title,
                tags,
                description,
                comments,
                image,
            } => CommandEnum::Add(commands::add::AddCommand {
                url,
                title,
                tags,
                description: description.unwrap_or_default(),
                comments: comments.unwrap_or_default(),
                image: image.unwrap_or_default(),
            }),
            Commands::Update {
                id,
                url,
                title,
                tags,
                description,
                comments,
                image,
            } => CommandEnum::Update(commands::update::UpdateCommand {
                id,
                url,
                title,
                tags,
                description,
                comments,
                image,
            }),
            Commands::Delete { id } => CommandEnum::Delete(commands::delete::DeleteCommand { id }),
            Commands::List { tag } => CommandEnum::List(commands::print::ListCommand { tag, nc }),
            Commands::Dupes { url } => {
                CommandEnum::Dupes(commands::misc::DupesCommand { url, nc })
            }
            Commands::Seed => CommandEnum::Seed(commands::misc::SeedCommand),
        }
    }
}

pub fn handle_args(cli: Cli, db: &FavedDb, db_path: &Path, config: &Config) -> Result<()> {
    let ctx = AppContext {
        db,
        config,
        db_path,
    };

    match cli.command {
        Some(command) => command.into_command(cli.nc).execute(&ctx),
        None => CommandEnum::List(commands::print::ListCommand {
            tag: None,
            nc: cli.nc,
        })
        .execute(&ctx),
    }
}
