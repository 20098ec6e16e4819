mod cli;
mod commands;
mod output;

use clap::Parser;
use env_logger::Env;
use faved::{config::Config, db::FavedDb, error::Result};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if args.version {
        println!("faved {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = Config::load(args.config.as_deref());

    let db_path = match &args.db {
        Some(path) => path.clone(),
        None => cfg.db_path(),
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Using database {}", db_path.display());

    let db = FavedDb::init(&db_path)?;
    cli::handle_args(args, &db, &db_path, &cfg)?;

    Ok(())
}
