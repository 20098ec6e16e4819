use super::helpers::mime_for_path;
use super::{AppContext, FavedCommand};
use faved::config::{BrowserRootFolders, Config};
use faved::error::Result;
use faved::import_export::{self, ImportResponse, ImportSource, ImportSummary};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the response body and turn a failed import into an error exit.
fn report(result: Result<ImportSummary>, source: ImportSource) -> Result<()> {
    let response = ImportResponse::from_result(&result, source);
    println!("{}", response.to_json()?);

    let summary = result?;
    for skipped in &summary.skipped {
        eprintln!("  skipped {}: {}", skipped.reference, skipped.reason);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPocketCommand {
    pub file: PathBuf,
    pub mime: Option<String>,
}

impl FavedCommand for ImportPocketCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mime = self
            .mime
            .clone()
            .unwrap_or_else(|| mime_for_path(&self.file).to_string());

        let pb = spinner(format!("Importing Pocket export {}", self.file.display()));
        let result = import_export::import_pocket_zip(ctx.db, &self.file, &mime, ctx.config);
        pb.finish_and_clear();

        report(result, ImportSource::Pocket)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBrowserCommand {
    pub file: PathBuf,
    pub skip_root: bool,
}

impl ImportBrowserCommand {
    fn effective_config(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if self.skip_root {
            config.import.browser_root_folders = BrowserRootFolders::Skip;
        }
        config
    }
}

impl FavedCommand for ImportBrowserCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let config = self.effective_config(ctx.config);

        let pb = spinner(format!("Importing bookmarks from {}", self.file.display()));
        let result = import_export::import_browser_html(ctx.db, &self.file, &config);
        pb.finish_and_clear();

        report(result, ImportSource::Browser)
    }
}
