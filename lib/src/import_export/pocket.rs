//! Pocket export archives.
//!
//! Pocket hands out a ZIP holding one or more `part_NNNNNN.csv` files with
//! the columns `title,url,time_added,tags,status`. Older exports contain a
//! single `ril_export.html` instead, a list of `<a>` elements carrying
//! `time_added` and comma-separated `tags` attributes.

use super::browser::{html_attribute, html_text};
use super::import::{
    BookmarkImporter, ImportRecord, ImportSource, ImportSummary, ParsedImport, SkippedRecord,
};
use crate::config::Config;
use crate::error::{FavedError, Result};
use crate::repository::Repository;
use crate::tags::flat_tag_paths;
use crate::utils::parse_unix_timestamp;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// MIME types a Pocket upload may be declared as
pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["application/zip", "application/x-zip-compressed"];

const SCRATCH_PREFIX: &str = "pocket_import_";
const LEGACY_EXPORT_NAME: &str = "ril_export.html";

#[derive(Debug, Deserialize)]
struct PocketRow {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    time_added: String,
    #[serde(default)]
    tags: String,
}

impl PocketRow {
    fn into_record(self) -> ImportRecord {
        ImportRecord {
            tag_paths: flat_tag_paths(&self.tags, '|'),
            saved_at: parse_unix_timestamp(&self.time_added),
            url: self.url,
            title: self.title,
        }
    }
}

/// Importer for an uploaded Pocket ZIP
#[derive(Debug, Clone)]
pub struct PocketImporter {
    mime_type: String,
}

impl PocketImporter {
    /// `mime_type` is the content type the upload was declared with.
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
        }
    }

    fn validate_upload(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(FavedError::Upload("No file uploaded or upload error".into()));
        }
        if !ACCEPTED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(FavedError::Upload("Uploaded file is not a ZIP archive".into()));
        }
        Ok(())
    }
}

impl BookmarkImporter for PocketImporter {
    fn source(&self) -> ImportSource {
        ImportSource::Pocket
    }

    fn read_records(&self, path: &Path, config: &Config) -> Result<ParsedImport> {
        self.validate_upload(path)?;

        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| FavedError::Archive(format!("Failed to open ZIP archive: {}", e)))?;

        // Removed when dropped, whichever way this function returns
        let scratch = scratch_dir(config)?;
        log::debug!("Extracting {} into {}", path.display(), scratch.path().display());
        extract_archive(&mut archive, scratch.path())?;

        read_export_dir(scratch.path())
    }
}

/// Validate, extract and import a Pocket archive in one go.
pub fn import_pocket_zip<R: Repository + ?Sized>(
    repo: &R,
    path: &Path,
    mime_type: &str,
    config: &Config,
) -> Result<ImportSummary> {
    PocketImporter::new(mime_type).import(repo, path, config)
}

fn scratch_dir(config: &Config) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX);

    let dir = match &config.import.scratch_dir {
        Some(root) => {
            fs::create_dir_all(root)?;
            builder.tempdir_in(root)?
        }
        None => builder.tempdir()?,
    };
    Ok(dir)
}

fn extract_archive<Rd: Read + Seek>(archive: &mut ZipArchive<Rd>, dest: &Path) -> Result<()> {
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            log::warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        // A corrupt payload only shows up as a checksum error while reading
        io::copy(&mut entry, &mut out).map_err(|e| {
            FavedError::Archive(format!("Failed to extract ZIP archive: {}", e))
        })?;
    }
    Ok(())
}

/// CSV parts (in name order) and legacy HTML exports found under `root`.
fn export_files(root: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut csv_files = Vec::new();
    let mut html_files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            if name.ends_with(".csv") {
                csv_files.push(path);
            } else if name == LEGACY_EXPORT_NAME {
                html_files.push(path);
            }
        }
    }

    csv_files.sort();
    html_files.sort();
    Ok((csv_files, html_files))
}

fn read_export_dir(root: &Path) -> Result<ParsedImport> {
    let (csv_files, html_files) = export_files(root)?;
    if csv_files.is_empty() && html_files.is_empty() {
        log::warn!("No Pocket export files found in archive");
    }

    let mut parsed = ParsedImport::default();
    for path in &csv_files {
        let label = path.strip_prefix(root).unwrap_or(path.as_path()).display().to_string();
        read_csv(path, &label, &mut parsed)?;
    }
    for path in &html_files {
        read_legacy_html(path, &mut parsed)?;
    }
    Ok(parsed)
}

fn read_csv(path: &Path, label: &str, parsed: &mut ParsedImport) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    for (index, row) in reader.deserialize::<PocketRow>().enumerate() {
        match row {
            Ok(row) => parsed.records.push(row.into_record()),
            Err(e) => {
                // +2: one for the header, one for 1-based numbering
                let reference = format!("{} row {}", label, index + 2);
                log::warn!("Skipping unreadable row {}: {}", reference, e);
                parsed.skipped.push(SkippedRecord {
                    reference,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn read_legacy_html(path: &Path, parsed: &mut ParsedImport) -> Result<()> {
    let html = fs::read_to_string(path)?;
    let dom = tl::parse(&html, tl::ParserOptions::default())?;
    let parser = dom.parser();

    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        if !tag.name().as_utf8_str().eq_ignore_ascii_case("a") {
            continue;
        }
        let Some(url) = html_attribute(tag, &["href", "HREF"]) else {
            continue;
        };

        let tags = html_attribute(tag, &["tags", "TAGS"]).unwrap_or_default();
        let time_added = html_attribute(tag, &["time_added", "TIME_ADDED"]).unwrap_or_default();
        parsed.records.push(ImportRecord {
            url,
            title: html_text(tag, parser),
            tag_paths: flat_tag_paths(&tags, ','),
            saved_at: parse_unix_timestamp(&time_added),
        });
    }
    Ok(())
}
