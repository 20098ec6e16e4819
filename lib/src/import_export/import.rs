use crate::config::Config;
use crate::error::{FavedError, Result};
use crate::models::NewItem;
use crate::repository::Repository;
use crate::tags::TagCreator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use url::Url;

/// Trait for importing bookmarks from different export formats
pub trait BookmarkImporter {
    fn source(&self) -> ImportSource;

    /// Parse the uploaded file into records. Rows that cannot be read are
    /// reported in [`ParsedImport::skipped`] rather than failing the run.
    fn read_records(&self, path: &Path, config: &Config) -> Result<ParsedImport>;

    fn import<R: Repository + ?Sized>(
        &self,
        repo: &R,
        path: &Path,
        config: &Config,
    ) -> Result<ImportSummary>
    where
        Self: Sized,
    {
        let parsed = self.read_records(path, config)?;
        log::info!(
            "Read {} {} records from {}",
            parsed.records.len(),
            self.source(),
            path.display()
        );
        RecordImporter::new(repo, config)?.import_records(parsed)
    }
}

/// Where an import came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    Pocket,
    Browser,
}

impl ImportSource {
    /// Name of the multipart upload field carrying the file.
    pub fn field_name(&self) -> &'static str {
        match self {
            ImportSource::Pocket => "pocket-zip",
            ImportSource::Browser => "browser-html",
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSource::Pocket => write!(f, "Pocket"),
            ImportSource::Browser => write!(f, "browser"),
        }
    }
}

/// One bookmark extracted from an export, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub url: String,
    pub title: String,
    /// Each inner list is one tag path, root first
    pub tag_paths: Vec<Vec<String>>,
    pub saved_at: Option<DateTime<Utc>>,
}

/// A record (or unreadable row) left out of an import, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// The record's URL, or the file and row it came from
    pub reference: String,
    pub reason: String,
}

/// Output of a format parser
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub records: Vec<ImportRecord>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// New items created
    pub imported: usize,
    /// Existing items (same URL) whose tags were merged
    pub updated: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl ImportSummary {
    pub fn message(&self, source: ImportSource) -> String {
        let mut message = format!(
            "{} {} bookmarks imported successfully",
            self.imported, source
        );
        if self.updated > 0 {
            message.push_str(&format!(", {} already saved and updated", self.updated));
        }
        if !self.skipped.is_empty() {
            message.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Created(i64),
    Updated(i64),
}

impl RecordOutcome {
    pub fn item_id(&self) -> i64 {
        match *self {
            RecordOutcome::Created(id) | RecordOutcome::Updated(id) => id,
        }
    }
}

/// Writes import records: tag chains through [`TagCreator`], then the item
/// and its memberships.
pub struct RecordImporter<'a, R: Repository + ?Sized> {
    repo: &'a R,
    creator: TagCreator<'a, R>,
}

impl<'a, R: Repository + ?Sized> RecordImporter<'a, R> {
    pub fn new(repo: &'a R, config: &Config) -> Result<Self> {
        Ok(Self {
            repo,
            creator: TagCreator::new(repo)?.with_default_color(config.default_tag_color),
        })
    }

    pub fn import_record(&mut self, record: &ImportRecord) -> Result<RecordOutcome> {
        let url = Url::parse(record.url.trim())
            .map_err(|e| FavedError::Validation(format!("Invalid URL: {}", e)))?;
        if url.cannot_be_a_base() {
            return Err(FavedError::Validation(format!(
                "Not a bookmarkable URL: {}",
                url
            )));
        }
        let url = url.to_string();

        let mut tag_ids = BTreeSet::new();
        for path in record.tag_paths.iter().filter(|p| !p.is_empty()) {
            tag_ids.insert(self.creator.create_tags_from_segments(path, "")?);
        }
        let tag_ids: Vec<i64> = tag_ids.into_iter().collect();

        if let Some(existing) = self.repo.find_item_by_url(&url)? {
            self.repo.attach_item_tags(&tag_ids, existing.id)?;
            return Ok(RecordOutcome::Updated(existing.id));
        }

        let title = record.title.trim();
        let item = NewItem {
            title: if title.is_empty() { url.clone() } else { title.to_string() },
            url,
            created_at: record.saved_at,
            ..Default::default()
        };
        let item_id = self.repo.create_item(&item, None)?;
        self.repo.attach_item_tags(&tag_ids, item_id)?;
        Ok(RecordOutcome::Created(item_id))
    }

    /// Import every record, skipping the ones that fail. A broken tag
    /// hierarchy aborts the whole run.
    pub fn import_records(&mut self, parsed: ParsedImport) -> Result<ImportSummary> {
        let mut summary = ImportSummary {
            skipped: parsed.skipped,
            ..Default::default()
        };

        for record in &parsed.records {
            match self.import_record(record) {
                Ok(RecordOutcome::Created(_)) => summary.imported += 1,
                Ok(RecordOutcome::Updated(_)) => summary.updated += 1,
                Err(err @ FavedError::TagCycle { .. }) => return Err(err),
                Err(err) => {
                    log::warn!("Skipping bookmark {}: {}", record.url, err);
                    summary.skipped.push(SkippedRecord {
                        reference: record.url.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Import finished: {} imported, {} updated, {} skipped",
            summary.imported,
            summary.updated,
            summary.skipped.len()
        );
        Ok(summary)
    }
}
