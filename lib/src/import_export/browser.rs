//! Netscape bookmark files, the HTML every browser exports.
//!
//! Folders are `<DT><H3>name</H3>` followed by a `<DL>` holding their
//! contents; links are `<DT><A HREF=..>`. `<DT>` and `<p>` are never closed,
//! so the parsed tree cannot be trusted for nesting. Instead the document is
//! cut at every `</DL>` and each piece is scanned in document order, with a
//! folder stack pushed at `<DL>` and popped at the cut.

use super::import::{BookmarkImporter, ImportRecord, ImportSource, ImportSummary, ParsedImport};
use crate::config::{BrowserRootFolders, Config, ImportConfig};
use crate::error::{FavedError, Result};
use crate::repository::Repository;
use crate::tags::flat_tag_paths;
use crate::utils::parse_unix_timestamp;
use html_escape::decode_html_entities;
use std::fs;
use std::path::Path;

/// First present attribute among `names`, entity-decoded and trimmed.
/// `tl` keeps attribute names as written, so callers list each spelling.
pub(crate) fn html_attribute(tag: &tl::HTMLTag, names: &[&'static str]) -> Option<String> {
    let attributes = tag.attributes();
    names
        .iter()
        .find_map(|name| attributes.get(*name).flatten())
        .map(|value| decode_html_entities(value.as_utf8_str().trim()).into_owned())
}

pub(crate) fn html_text<'a>(tag: &tl::HTMLTag<'a>, parser: &tl::Parser<'a>) -> String {
    decode_html_entities(tag.inner_text(parser).trim()).into_owned()
}

fn is_importable_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    !(lower.is_empty() || lower.starts_with("place:") || lower.starts_with("javascript:"))
}

/// Importer for a browser bookmarks export
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHtmlImporter;

impl BrowserHtmlImporter {
    pub fn new() -> Self {
        Self
    }
}

impl BookmarkImporter for BrowserHtmlImporter {
    fn source(&self) -> ImportSource {
        ImportSource::Browser
    }

    fn read_records(&self, path: &Path, config: &Config) -> Result<ParsedImport> {
        if !path.is_file() {
            return Err(FavedError::Upload("No file uploaded or upload error".into()));
        }
        let html = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                FavedError::Upload("Uploaded file is not a bookmarks HTML export".into())
            }
            _ => FavedError::Io(e),
        })?;
        if !html.to_ascii_lowercase().contains("<dl") {
            return Err(FavedError::Upload(
                "Uploaded file is not a bookmarks HTML export".into(),
            ));
        }

        parse_bookmarks_html(&html, &config.import)
    }
}

/// Import a browser bookmarks file.
pub fn import_browser_html<R: Repository + ?Sized>(
    repo: &R,
    path: &Path,
    config: &Config,
) -> Result<ImportSummary> {
    BrowserHtmlImporter::new().import(repo, path, config)
}

/// Folder bookkeeping shared by every piece of the document
#[derive(Debug, Default)]
struct FolderStack {
    /// One entry per open `<DL>`; `None` for a list with no folder heading
    /// (the document root)
    levels: Vec<Option<String>>,
    /// Heading seen but its `<DL>` not yet opened
    pending: Option<String>,
}

impl FolderStack {
    fn open_list(&mut self) {
        self.levels.push(self.pending.take());
    }

    fn close_list(&mut self) {
        self.levels.pop();
        self.pending = None;
    }

    fn path(&self, options: &ImportConfig) -> Vec<String> {
        let named = self
            .levels
            .iter()
            .flatten()
            .filter(|title| !title.is_empty());
        let skip = match options.browser_root_folders {
            BrowserRootFolders::Keep => 0,
            BrowserRootFolders::Skip => 1,
        };
        named
            .skip(skip)
            .take(options.max_folder_depth)
            .cloned()
            .collect()
    }
}

/// Parse a Netscape bookmark document into import records.
pub fn parse_bookmarks_html(html: &str, options: &ImportConfig) -> Result<ParsedImport> {
    // Same byte offsets as `html`; only ASCII changes case
    let lower = html.to_ascii_lowercase();
    let mut folders = FolderStack::default();
    let mut parsed = ParsedImport::default();
    let mut start = 0;

    loop {
        let cut = lower[start..].find("</dl").map(|offset| start + offset);
        let piece = &html[start..cut.unwrap_or(html.len())];
        scan_piece(piece, &mut folders, options, &mut parsed)?;

        let Some(cut) = cut else {
            break;
        };
        folders.close_list();
        start = lower[cut..]
            .find('>')
            .map(|offset| cut + offset + 1)
            .unwrap_or(html.len());
    }

    Ok(parsed)
}

fn scan_piece(
    piece: &str,
    folders: &mut FolderStack,
    options: &ImportConfig,
    parsed: &mut ParsedImport,
) -> Result<()> {
    if piece.trim().is_empty() {
        return Ok(());
    }
    let dom = tl::parse(piece, tl::ParserOptions::default())?;
    let parser = dom.parser();

    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        let name = tag.name().as_utf8_str();

        if name.eq_ignore_ascii_case("h3") {
            folders.pending = Some(html_text(tag, parser));
        } else if name.eq_ignore_ascii_case("dl") {
            folders.open_list();
        } else if name.eq_ignore_ascii_case("a") {
            let Some(url) = html_attribute(tag, &["HREF", "href"]) else {
                continue;
            };
            if !is_importable_href(&url) {
                log::debug!("Skipping non-bookmark link {}", url);
                continue;
            }

            let mut tag_paths = Vec::new();
            let folder_path = folders.path(options);
            if !folder_path.is_empty() {
                tag_paths.push(folder_path);
            }
            if let Some(tags) = html_attribute(tag, &["TAGS", "tags"]) {
                tag_paths.extend(flat_tag_paths(&tags, ','));
            }

            let saved_at = html_attribute(tag, &["ADD_DATE", "add_date"])
                .and_then(|value| parse_unix_timestamp(&value));

            parsed.records.push(ImportRecord {
                url,
                title: html_text(tag, parser),
                tag_paths,
                saved_at,
            });
        }
    }
    Ok(())
}
