pub mod browser;
pub mod import;
pub mod pocket;
pub mod response;

// Re-export main types for convenience
pub use browser::{import_browser_html, parse_bookmarks_html, BrowserHtmlImporter};
pub use import::{
    BookmarkImporter, ImportRecord, ImportSource, ImportSummary, ParsedImport, RecordImporter,
    RecordOutcome, SkippedRecord,
};
pub use pocket::{import_pocket_zip, PocketImporter, ACCEPTED_MIME_TYPES};
pub use response::ImportResponse;
