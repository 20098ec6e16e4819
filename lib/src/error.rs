/// Error type for the faved library
///
/// Variants follow the failure taxonomy the controllers map to responses:
/// validation problems are the caller's fault, write failures are ours, upload
/// and archive errors come from the import boundary, and a tag cycle is a
/// consistency error that must abort whatever discovered it.
#[derive(Debug, thiserror::Error)]
pub enum FavedError {
    /// Database-related errors (SQLite)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O errors (file operations, scratch directories)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input: bad URL, missing field, unknown tag ids
    #[error("Validation error: {0}")]
    Validation(String),

    /// A persistence operation reported failure without raising
    #[error("Write error: {0}")]
    Write(String),

    /// Missing upload or wrong MIME type
    #[error("{0}")]
    Upload(String),

    /// Uploaded archive cannot be opened or extracted
    #[error("{0}")]
    Archive(String),

    /// The parent chain of a tag loops back on itself
    #[error("Tag hierarchy is inconsistent: cycle detected at tag {tag_id}")]
    TagCycle { tag_id: i64 },

    /// Tag not found
    #[error("Tag with ID {0} not found")]
    TagNotFound(i64),

    /// Item not found
    #[error("Item with ID {0} not found")]
    ItemNotFound(i64),

    /// HTML parsing errors
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

impl FavedError {
    /// HTTP-equivalent status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            FavedError::Validation(_) | FavedError::Upload(_) => 422,
            FavedError::Archive(_) => 400,
            FavedError::TagNotFound(_) | FavedError::ItemNotFound(_) => 404,
            _ => 500,
        }
    }

    /// True when the error is a unique-constraint violation reported by SQLite.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            FavedError::Database(rusqlite::Error::SqliteFailure(err, _)) => {
                err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        }
    }
}

/// Result type alias using FavedError
pub type Result<T> = std::result::Result<T, FavedError>;

impl From<String> for FavedError {
    fn from(s: String) -> Self {
        FavedError::Other(s)
    }
}

impl From<&str> for FavedError {
    fn from(s: &str) -> Self {
        FavedError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for FavedError {
    fn from(err: serde_yaml::Error) -> Self {
        FavedError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for FavedError {
    fn from(err: serde_json::Error) -> Self {
        FavedError::Json(err.to_string())
    }
}

impl From<csv::Error> for FavedError {
    fn from(err: csv::Error) -> Self {
        FavedError::Csv(err.to_string())
    }
}

impl From<tl::ParseError> for FavedError {
    fn from(err: tl::ParseError) -> Self {
        FavedError::HtmlParse(err.to_string())
    }
}

impl From<zip::result::ZipError> for FavedError {
    fn from(err: zip::result::ZipError) -> Self {
        FavedError::Archive(format!("Failed to extract ZIP archive: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FavedError::Validation("bad url".into()), 422)]
    #[case(FavedError::Upload("no file".into()), 422)]
    #[case(FavedError::Archive("corrupt".into()), 400)]
    #[case(FavedError::Write("failed".into()), 500)]
    #[case(FavedError::TagCycle { tag_id: 3 }, 500)]
    #[case(FavedError::ItemNotFound(9), 404)]
    fn test_status_code(#[case] err: FavedError, #[case] expected: u16) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn test_cycle_message_names_tag() {
        let err = FavedError::TagCycle { tag_id: 42 };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_plain_error_is_not_unique_violation() {
        assert!(!FavedError::Other("x".into()).is_unique_violation());
    }
}
