use crate::error::{FavedError, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use url::Url;

/// Directory holding the database file.
pub fn get_default_datadir() -> PathBuf {
    if let Ok(path) = std::env::var("FAVED_DATA_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(path).join("faved");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/share/faved");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("faved");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("faved");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/faved");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("faved");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Parse a user-entered URL. Surrounding whitespace is dropped and a value
/// without any scheme separator is read as `https://<value>`.
pub fn parse_url_input(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FavedError::Validation("URL is required".into()));
    }

    let candidate = if trimmed.contains(':') {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    Url::parse(&candidate)
        .map_err(|e| FavedError::Validation(format!("Invalid URL '{}': {}", trimmed, e)))
}

/// Parse a Unix timestamp in seconds as found in export files.
/// Zero, negative and non-numeric values yield `None`.
pub fn parse_unix_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = value.trim().parse().ok()?;
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("example.com/page", "https://example.com/page")]
    #[case("  https://example.com  ", "https://example.com/")]
    #[case("http://a.com/x?y=1", "http://a.com/x?y=1")]
    fn test_parse_url_input(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_url_input(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("https://")]
    #[case("not a url")]
    fn test_parse_url_input_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_url_input(input).unwrap_err(),
            FavedError::Validation(_)
        ));
    }

    #[rstest]
    #[case("1500000000", Some(1_500_000_000))]
    #[case(" 1700000000 ", Some(1_700_000_000))]
    #[case("0", None)]
    #[case("-5", None)]
    #[case("", None)]
    #[case("soon", None)]
    fn test_parse_unix_timestamp(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_unix_timestamp(input).map(|t| t.timestamp()), expected);
    }
}
