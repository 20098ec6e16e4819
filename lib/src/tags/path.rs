//! Tag path syntax.
//!
//! A tag path is a `/`-delimited chain of titles from the root to the leaf,
//! e.g. `Work/Projects\/2024`. A slash that belongs to a title is written as
//! `\/`; any other backslash is literal.

/// Separator between segments of a rendered path
pub const SEPARATOR: char = '/';

/// Escape sequence for a slash inside a title
pub const ESCAPED_SEPARATOR: &str = "\\/";

// Private-use code point; stands in for escaped slashes while splitting.
const PLACEHOLDER: &str = "\u{E000}";

/// Resolve a raw path string into its ordered segment titles.
///
/// Segments are trimmed and empty ones dropped, so a path made only of slashes
/// and whitespace resolves to an empty list.
pub fn resolve_segments(path: &str) -> Vec<String> {
    path.replace(ESCAPED_SEPARATOR, PLACEHOLDER)
        .split(SEPARATOR)
        .map(|segment| segment.replace(PLACEHOLDER, "/"))
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Escape a single title for use inside a rendered path.
pub fn escape_segment(title: &str) -> String {
    title.replace(SEPARATOR, ESCAPED_SEPARATOR)
}

/// Render titles (root first) as a path string.
pub fn render_path<S: AsRef<str>>(titles: &[S]) -> String {
    titles
        .iter()
        .map(|t| escape_segment(t.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Work/Projects\\/2024", vec!["Work", "Projects/2024"])]
    #[case("  /   / A / ", vec!["A"])]
    #[case("A/B/C", vec!["A", "B", "C"])]
    #[case("single", vec!["single"])]
    #[case("", vec![])]
    #[case("///", vec![])]
    #[case(" / \t / ", vec![])]
    #[case("a\\b/c", vec!["a\\b", "c"])]
    #[case("C:\\temp", vec!["C:\\temp"])]
    #[case("\\/leading", vec!["/leading"])]
    #[case("a\\/b\\/c", vec!["a/b/c"])]
    #[case("Reading / Later", vec!["Reading", "Later"])]
    fn test_resolve_segments(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(resolve_segments(input), expected);
    }

    #[rstest]
    #[case(vec!["Work", "Projects/2024"], "Work/Projects\\/2024")]
    #[case(vec!["A"], "A")]
    #[case(vec!["a/b", "c/d"], "a\\/b/c\\/d")]
    fn test_render_path(#[case] titles: Vec<&str>, #[case] expected: &str) {
        assert_eq!(render_path(&titles), expected);
    }

    #[test]
    fn test_render_empty_is_empty() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(render_path(&empty), "");
    }

    #[rstest]
    #[case("Work/Projects\\/2024")]
    #[case("  /   / A / ")]
    #[case("a\\/b/c\\/d/e")]
    #[case("plain")]
    #[case("x\\y/z")]
    #[case("//Deep/ /Nested\\/Title//")]
    #[case("Ünïcödé/标签\\/子")]
    fn test_resolve_render_round_trip(#[case] input: &str) {
        let segments = resolve_segments(input);
        assert_eq!(resolve_segments(&render_path(&segments)), segments);
    }

    #[test]
    fn test_trailing_backslash_does_not_round_trip() {
        // "a\" + "/" renders as an escaped slash
        let segments = vec!["a\\".to_string(), "b".to_string()];
        assert_eq!(render_path(&segments), "a\\/b");
        assert_eq!(resolve_segments(&render_path(&segments)), vec!["a/b"]);
    }
}
