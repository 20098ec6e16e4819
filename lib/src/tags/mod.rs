pub mod creator;
pub mod path;
pub mod tree;

pub use creator::{TagCreator, TagOptions};
pub use path::{escape_segment, render_path, resolve_segments};
pub use tree::TagTree;

/// Split a flat tag list on `delimiter`, trimming and dropping empty entries.
/// Pocket uses `|` in CSV exports and `,` in the legacy HTML export.
pub fn parse_tag_list(tags_str: &str, delimiter: char) -> Vec<String> {
    tags_str
        .split(delimiter)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Flat tag lists as single-segment tag paths. A `/` inside an entry stays
/// part of the title, so `ci/cd` is one root tag rendered as `ci\/cd`.
pub fn flat_tag_paths(tags_str: &str, delimiter: char) -> Vec<Vec<String>> {
    parse_tag_list(tags_str, delimiter)
        .into_iter()
        .map(|tag| vec![tag])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ',', vec![])]
    #[case(",,", ',', vec![])]
    #[case("rust", ',', vec!["rust"])]
    #[case(",rust,testing,", ',', vec!["rust", "testing"])]
    #[case("  rust  ,  testing  ", ',', vec!["rust", "testing"])]
    #[case("read|work/projects", '|', vec!["read", "work/projects"])]
    #[case("|a||b|", '|', vec!["a", "b"])]
    fn test_parse_tag_list(
        #[case] input: &str,
        #[case] delimiter: char,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(parse_tag_list(input, delimiter), expected);
    }

    #[test]
    fn test_flat_tag_paths_keep_slashes_in_titles() {
        assert_eq!(
            flat_tag_paths(" a | ci/cd || ", '|'),
            vec![vec!["a".to_string()], vec!["ci/cd".to_string()]]
        );
        assert_eq!(flat_tag_paths(" / ,", ','), vec![vec!["/".to_string()]]);
        assert!(flat_tag_paths(" , ,", ',').is_empty());
    }

    #[test]
    fn test_parse_tag_list_preserves_order_and_unicode() {
        let result = parse_tag_list("z|測試|a", '|');
        assert_eq!(result, vec!["z", "測試", "a"]);
    }
}
