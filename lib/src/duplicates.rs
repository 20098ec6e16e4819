//! Advisory duplicate detection for a URL being saved.
//!
//! Two URLs are an exact match when their host (without `www.`) and path
//! (without one trailing slash) agree; query and fragment are ignored. Items
//! on the same host that are not exact matches are domain matches.

use crate::models::Item;
use crate::utils::parse_url_input;
use url::Url;

/// Items resembling a candidate URL. The two lists never share an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMatches<'a> {
    pub exact: Vec<&'a Item>,
    pub domain: Vec<&'a Item>,
}

impl UrlMatches<'_> {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.domain.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.domain.len()
    }

    /// One-line notice, e.g. "Possible duplicate – 1 exact match and 2 domain matches".
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(2);
        if !self.exact.is_empty() {
            parts.push(count_label(self.exact.len(), "exact"));
        }
        if !self.domain.is_empty() {
            parts.push(count_label(self.domain.len(), "domain"));
        }
        if parts.is_empty() {
            return None;
        }
        Some(format!("Possible duplicate – {}", parts.join(" and ")))
    }
}

fn count_label(count: usize, kind: &str) -> String {
    let noun = if count == 1 { "match" } else { "matches" };
    format!("{} {} {}", count, kind, noun)
}

fn bare_host(url: &Url) -> &str {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host)
}

/// Host without `www.` followed by the path without one trailing slash.
/// Input that does not parse as a URL is returned unchanged.
pub fn normalize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => {
            let path = url.path();
            let path = path.strip_suffix('/').unwrap_or(path);
            format!("{}{}", bare_host(&url), path)
        }
        Err(_) => raw.to_string(),
    }
}

/// Host without `www.`; unparsable input is returned unchanged.
pub fn extract_domain(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => bare_host(&url).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Find saved items that look like `candidate`. The candidate goes through
/// the same input rules as a saved URL (a missing scheme means `https://`);
/// if it is still not a URL there are no matches.
pub fn find_url_matches<'a>(candidate: &str, items: &'a [Item]) -> UrlMatches<'a> {
    let Ok(valid) = parse_url_input(candidate) else {
        return UrlMatches::default();
    };
    let valid = valid.as_str();

    let normalized = normalize_url(valid);
    let exact: Vec<&Item> = if normalized.is_empty() {
        Vec::new()
    } else {
        items
            .iter()
            .filter(|item| normalize_url(&item.url) == normalized)
            .collect()
    };

    let domain_key = extract_domain(valid);
    let domain = if domain_key.is_empty() {
        Vec::new()
    } else {
        items
            .iter()
            .filter(|item| !exact.iter().any(|e| e.id == item.id))
            .filter(|item| extract_domain(&item.url) == domain_key)
            .collect()
    };

    UrlMatches { exact, domain }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn item(id: i64, url: &str) -> Item {
        Item {
            id,
            title: format!("item {}", id),
            url: url.to_string(),
            description: String::new(),
            comments: String::new(),
            image: String::new(),
            tags: Default::default(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[rstest]
    #[case("https://www.a.com/x/", "a.com/x")]
    #[case("https://a.com/x", "a.com/x")]
    #[case("http://A.com/", "a.com")]
    #[case("https://a.com/x?q=1#frag", "a.com/x")]
    #[case("https://a.com/x//", "a.com/x/")]
    #[case("not a url", "not a url")]
    fn test_normalize_url(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_url(input), expected);
    }

    #[rstest]
    #[case("https://www.a.com/x/", "a.com")]
    #[case("https://sub.a.com/", "sub.a.com")]
    #[case("https://wwwa.com/", "wwwa.com")]
    #[case("garbage", "garbage")]
    fn test_extract_domain(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(extract_domain(input), expected);
    }

    #[test]
    fn test_exact_match_ignores_www_and_trailing_slash() {
        let items = vec![item(1, "https://a.com/x")];
        let matches = find_url_matches("https://www.a.com/x/", &items);
        assert_eq!(matches.exact.len(), 1);
        assert!(matches.domain.is_empty());
    }

    #[test]
    fn test_domain_match_only() {
        let items = vec![item(1, "https://a.com/x")];
        let matches = find_url_matches("https://a.com/y", &items);
        assert!(matches.exact.is_empty());
        assert_eq!(matches.domain.len(), 1);
    }

    #[test]
    fn test_exact_and_domain_are_disjoint() {
        let items = vec![
            item(1, "https://a.com/x"),
            item(2, "http://www.a.com/x/"),
            item(3, "https://a.com/other"),
            item(4, "https://b.com/x"),
        ];
        let matches = find_url_matches("a.com/x", &items);

        let exact: Vec<i64> = matches.exact.iter().map(|i| i.id).collect();
        let domain: Vec<i64> = matches.domain.iter().map(|i| i.id).collect();
        assert_eq!(exact, vec![1, 2]);
        assert_eq!(domain, vec![3]);
        assert_eq!(
            matches.summary().unwrap(),
            "Possible duplicate – 2 exact matches and 1 domain match"
        );
    }

    #[test]
    fn test_invalid_candidate_has_no_matches() {
        let items = vec![item(1, "https://a.com/x")];
        let matches = find_url_matches("   ", &items);
        assert!(matches.is_empty());
        assert!(matches.summary().is_none());
    }

    #[test]
    fn test_unparsable_saved_urls_are_ignored() {
        let items = vec![item(1, "not a url"), item(2, "https://c.com/")];
        let matches = find_url_matches("https://c.com", &items);
        assert_eq!(matches.exact.len(), 1);
        assert_eq!(matches.exact[0].id, 2);
        assert_eq!(matches.len(), 1);
    }
}
