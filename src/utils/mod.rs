//! Utility functions and helpers.

pub mod url;

use ::url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://careers.example.com/global/en/search-results").unwrap();
        assert_eq!(
            resolve_url(&base, "/global/en/job/123/qa-tester"),
            "https://careers.example.com/global/en/job/123/qa-tester"
        );
        assert_eq!(
            resolve_url(&base, "https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_resolve_relative_query() {
        assert_eq!(
            resolve("https://careers.example.com/search", "?from=20&s=1").as_deref(),
            Some("https://careers.example.com/search?from=20&s=1")
        );
    }

}
