//! Utility functions and helpers.

pub mod url;

use std::sync::OnceLock;

use regex::Regex;

pub use self::url::Endpoints;

/// First candidate that is present and not blank.
pub fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Turn a title into a URL-safe slug ("Hello, Rust 2024!" → "hello-rust-2024").
pub fn slugify(title: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

    let lowered = title.to_lowercase();
    pattern
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty([None, Some("  "), Some("b")]), Some("b"));
        assert_eq!(first_non_empty([Some("a"), Some("b")]), Some("a"));
        assert_eq!(first_non_empty::<2>([None, Some("")]), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, Rust 2024!"), "hello-rust-2024");
        assert_eq!(slugify("  --Already-slugged--  "), "already-slugged");
        assert_eq!(slugify("Ünïcode Títle"), "n-code-t-tle");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Async Rust", "rust"));
        assert!(!contains_ignore_case("Go", "rust"));
    }
}
