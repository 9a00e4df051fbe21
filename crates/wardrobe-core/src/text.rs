//! Text helpers shared by rule lookup and keyword matching.
//!
//! Keys are normalized so that "Wedding Guest", "wedding_guest" and
//! " wedding-guest " resolve to the same rule row. Keyword matching works on
//! whole words and tolerates a plural suffix ("sneaker" matches "sneakers").

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_\-]+").unwrap());

/// Normalize a lookup key: lowercase, trimmed, separators collapsed to `-`
pub fn normalize_key(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Whole-word keyword match (case-insensitive)
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return false;
    }

    for (idx, _) in haystack.match_indices(&keyword) {
        let starts_clean = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if !starts_clean {
            continue;
        }

        let rest = &haystack[idx + keyword.len()..];
        if ends_clean(rest) {
            return true;
        }
    }

    false
}

fn ends_clean(rest: &str) -> bool {
    let boundary = |s: &str| s.chars().next().map_or(true, |c| !c.is_alphanumeric());
    if boundary(rest) {
        return true;
    }
    // plural forms
    if let Some(tail) = rest.strip_prefix("es") {
        if boundary(tail) {
            return true;
        }
    }
    match rest.strip_prefix('s') {
        Some(tail) => boundary(tail),
        None => false,
    }
}

/// First keyword from the list that appears in the haystack
pub fn first_match<'a>(haystack: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|k| contains_keyword(haystack, k))
        .map(|k| k.as_str())
}

/// True when any keyword appears in the haystack
pub fn matches_any(haystack: &str, keywords: &[String]) -> bool {
    first_match(haystack, keywords).is_some()
}
