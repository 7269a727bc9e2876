use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Derives a URL-safe post identifier from a title.
///
/// Lowercases the input, turns every run of characters outside `[a-z0-9]`
/// into a single hyphen and strips hyphens from both ends. Non-ASCII letters
/// count as separators (`"Café"` → `"caf"`). The result is empty when the
/// title holds no ASCII letters or digits.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SEPARATOR_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
