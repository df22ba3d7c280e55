//! URL normalization.
//!
//! Coerces user input into an absolute URL string. Normalization never fails;
//! whether the result is acceptable is decided by [`crate::utils::url_format`].

use regex::Regex;
use std::sync::LazyLock;

static HTTP_SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme regex"));

/// Normalizes raw user input into an absolute URL string.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. If the text does not start with `http://` or `https://` (any case),
///    `https://` is prepended
///
/// Applying the function twice yields the same string as applying it once.
///
/// # Examples
///
/// ```
/// use snaplink::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("  example.com/path "), "https://example.com/path");
/// assert_eq!(normalize_url("HTTP://example.com"), "HTTP://example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();

    if HTTP_SCHEME_PREFIX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
