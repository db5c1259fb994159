//! Shared text normalization helpers.

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::canonical_combining_class;

/// Collapses every run of whitespace to a single space and trims both ends.
#[must_use]
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes diacritics by compatibility-decomposing `s` and dropping every
/// combining mark.
#[must_use]
pub fn strip_diacritics(s: &str) -> String {
    s.nfkd()
        .filter(|&c| canonical_combining_class(c) == 0)
        .collect()
}
