//! Keyword extraction for ATS matching

use crate::processing::stop_words::is_stop_word;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A word starting with a letter, followed by at least two letters, digits or
/// one of `+ # . -` (so "c#", "node.js" and "ci-cd" survive as single terms).
static KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z][a-zA-Z0-9+#.\-]{2,}\b").expect("keyword regex is valid")
});

/// Unique, lowercased keywords of one document.
pub type KeywordSet = HashSet<String>;

/// Extract the keyword set of `text`.
///
/// The whole text is lowercased before scanning, matches that are stop words
/// are dropped and duplicates collapse. Empty text yields an empty set.
pub fn extract_keywords(text: &str) -> KeywordSet {
    let lowered = text.to_lowercase();

    KEYWORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}
