//! Stop words excluded from keyword extraction
//!
//! Common English function words plus the filler vocabulary that shows up in
//! nearly every job posting ("experience", "responsibilities", "years", ...).
//! None of them help tell one posting apart from another.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const STOP_WORDS: &[&str] = &[
    // Articles, conjunctions, prepositions
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "about", "after", "before", "between",
    "into", "through", "during", "above", "below", "up", "down", "out", "off",
    "over", "under", "again", "further", "then", "once", "here", "there",
    // Auxiliaries and modals
    "is", "was", "are", "were", "been", "be", "have", "has", "had", "do",
    "does", "did", "will", "would", "could", "should", "may", "might", "must",
    "shall", "can", "need",
    // Pronouns and determiners
    "we", "you", "your", "our", "their", "this", "that", "these", "those",
    "it", "its", "they", "them", "he", "she", "his", "her", "who", "what",
    "which", "when", "where", "why", "how", "all", "each", "every", "both",
    "few", "more", "most", "other", "some", "such", "no", "not", "only",
    "own", "same", "so", "than", "too", "very", "just", "also", "now", "any",
    "etc", "including",
    // Job posting filler
    "work", "working", "job", "position", "role", "team", "company",
    "experience", "ability", "strong", "excellent", "good", "great",
    "looking", "seeking", "required", "requirements", "qualifications",
    "responsibilities", "duties", "skills", "years", "year", "plus",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Whether `word` (already lowercased) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Number of distinct stop words.
pub fn stop_word_count() -> usize {
    STOP_WORD_SET.len()
}
