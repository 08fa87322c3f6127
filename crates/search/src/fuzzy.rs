//! Typo-tolerant match decision.

use crate::similarity::similarity_folded;

/// Default similarity threshold for [`fuzzy_match`].
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Check whether `text` matches `query` with typo and partial-match tolerance.
///
/// Case-insensitive. Succeeds on the first of:
/// 1. Exact equality
/// 2. `text` contains `query`
/// 3. Every query word has some text word that contains it, is contained
///    by it, or has similarity `>= threshold`
/// 4. Whole-string similarity `>= threshold`
///
/// # Arguments
/// * `text` - Text to search in
/// * `query` - Search query
/// * `threshold` - Minimum similarity in `[0, 1]`, see [`DEFAULT_THRESHOLD`]
///
/// # Example
/// ```
/// use fuzzyrank_search::{fuzzy_match, DEFAULT_THRESHOLD};
///
/// assert!(fuzzy_match("Rareminds University", "ranminds", DEFAULT_THRESHOLD));
/// assert!(!fuzzy_match("Rareminds University", "xyz123", DEFAULT_THRESHOLD));
/// ```
pub fn fuzzy_match(text: &str, query: &str, threshold: f64) -> bool {
    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text == query || text.contains(&query) {
        return true;
    }

    if all_words_match(&text, &query, threshold) {
        return true;
    }

    similarity_folded(&text, &query) >= threshold
}

/// Every query word must be found somewhere in the text, in any order.
fn all_words_match(text: &str, query: &str, threshold: f64) -> bool {
    let text_words: Vec<&str> = text.split_whitespace().collect();

    query.split_whitespace().all(|query_word| {
        text_words.iter().any(|text_word| {
            text_word.contains(query_word)
                || query_word.contains(text_word)
                || similarity_folded(text_word, query_word) >= threshold
        })
    })
}
