//! Relevance scoring for matched text.
//!
//! Scores are additive and unbounded. They only order matches against each
//! other within one ranking pass and carry no meaning across passes.

use crate::similarity::similarity_folded;

/// Weight of whole-string similarity in the score.
const SIMILARITY_WEIGHT: f64 = 50.0;

/// Weight of the query-to-text length ratio in the score.
const LENGTH_WEIGHT: f64 = 20.0;

/// Bonus for a query word equal to a text word.
const WORD_EXACT_BONUS: f64 = 15.0;

/// Bonus for a query word containing or contained by a text word.
const WORD_CONTAINS_BONUS: f64 = 10.0;

/// Minimum word similarity that still earns a bonus.
const WORD_SIMILARITY_FLOOR: f64 = 0.7;

/// Weight of word similarity above the floor.
const WORD_SIMILARITY_WEIGHT: f64 = 8.0;

/// Position of the query inside the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Query not found verbatim
    None = 0,
    /// Contains substring
    Contains = 60,
    /// Query begins a word after a space
    WordBoundary = 70,
    /// Starts with query
    StartsWith = 80,
    /// Exact match
    Exact = 100,
}

impl MatchTier {
    /// Classify the query position. Both inputs must already be lowercased.
    fn classify(text: &str, query: &str) -> Self {
        if text == query {
            MatchTier::Exact
        } else if text.starts_with(query) {
            MatchTier::StartsWith
        } else if text.contains(&format!(" {query}")) {
            MatchTier::WordBoundary
        } else if text.contains(query) {
            MatchTier::Contains
        } else {
            MatchTier::None
        }
    }

    /// Score contribution of this tier.
    #[inline]
    pub fn bonus(self) -> f64 {
        self as u32 as f64
    }
}

/// Classify where `query` appears in `text`, ignoring case.
pub fn match_tier(text: &str, query: &str) -> MatchTier {
    MatchTier::classify(&text.to_lowercase(), &query.to_lowercase())
}

/// Calculate relevance score for a text against a query.
///
/// Only meaningful for pairs that already pass
/// [`fuzzy_match`](crate::fuzzy_match). Case-insensitive. The score is the
/// sum of:
/// - the [`MatchTier`] bonus
/// - `similarity * 50`
/// - `query_len / text_len * 20`
/// - a word-overlap bonus over every (query word, text word) pair: `+15`
///   for equal words, `+10` for containment, `similarity * 8` when the
///   words are at least 0.7 similar
///
/// # Arguments
/// * `text` - The text to score
/// * `query` - The search query
///
/// # Returns
/// Relevance score (higher is better)
pub fn relevance_score(text: &str, query: &str) -> f64 {
    let text = text.to_lowercase();
    let query = query.to_lowercase();

    let tier = MatchTier::classify(&text, &query);
    let text_len = text.chars().count();
    let proximity = if text_len == 0 {
        0.0
    } else {
        query.chars().count() as f64 / text_len as f64 * LENGTH_WEIGHT
    };

    tier.bonus()
        + similarity_folded(&text, &query) * SIMILARITY_WEIGHT
        + proximity
        + word_overlap_bonus(&text, &query)
}

/// Sum of per-pair word bonuses.
///
/// Summed over all pairs rather than a best matching, so a field that repeats
/// a query word several times collects the bonus for each repetition.
fn word_overlap_bonus(text: &str, query: &str) -> f64 {
    let text_words: Vec<&str> = text.split_whitespace().collect();

    query
        .split_whitespace()
        .flat_map(|query_word| text_words.iter().map(move |text_word| (query_word, *text_word)))
        .map(|(query_word, text_word)| {
            if query_word == text_word {
                WORD_EXACT_BONUS
            } else if text_word.contains(query_word) || query_word.contains(text_word) {
                WORD_CONTAINS_BONUS
            } else {
                let sim = similarity_folded(text_word, query_word);
                if sim >= WORD_SIMILARITY_FLOOR { sim * WORD_SIMILARITY_WEIGHT } else { 0.0 }
            }
        })
        .sum()
}
