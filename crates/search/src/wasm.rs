//! WASM bindings for search utilities.

use crate::record::is_blank;
use crate::{SearchError, SearchOptions, SearchResult};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Case-insensitive similarity between two strings (0.0 to 1.0).
#[wasm_bindgen]
pub fn string_similarity(a: &str, b: &str) -> f64 {
    crate::similarity(a, b)
}

/// Check if text fuzzily matches query.
///
/// Pass a negative `threshold` to use the default of 0.7.
#[wasm_bindgen]
pub fn fuzzy_matches(text: &str, query: &str, threshold: f64) -> bool {
    let threshold = if threshold < 0.0 { crate::DEFAULT_THRESHOLD } else { threshold };
    crate::fuzzy_match(text, query, threshold)
}

/// Calculate relevance score for a query against text.
#[wasm_bindgen]
pub fn relevance(text: &str, query: &str) -> f64 {
    crate::relevance_score(text, query)
}

/// Filter and rank records, returning them as JSON.
///
/// # Arguments
/// * `query` - Search query; blank returns the records unchanged
/// * `records_json` - JSON array of records
/// * `options_json` - JSON search options, e.g.
///   `{"fields": ["name", {"path": "id", "threshold": 0.9}], "limit": 20}`
///
/// # Returns
/// JSON array of the matching records, best first, or `[]` on invalid input
#[wasm_bindgen]
pub fn search_records(query: &str, records_json: &str, options_json: &str) -> String {
    search_records_json(query, records_json, options_json, false).unwrap_or_else(|_| "[]".to_string())
}

/// Like [`search_records`], but each entry carries `item`, `score` and
/// `matched_fields`.
#[wasm_bindgen]
pub fn search_records_scored(query: &str, records_json: &str, options_json: &str) -> String {
    search_records_json(query, records_json, options_json, true).unwrap_or_else(|_| "[]".to_string())
}

fn search_records_json(
    query: &str,
    records_json: &str,
    options_json: &str,
    with_scores: bool,
) -> crate::Result<String> {
    let records = crate::parse_records(records_json)?;
    let options: SearchOptions = serde_json::from_str(options_json)?;
    match options.validate() {
        // A blank query never reads fields
        Err(SearchError::NoFields) if is_blank(query) => {}
        other => other?,
    }

    let results: Vec<SearchResult<Value>> = crate::rank(&records, &options, query);

    let json = if with_scores {
        serde_json::to_string(&results)?
    } else {
        let items: Vec<Value> = results.into_iter().map(|result| result.item).collect();
        serde_json::to_string(&items)?
    };

    Ok(json)
}
