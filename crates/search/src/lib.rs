//! Fuzzy text matching and relevance ranking over in-memory records.
//!
//! This crate provides:
//! - Levenshtein edit distance and normalized similarity
//! - Typo-tolerant, word-order-independent match decisions
//! - Additive relevance scoring
//! - Multi-field search over nested records via dotted paths
//! - A stable filter-and-rank pipeline, optionally parallel
//!
//! The engine is a linear scan with no index; it is meant for candidate
//! sets in the thousands that were already fetched by some other layer.
//!
//! # Example
//!
//! ```
//! use fuzzyrank_search::{filter_and_rank, DEFAULT_THRESHOLD};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"name": "Rareminds University", "city": "Bangalore"}),
//!     json!({"name": "Other College", "city": "Mysore"}),
//! ];
//!
//! let ranked = filter_and_rank(&records, &["name", "city"], "ranminds", DEFAULT_THRESHOLD);
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0]["city"], "Bangalore");
//! ```

mod distance;
mod similarity;
mod fuzzy;
mod relevance;
mod options;
mod record;
mod rank;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use distance::levenshtein_distance;
pub use similarity::similarity;
pub use fuzzy::{fuzzy_match, DEFAULT_THRESHOLD};
pub use relevance::{match_tier, relevance_score, MatchTier};
pub use options::{FieldSpec, SearchOptions};
pub use record::{resolve_path, search_record, search_record_with, RecordMatch, Searchable};
pub use rank::{filter_and_rank, rank, rank_with_stats, RankStats, SearchResult};
pub use error::{Result, SearchError, SearchErrorCode};

#[cfg(feature = "parallel")]
pub use rank::{par_filter_and_rank, par_rank, par_rank_with_stats};

/// Parse a JSON array of records.
///
/// Convenience for callers that receive candidates as JSON text.
pub fn parse_records(json: &str) -> Result<Vec<serde_json::Value>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let records = parse_records(r#"[{"name": "Alice"}, {"name": "Bob"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(r#"{"name": "Alice"}"#).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::JsonParsing);
    }
}
