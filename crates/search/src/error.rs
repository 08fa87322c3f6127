//! Error types for the search crate.
//!
//! Matching and ranking are total and never fail; errors only surface when
//! validating caller-supplied [`SearchOptions`](crate::SearchOptions) or when
//! decoding records from JSON.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while preparing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Threshold outside `[0, 1]` or not a number
    #[error("Invalid threshold {0}: expected a value between 0 and 1")]
    InvalidThreshold(f64),

    /// Field path that is empty or has an empty segment
    #[error("Invalid field path: {0:?}")]
    InvalidFieldPath(String),

    /// No fields to search
    #[error("No fields configured for search")]
    NoFields,

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for programmatic handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Threshold outside `[0, 1]`
    InvalidThreshold = 11001,
    /// Malformed field path
    InvalidFieldPath = 11002,
    /// Empty field list
    NoFields = 11003,
    /// JSON parsing error
    JsonParsing = 11004,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidThreshold(_) => SearchErrorCode::InvalidThreshold,
            SearchError::InvalidFieldPath(_) => SearchErrorCode::InvalidFieldPath,
            SearchError::NoFields => SearchErrorCode::NoFields,
            SearchError::Json(_) => SearchErrorCode::JsonParsing,
        }
    }
}
