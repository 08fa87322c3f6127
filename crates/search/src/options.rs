//! Search options: which fields to search and how strictly.

use crate::{Result, SearchError, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};

/// A field to search, with an optional threshold override.
///
/// Deserializes from either a bare path string or a table:
///
/// ```toml
/// fields = ["name", { path = "employee_id", threshold = 0.95 }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldSpecRepr")]
pub struct FieldSpec {
    /// Dot-delimited path into the record, e.g. `profile.name`
    pub path: String,
    /// Threshold for this field; falls back to [`SearchOptions::threshold`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldSpecRepr {
    Path(String),
    Full {
        path: String,
        #[serde(default)]
        threshold: Option<f64>,
    },
}

impl From<FieldSpecRepr> for FieldSpec {
    fn from(repr: FieldSpecRepr) -> Self {
        match repr {
            FieldSpecRepr::Path(path) => Self { path, threshold: None },
            FieldSpecRepr::Full { path, threshold } => Self { path, threshold },
        }
    }
}

impl FieldSpec {
    /// Creates a field using the search-wide threshold.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), threshold: None }
    }

    /// Sets a threshold for this field only.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Threshold that applies to this field.
    #[inline]
    pub fn threshold_or(&self, default: f64) -> f64 {
        self.threshold.unwrap_or(default)
    }
}

impl From<&str> for FieldSpec {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FieldSpec {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Options for a search pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Default similarity threshold for every field
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Fields to search, in order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Maximum number of results to return after ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fields: Vec::new(),
            limit: None,
        }
    }
}

impl SearchOptions {
    /// Creates options searching `fields` with the default threshold.
    ///
    /// # Example
    /// ```
    /// use fuzzyrank_search::SearchOptions;
    ///
    /// let options = SearchOptions::new(["name", "profile.email"]).with_limit(20);
    /// assert_eq!(options.fields.len(), 2);
    /// assert!(options.validate().is_ok());
    /// ```
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the default threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Caps the number of ranked results.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: impl Into<FieldSpec>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Checks thresholds and field paths.
    ///
    /// Searching never requires this; it is meant for options that come from
    /// configuration files or other untrusted input.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;

        if self.fields.is_empty() {
            return Err(SearchError::NoFields);
        }

        for field in &self.fields {
            if field.path.split('.').any(str::is_empty) {
                return Err(SearchError::InvalidFieldPath(field.path.clone()));
            }
            if let Some(threshold) = field.threshold {
                validate_threshold(threshold)?;
            }
        }

        Ok(())
    }
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(SearchError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchErrorCode;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.threshold, 0.7);
        assert!(options.fields.is_empty());
        assert!(options.limit.is_none());
    }

    #[test]
    fn test_builder() {
        let options = SearchOptions::new(["name"])
            .field(FieldSpec::new("id").with_threshold(0.95))
            .with_threshold(0.6)
            .with_limit(5);

        assert_eq!(options.fields[0].threshold_or(options.threshold), 0.6);
        assert_eq!(options.fields[1].threshold_or(options.threshold), 0.95);
        assert_eq!(options.limit, Some(5));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let err = SearchOptions::new(["name"]).with_threshold(1.5).validate().unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidThreshold);

        let err = SearchOptions::new(["name"]).with_threshold(f64::NAN).validate().unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidThreshold);

        let err = SearchOptions::default()
            .field(FieldSpec::new("name").with_threshold(-0.1))
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidThreshold);
    }

    #[test]
    fn test_validate_rejects_bad_paths() {
        assert!(matches!(
            SearchOptions::new(["profile..name"]).validate(),
            Err(SearchError::InvalidFieldPath(_))
        ));
        assert!(matches!(
            SearchOptions::new([""]).validate(),
            Err(SearchError::InvalidFieldPath(_))
        ));
        assert!(matches!(SearchOptions::default().validate(), Err(SearchError::NoFields)));
    }

    #[test]
    fn test_deserialize_mixed_fields() {
        let json = r#"{
            "fields": ["name", {"path": "employee_id", "threshold": 0.95}],
            "limit": 10
        }"#;
        let options: SearchOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.threshold, DEFAULT_THRESHOLD);
        assert_eq!(options.fields[0], FieldSpec::new("name"));
        assert_eq!(options.fields[1], FieldSpec::new("employee_id").with_threshold(0.95));
        assert_eq!(options.limit, Some(10));
    }
}
