//! Field access and per-record matching.

use crate::{fuzzy_match, relevance_score, FieldSpec, SearchOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record whose text fields can be searched.
///
/// Implement this for your own types with an explicit accessor, or use the
/// provided implementation for [`serde_json::Value`], which walks dotted
/// paths through nested objects.
///
/// # Example
/// ```
/// use fuzzyrank_search::Searchable;
///
/// struct Candidate {
///     name: String,
///     city: Option<String>,
/// }
///
/// impl Searchable for Candidate {
///     fn field(&self, path: &str) -> Option<&str> {
///         match path {
///             "name" => Some(&self.name),
///             "city" => self.city.as_deref(),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Searchable {
    /// Text at `path`, or `None` when the field is absent or not text.
    fn field(&self, path: &str) -> Option<&str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn field(&self, path: &str) -> Option<&str> {
        (**self).field(path)
    }
}

impl Searchable for Value {
    fn field(&self, path: &str) -> Option<&str> {
        resolve_path(self, path)?.as_str()
    }
}

impl Searchable for Map<String, Value> {
    fn field(&self, path: &str) -> Option<&str> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.get(head)?;
        match rest {
            Some(rest) => value.field(rest),
            None => value.as_str(),
        }
    }
}

/// Walk a dotted path through nested objects.
///
/// Numeric segments index into arrays, so `tags.0` reads the first tag.
/// Returns `None` as soon as a segment is missing.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Outcome of searching one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMatch {
    /// Whether any field matched
    pub matches: bool,
    /// Best relevance score over the matching fields
    pub score: f64,
    /// Paths of the matching fields, in search order
    pub matched_fields: Vec<String>,
}

impl RecordMatch {
    /// Result for an empty query: everything matches, unscored.
    fn pass_through() -> Self {
        Self { matches: true, score: 0.0, matched_fields: Vec::new() }
    }
}

/// Returns true if the query should skip matching entirely.
#[inline]
pub(crate) fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Search `fields` of a record with one threshold for all of them.
///
/// A blank query matches with score `0.0`. Otherwise every field that
/// resolves to non-empty text and passes [`fuzzy_match`] is reported, and the score is
/// the best single-field [`relevance_score`], not the sum.
///
/// # Example
/// ```
/// use fuzzyrank_search::{search_record, DEFAULT_THRESHOLD};
/// use serde_json::json;
///
/// let record = json!({"name": "Alice", "profile": {"title": "Recruiter"}});
/// let result = search_record(&record, &["name", "profile.title"], "recruiter", DEFAULT_THRESHOLD);
///
/// assert!(result.matches);
/// assert_eq!(result.matched_fields, vec!["profile.title"]);
/// ```
pub fn search_record<R, S>(record: &R, fields: &[S], query: &str, threshold: f64) -> RecordMatch
where
    R: Searchable + ?Sized,
    S: AsRef<str>,
{
    search_fields(
        record,
        fields.iter().map(|field| (field.as_ref(), threshold)),
        query,
    )
}

/// Search a record using the fields and thresholds in `options`.
pub fn search_record_with<R>(record: &R, options: &SearchOptions, query: &str) -> RecordMatch
where
    R: Searchable + ?Sized,
{
    search_fields(
        record,
        options
            .fields
            .iter()
            .map(|field: &FieldSpec| (field.path.as_str(), field.threshold_or(options.threshold))),
        query,
    )
}

fn search_fields<'f, R>(
    record: &R,
    fields: impl Iterator<Item = (&'f str, f64)>,
    query: &str,
) -> RecordMatch
where
    R: Searchable + ?Sized,
{
    if is_blank(query) {
        return RecordMatch::pass_through();
    }

    let mut best = 0.0_f64;
    let mut matched_fields = Vec::new();

    for (path, threshold) in fields {
        // Empty text is treated like an absent field
        let Some(text) = record.field(path).filter(|text| !text.is_empty()) else {
            continue;
        };
        if fuzzy_match(text, query, threshold) {
            best = best.max(relevance_score(text, query));
            matched_fields.push(path.to_string());
        }
    }

    RecordMatch {
        matches: !matched_fields.is_empty(),
        score: best,
        matched_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_THRESHOLD;
    use serde_json::json;

    #[test]
    fn test_resolve_nested_path() {
        let record = json!({"profile": {"name": "Alice", "tags": ["rust", "go"]}});
        assert_eq!(record.field("profile.name"), Some("Alice"));
        assert_eq!(record.field("profile.tags.1"), Some("go"));
        assert_eq!(record.field("profile.tags.7"), None);
    }

    #[test]
    fn test_missing_segment_is_absent() {
        let record = json!({"name": "Alice"});
        assert_eq!(record.field("profile.name"), None);
        assert_eq!(record.field("name.first"), None);
    }

    #[test]
    fn test_non_string_is_absent() {
        let record = json!({"age": 42, "active": true, "profile": {"name": null}});
        assert_eq!(record.field("age"), None);
        assert_eq!(record.field("active"), None);
        assert_eq!(record.field("profile"), None);
        assert_eq!(record.field("profile.name"), None);
    }

    #[test]
    fn test_map_impl_matches_value_impl() {
        let record = json!({"profile": {"name": "Alice"}, "id": "a-1"});
        let map = record.as_object().unwrap();
        assert_eq!(map.field("profile.name"), Some("Alice"));
        assert_eq!(map.field("id"), Some("a-1"));
        assert_eq!(map.field("missing.name"), None);
    }

    #[test]
    fn test_blank_query_passes_through() {
        let record = json!({"name": "Alice"});
        for query in ["", "   "] {
            let result = search_record(&record, &["name"], query, DEFAULT_THRESHOLD);
            assert_eq!(result, RecordMatch::pass_through());
        }
    }

    #[test]
    fn test_best_field_score_wins() {
        let record = json!({"name": "Alice", "bio": "Alice likes long walks"});
        let result = search_record(&record, &["bio", "name"], "alice", DEFAULT_THRESHOLD);

        assert!(result.matches);
        assert_eq!(result.matched_fields, vec!["bio", "name"]);
        assert_eq!(result.score, relevance_score("Alice", "alice"));
    }

    #[test]
    fn test_absent_field_contributes_nothing() {
        let record = json!({"name": "Bob"});
        let result = search_record(&record, &["profile.name"], "bob", DEFAULT_THRESHOLD);

        assert!(!result.matches);
        assert_eq!(result.score, 0.0);
        assert!(result.matched_fields.is_empty());
    }

    #[test]
    fn test_empty_field_never_matches() {
        let record = json!({"name": "", "title": "Alice"});
        let result = search_record(&record, &["name"], "alice", 0.0);
        assert!(!result.matches);
        assert!(result.matched_fields.is_empty());

        let result = search_record(&record, &["name", "title"], "alice", 0.0);
        assert_eq!(result.matched_fields, vec!["title"]);
        assert!(result.score > 0.0);
    }

    #[test]
    fn test_whitespace_query_is_blank_here_only() {
        // The matcher itself sees no query words and accepts the text
        assert!(crate::fuzzy_match("Alice", " ", DEFAULT_THRESHOLD));
        assert!(relevance_score("Alice", " ") > 0.0);

        let result = search_record(&json!({"name": "Alice"}), &["name"], " ", DEFAULT_THRESHOLD);
        assert_eq!(result.score, 0.0);
        assert!(result.matched_fields.is_empty());
    }

    #[test]
    fn test_per_field_threshold() {
        let record = json!({"id": "EMP-1043", "name": "Jon"});
        // similarity("emp-1043", "emp-1044") = 0.875
        let strict = SearchOptions::new([FieldSpec::new("id").with_threshold(0.9)]);
        let loose = SearchOptions::new([FieldSpec::new("id").with_threshold(0.8)]);

        assert!(!search_record_with(&record, &strict, "EMP-1044").matches);
        assert!(search_record_with(&record, &loose, "EMP-1044").matches);
    }
}
