//! Filter-and-rank pipeline over a candidate set.
//!
//! Records are borrowed, scored, filtered and stable-sorted by descending
//! score. Only the survivors are cloned into the output, so the caller's
//! collection is never touched.

use crate::record::{is_blank, RecordMatch};
use crate::{search_record_with, SearchOptions, Searchable};
use serde::{Deserialize, Serialize};

/// Ranked item with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// The matched item
    pub item: T,
    /// Relevance score (higher is better)
    pub score: f64,
    /// Paths of the fields that matched
    pub matched_fields: Vec<String>,
}

/// Summary of one ranking pass, for logging and metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankStats {
    /// Records considered
    pub candidates: usize,
    /// Records that matched at least one field
    pub matches: usize,
    /// Records returned after the limit
    pub returned: usize,
}

/// Borrowed record with its transient scoring data.
struct Scored<'a, T> {
    item: &'a T,
    result: RecordMatch,
}

/// Filter `records` to those matching `query` and order them by relevance.
///
/// A blank query returns all records unchanged. Otherwise each record is
/// searched on `fields` with `threshold`, non-matches are dropped and the
/// rest are stable-sorted by descending score: records with equal scores keep
/// their input order.
///
/// # Example
/// ```
/// use fuzzyrank_search::{filter_and_rank, DEFAULT_THRESHOLD};
/// use serde_json::json;
///
/// let records = vec![
///     json!({"name": "Alice Recruiter"}),
///     json!({"name": "Alice R"}),
///     json!({"name": "Bob"}),
/// ];
///
/// let ranked = filter_and_rank(&records, &["name"], "Alice", DEFAULT_THRESHOLD);
/// assert_eq!(ranked, vec![json!({"name": "Alice R"}), json!({"name": "Alice Recruiter"})]);
/// ```
pub fn filter_and_rank<T, S>(records: &[T], fields: &[S], query: &str, threshold: f64) -> Vec<T>
where
    T: Searchable + Clone,
    S: AsRef<str>,
{
    let options = SearchOptions::new(fields.iter().map(|field| field.as_ref())).with_threshold(threshold);
    rank(records, &options, query)
        .into_iter()
        .map(|result| result.item)
        .collect()
}

/// Rank `records` with `options`, keeping scores and matched fields.
///
/// A blank query returns every record in input order with score `0.0`.
/// [`SearchOptions::limit`] is applied after sorting.
pub fn rank<T>(records: &[T], options: &SearchOptions, query: &str) -> Vec<SearchResult<T>>
where
    T: Searchable + Clone,
{
    rank_with_stats(records, options, query).0
}

/// Like [`rank`], also returning counts for the pass.
pub fn rank_with_stats<T>(
    records: &[T],
    options: &SearchOptions,
    query: &str,
) -> (Vec<SearchResult<T>>, RankStats)
where
    T: Searchable + Clone,
{
    rank_by(records, options, query, |records| {
        records
            .iter()
            .map(|item| Scored { item, result: search_record_with(item, options, query) })
            .collect()
    })
}

/// Parallel variant of [`rank`], scoring records on the rayon pool.
///
/// Produces exactly the same order as [`rank`].
#[cfg(feature = "parallel")]
pub fn par_rank<T>(records: &[T], options: &SearchOptions, query: &str) -> Vec<SearchResult<T>>
where
    T: Searchable + Clone + Sync,
{
    par_rank_with_stats(records, options, query).0
}

/// Parallel variant of [`rank_with_stats`].
#[cfg(feature = "parallel")]
pub fn par_rank_with_stats<T>(
    records: &[T],
    options: &SearchOptions,
    query: &str,
) -> (Vec<SearchResult<T>>, RankStats)
where
    T: Searchable + Clone + Sync,
{
    use rayon::prelude::*;

    // Indexed collect keeps input order, so the stable sort sees the same sequence
    rank_by(records, options, query, |records| {
        records
            .par_iter()
            .map(|item| Scored { item, result: search_record_with(item, options, query) })
            .collect()
    })
}

/// Parallel variant of [`filter_and_rank`].
#[cfg(feature = "parallel")]
pub fn par_filter_and_rank<T, S>(records: &[T], fields: &[S], query: &str, threshold: f64) -> Vec<T>
where
    T: Searchable + Clone + Sync,
    S: AsRef<str>,
{
    let options = SearchOptions::new(fields.iter().map(|field| field.as_ref())).with_threshold(threshold);
    par_rank(records, &options, query)
        .into_iter()
        .map(|result| result.item)
        .collect()
}

/// Shared pass: blank-query shortcut, then `score` over all records, then
/// filter, sort and limit.
fn rank_by<'a, T, F>(
    records: &'a [T],
    options: &SearchOptions,
    query: &str,
    score: F,
) -> (Vec<SearchResult<T>>, RankStats)
where
    T: Clone,
    F: FnOnce(&'a [T]) -> Vec<Scored<'a, T>>,
{
    if is_blank(query) {
        return pass_through(records, options);
    }
    finish(score(records), options, query)
}

fn pass_through<T: Clone>(records: &[T], options: &SearchOptions) -> (Vec<SearchResult<T>>, RankStats) {
    let take = options.limit.unwrap_or(records.len());
    let results: Vec<_> = records
        .iter()
        .take(take)
        .map(|item| SearchResult { item: item.clone(), score: 0.0, matched_fields: Vec::new() })
        .collect();

    let stats = RankStats {
        candidates: records.len(),
        matches: records.len(),
        returned: results.len(),
    };
    (results, stats)
}

fn finish<T: Clone>(
    mut scored: Vec<Scored<'_, T>>,
    options: &SearchOptions,
    query: &str,
) -> (Vec<SearchResult<T>>, RankStats) {
    let candidates = scored.len();
    scored.retain(|entry| entry.result.matches);
    let matches = scored.len();

    // `sort_by` is stable: ties keep input order
    scored.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));

    if let Some(limit) = options.limit {
        scored.truncate(limit);
    }

    let stats = RankStats { candidates, matches, returned: scored.len() };

    tracing::debug!(
        candidates,
        matches,
        returned = stats.returned,
        fields = options.fields.len(),
        query_len = query.chars().count(),
        "Ranked records"
    );

    let results = scored
        .into_iter()
        .map(|entry| SearchResult {
            item: entry.item.clone(),
            score: entry.result.score,
            matched_fields: entry.result.matched_fields,
        })
        .collect();

    (results, stats)
}
