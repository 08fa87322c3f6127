//! Normalized string similarity.

use crate::levenshtein_distance;

/// Weight applied to substring containment, scaled by the length ratio.
const CONTAINMENT_WEIGHT: f64 = 0.9;

/// Calculate case-insensitive similarity between two strings.
///
/// Rules, first match wins:
/// 1. Either string empty: `0.0`
/// 2. Equal: `1.0`
/// 3. One contains the other: `0.9 * shorter / longer`
/// 4. Otherwise: `1 - distance / longer`
///
/// # Returns
/// Similarity in `[0.0, 1.0]`, higher is more similar
///
/// # Example
/// ```
/// use fuzzyrank_search::similarity;
///
/// assert_eq!(similarity("Hello", "hello"), 1.0);
/// assert!((similarity("abcd", "bc") - 0.45).abs() < 1e-9);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_folded(&a.to_lowercase(), &b.to_lowercase())
}

/// Similarity for inputs that are already lowercased.
pub(crate) fn similarity_folded(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let longer = a_len.max(b_len) as f64;

    if a.contains(b) || b.contains(a) {
        let shorter = a_len.min(b_len) as f64;
        return CONTAINMENT_WEIGHT * (shorter / longer);
    }

    1.0 - levenshtein_distance(a, b) as f64 / longer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(similarity("search", "search"), 1.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(similarity("SEARCH", "search"), 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_containment_penalizes_length_gap() {
        let short_field = similarity("abc", "ab");
        let long_field = similarity("ab and a lot of other words here", "ab");
        assert!((short_field - 0.6).abs() < 1e-9);
        assert!(long_field < short_field);
    }

    #[test]
    fn test_edit_distance_branch() {
        // distance("kitten", "sitting") = 3, longer = 7
        let expected = 1.0 - 3.0 / 7.0;
        assert!((similarity("kitten", "sitting") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_completely_different() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }
}
