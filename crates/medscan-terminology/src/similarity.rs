//! Similarity measures
//!
//! Distances are normalized to [0.0, 1.0] where 0 is identical.

use strsim::normalized_levenshtein;

/// Case-fold and trim an indexed field or query
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Approximate-substring edit distance (Sellers).
///
/// Minimum number of edits turning `pattern` into any substring of `text`.
/// Leading and trailing text is free, so where the match sits inside
/// `text` does not matter.
pub fn substring_edits(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // prev[i] = edits to align pattern[..i] ending at the previous text column
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0usize; m + 1];
    let mut best = prev[m];

    for &ch in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != ch);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// Distance of a normalized query against a normalized description.
///
/// Edits over the query length, clamped to 1.
pub fn description_distance(query: &[char], description: &[char]) -> f64 {
    if query.is_empty() {
        return 1.0;
    }
    let edits = substring_edits(query, description);
    (edits as f64 / query.len() as f64).min(1.0)
}

/// Whole-string distance of a normalized query against a normalized code
pub fn code_distance(query: &str, code: &str) -> f64 {
    (1.0 - normalized_levenshtein(query, code)).clamp(0.0, 1.0)
}

/// Lower bound on `description_distance`, cheap enough to prefilter with.
///
/// A pattern longer than the text needs at least the length difference in
/// insertions.
pub fn description_lower_bound(query_len: usize, description_len: usize) -> f64 {
    if query_len == 0 {
        return 1.0;
    }
    query_len.saturating_sub(description_len) as f64 / query_len as f64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: distances stay in [0, 1]
        #[test]
        fn test_distance_bounded(q in "[a-z ]{0,12}", t in "[a-z ]{0,30}") {
            let d = description_distance(&q.chars().collect::<Vec<_>>(), &t.chars().collect::<Vec<_>>());
            prop_assert!((0.0..=1.0).contains(&d));
        }

        /// Property: any substring of the text matches with zero edits
        #[test]
        fn test_substring_is_exact(t in "[a-z]{1,30}", a in 0usize..30, len in 1usize..10) {
            let chars: Vec<char> = t.chars().collect();
            let start = a % chars.len();
            let end = (start + len).min(chars.len());
            prop_assert_eq!(substring_edits(&chars[start..end], &chars), 0);
        }

        /// Property: the length lower bound never exceeds the real distance
        #[test]
        fn test_lower_bound_holds(q in "[a-z]{1,15}", t in "[a-z]{0,10}") {
            let qc: Vec<char> = q.chars().collect();
            let tc: Vec<char> = t.chars().collect();
            prop_assert!(description_lower_bound(qc.len(), tc.len()) <= description_distance(&qc, &tc) + 1e-12);
        }
    }
}
