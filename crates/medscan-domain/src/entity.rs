//! Entity module - an accepted match reported to the caller

use crate::{MatchCandidate, Token};
use serde::{Deserialize, Serialize};

/// A span of the input text matched to a terminology entry.
///
/// Confidence is `1 - distance` of the accepted match: a quality signal,
/// not a guarantee of coding correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Matched text exactly as it appears in the input
    pub term: String,
    /// Start offset in characters (inclusive)
    pub start: usize,
    /// End offset in characters (exclusive)
    pub end: usize,
    /// Terminology code
    pub code: String,
    /// Terminology description
    pub description: String,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
}

impl Entity {
    /// Build an entity spanning `first` through `last` from an accepted
    /// candidate. The term is sliced from `original`, skipped words included.
    ///
    /// Returns `None` if the tokens do not describe a valid slice of `original`.
    pub fn from_candidate(
        original: &str,
        first: &Token,
        last: &Token,
        candidate: &MatchCandidate,
    ) -> Option<Self> {
        let term = original.get(first.byte_start..last.byte_end)?;
        Some(Self {
            term: term.to_string(),
            start: first.start,
            end: last.end,
            code: candidate.entry.code.clone(),
            description: candidate.entry.description.clone(),
            confidence: candidate.confidence(),
        })
    }

    /// Whether two entities' half-open ranges intersect
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check a start-sorted list for overlapping or out-of-order ranges.
    pub fn find_overlap(entities: &[Entity]) -> Option<Overlap> {
        entities
            .windows(2)
            .position(|pair| pair[0].overlaps(&pair[1]) || pair[0].start > pair[1].start)
            .map(|i| Overlap {
                first: i,
                second: i + 1,
            })
    }
}

/// First pair of offending neighbours found by [`Entity::find_overlap`]
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// Index of the earlier entity
    pub first: usize,
    /// Index of the later entity
    pub second: usize,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: overlap is symmetric
        #[test]
        fn test_overlap_symmetric(a in 0usize..100, la in 1usize..20, b in 0usize..100, lb in 1usize..20) {
            let x = Entity { term: String::new(), start: a, end: a + la, code: String::new(), description: String::new(), confidence: 1.0 };
            let y = Entity { term: String::new(), start: b, end: b + lb, code: String::new(), description: String::new(), confidence: 1.0 };
            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
        }
    }
}
