//! Match candidates returned by terminology queries

use crate::ReferenceEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which indexed field produced a candidate's distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// Matched against the terminology code
    Code,
    /// Matched against the description text
    Description,
}

/// A scored answer from a terminology query.
///
/// `distance` is in [0.0, 1.0]: 0 is identical, 1 means no similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The matched reference entry
    pub entry: ReferenceEntry,
    /// Normalized distance to the query
    pub distance: f64,
    /// Field that produced the distance
    pub field: MatchField,
    /// Position of the entry in the reference set, used for stable ordering
    pub ordinal: usize,
}

impl MatchCandidate {
    /// Confidence implied by this candidate (`1 - distance`)
    pub fn confidence(&self) -> f64 {
        (1.0 - self.distance).clamp(0.0, 1.0)
    }

    /// Canonical candidate ordering: distance ascending, code field before
    /// description field, then reference-set insertion order.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.field.cmp(&other.field))
            .then(self.ordinal.cmp(&other.ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(distance: f64, field: MatchField, ordinal: usize) -> MatchCandidate {
        MatchCandidate {
            entry: ReferenceEntry::new(format!("C{ordinal}"), "desc", "General"),
            distance,
            field,
            ordinal,
        }
    }

    #[test]
    fn test_confidence() {
        let c = candidate(0.1, MatchField::Description, 0);
        assert!((c.confidence() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_rank_by_distance_first() {
        let a = candidate(0.05, MatchField::Description, 3);
        let b = candidate(0.10, MatchField::Code, 0);
        assert_eq!(a.rank_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_code_field_wins_ties() {
        let code = candidate(0.1, MatchField::Code, 5);
        let desc = candidate(0.1, MatchField::Description, 1);
        assert_eq!(code.rank_cmp(&desc), Ordering::Less);
    }

    #[test]
    fn test_insertion_order_breaks_remaining_ties() {
        let mut list = vec![
            candidate(0.2, MatchField::Description, 2),
            candidate(0.2, MatchField::Description, 0),
            candidate(0.2, MatchField::Description, 1),
        ];
        list.sort_by(MatchCandidate::rank_cmp);
        let ordinals: Vec<_> = list.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }
}
