//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction engine and the
//! terminology infrastructure. Implementations live in other crates.

use crate::{MatchCandidate, ReferenceEntry};

/// Trait for loading a reference terminology
///
/// Implemented by the infrastructure layer (medscan-terminology)
pub trait TerminologySource {
    /// Error type for load operations
    type Error;

    /// Load every reference row the source provides.
    ///
    /// Rows may still be malformed (e.g. missing a code); index construction
    /// is responsible for dropping them.
    fn load(&self) -> Result<Vec<ReferenceEntry>, Self::Error>;

    /// Short label for logs (file path, "embedded", ...)
    fn describe(&self) -> String;
}

/// Trait for fuzzy lookup against a built terminology
///
/// Implementations must be read-only once built so they can be shared by
/// concurrent extraction runs without locking.
pub trait FuzzyIndex: Send + Sync {
    /// All candidates within the index's distance cutoff, best first.
    fn query(&self, text: &str) -> Vec<MatchCandidate>;

    /// The best candidate for `text`, if any
    fn best_match(&self, text: &str) -> Option<MatchCandidate> {
        self.query(text).into_iter().next()
    }

    /// Number of indexed entries
    fn len(&self) -> usize;

    /// Whether the index holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
