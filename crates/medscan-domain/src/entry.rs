//! Reference entry module - one coded concept of the terminology

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coded concept in the reference terminology.
///
/// Entries are immutable once a terminology set is loaded. The full set is
/// loaded once and shared read-only by every extraction session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Terminology code (e.g. `E11.9`)
    pub code: String,

    /// Human-readable description of the concept
    pub description: String,

    /// Grouping used for display (e.g. `Endocrine`)
    pub category: String,
}

impl ReferenceEntry {
    /// Create a new reference entry
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// Whether the entry carries a usable code.
    ///
    /// Rows without one are dropped while an index is built.
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

impl fmt::Display for ReferenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = ReferenceEntry::new("I10", "Essential (primary) hypertension", "Circulatory");
        assert_eq!(entry.code, "I10");
        assert_eq!(entry.category, "Circulatory");
        assert!(entry.has_code());
    }

    #[test]
    fn test_blank_code_is_unusable() {
        let entry = ReferenceEntry::new("   ", "Headache", "Symptoms");
        assert!(!entry.has_code());
    }

    #[test]
    fn test_display() {
        let entry = ReferenceEntry::new("R51", "Headache", "Symptoms");
        assert_eq!(entry.to_string(), "R51 Headache");
    }
}
