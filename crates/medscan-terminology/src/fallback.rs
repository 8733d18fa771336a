//! Embedded default terminology
//!
//! Used whenever the external reference source cannot be loaded, so an index
//! can always be built.

use medscan_domain::{ReferenceEntry, TerminologySource};
use std::convert::Infallible;

const FALLBACK_ROWS: &[(&str, &str, &str)] = &[
    ("E11.9", "Type 2 diabetes mellitus without complications", "Endocrine"),
    ("I10", "Essential (primary) hypertension", "Circulatory"),
    ("J45.909", "Unspecified asthma, uncomplicated", "Respiratory"),
    ("M54.5", "Low back pain", "Musculoskeletal"),
    ("R51", "Headache", "Symptoms"),
    ("Z00.00", "Encounter for general adult medical examination without abnormal findings", "Factors"),
    ("K21.9", "Gastro-esophageal reflux disease without esophagitis", "Digestive"),
    ("F41.1", "Generalized anxiety disorder", "Mental"),
    ("N39.0", "Urinary tract infection, site not specified", "Genitourinary"),
    ("H10.1", "Acute atopic conjunctivitis", "Eye"),
    ("L20.9", "Atopic dermatitis, unspecified", "Skin"),
    ("R05", "Cough", "Symptoms"),
    ("R50.9", "Fever, unspecified", "Symptoms"),
    ("B34.9", "Viral infection, unspecified", "Infectious"),
    ("E78.5", "Hyperlipidemia, unspecified", "Endocrine"),
];

/// The embedded default reference set
pub fn fallback_entries() -> Vec<ReferenceEntry> {
    FALLBACK_ROWS
        .iter()
        .map(|(code, description, category)| ReferenceEntry::new(*code, *description, *category))
        .collect()
}

/// [`TerminologySource`] backed by the embedded default set
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl TerminologySource for EmbeddedSource {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<ReferenceEntry>, Self::Error> {
        Ok(fallback_entries())
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_is_usable() {
        let entries = fallback_entries();
        assert_eq!(entries.len(), 15);
        assert!(entries.iter().all(ReferenceEntry::has_code));
    }

    #[test]
    fn test_fallback_codes_unique() {
        let codes: HashSet<_> = fallback_entries().into_iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), 15);
    }

    #[test]
    fn test_embedded_source() {
        let source = EmbeddedSource;
        assert_eq!(source.load().unwrap().len(), 15);
        assert_eq!(source.describe(), "embedded");
    }
}
