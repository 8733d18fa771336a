//! Fuzzy-searchable terminology index
//!
//! Built once, then only read. Every query scans the whole reference set,
//! which is acceptable for terminologies of a few tens of thousands of rows.

use crate::config::IndexConfig;
use crate::fallback::{fallback_entries, EmbeddedSource};
use crate::loader::CsvSource;
use crate::similarity::{code_distance, description_distance, description_lower_bound, normalize};
use medscan_domain::{FuzzyIndex, MatchCandidate, MatchField, ReferenceEntry, TerminologySource};
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info, warn};

/// An entry plus its pre-normalized match keys
#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: ReferenceEntry,
    code_key: String,
    description_key: Vec<char>,
}

/// Read-only terminology index answering fuzzy similarity queries.
///
/// Construction never fails: malformed rows are dropped and an unusable
/// source is replaced by the embedded default set.
#[derive(Debug, Clone)]
pub struct TerminologyIndex {
    entries: Vec<IndexedEntry>,
    config: IndexConfig,
    dropped: usize,
    source: String,
}

impl TerminologyIndex {
    /// Build an index from reference rows.
    ///
    /// Rows without a code are dropped silently. Zero rows is a valid
    /// (empty) index.
    pub fn build(rows: Vec<ReferenceEntry>, config: IndexConfig) -> Self {
        Self::build_labeled(rows, config, "in-memory")
    }

    fn build_labeled(rows: Vec<ReferenceEntry>, config: IndexConfig, source: &str) -> Self {
        let total = rows.len();
        let entries: Vec<IndexedEntry> = rows
            .into_iter()
            .filter(ReferenceEntry::has_code)
            .map(|row| {
                let entry = ReferenceEntry::new(
                    row.code.trim(),
                    row.description.trim(),
                    row.category.trim(),
                );
                IndexedEntry {
                    code_key: normalize(&entry.code),
                    description_key: normalize(&entry.description).chars().collect(),
                    entry,
                }
            })
            .collect();

        let dropped = total - entries.len();
        if dropped > 0 {
            debug!("Dropped {} reference rows without a code", dropped);
        }
        info!("Built terminology index from {} ({} entries)", source, entries.len());

        Self {
            entries,
            config,
            dropped,
            source: source.to_string(),
        }
    }

    /// Build an index from any [`TerminologySource`]
    pub fn from_source<S>(source: &S, config: IndexConfig) -> Result<Self, S::Error>
    where
        S: TerminologySource,
    {
        let rows = source.load()?;
        Ok(Self::build_labeled(rows, config, &source.describe()))
    }

    /// Build an index from the embedded default set
    pub fn with_fallback(config: IndexConfig) -> Self {
        Self::build_labeled(fallback_entries(), config, &EmbeddedSource.describe())
    }

    /// Load the CSV at `path`, or fall back to the embedded set.
    ///
    /// Falls back when no path is given, when the file cannot be read or
    /// parsed, and when it yields no usable rows.
    pub fn load_or_fallback(path: Option<&Path>, config: IndexConfig) -> Self {
        let Some(path) = path else {
            debug!("No terminology source configured, using embedded set");
            return Self::with_fallback(config);
        };

        let source = CsvSource::new(path);
        match Self::from_source(&source, config.clone()) {
            Ok(index) if !index.is_empty() => index,
            Ok(_) => {
                warn!("{} produced no usable rows, using embedded set", source.describe());
                Self::with_fallback(config)
            }
            Err(e) => {
                Self::warn_fallback(&source.describe(), &e);
                Self::with_fallback(config)
            }
        }
    }

    fn warn_fallback(source: &str, error: &impl Display) {
        warn!("Terminology source {} unavailable ({}), using embedded set", source, error);
    }

    /// Candidates within `max_distance`, best first
    pub fn query(&self, text: &str) -> Vec<MatchCandidate> {
        self.candidates(text, self.config.max_distance)
    }

    /// Autocomplete lookup: top `limit` candidates within `search_max_distance`
    pub fn search(&self, text: &str, limit: usize) -> Vec<MatchCandidate> {
        let mut results = self.candidates(text, self.config.search_max_distance);
        results.truncate(limit);
        results
    }

    fn candidates(&self, text: &str, cutoff: f64) -> Vec<MatchCandidate> {
        let query = normalize(text);
        if query.is_empty() {
            return Vec::new();
        }
        let query_chars: Vec<char> = query.chars().collect();

        let mut results: Vec<MatchCandidate> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(ordinal, indexed)| {
                let (distance, field) = self.score(&query, &query_chars, indexed, cutoff);
                (distance <= cutoff).then(|| MatchCandidate {
                    entry: indexed.entry.clone(),
                    distance,
                    field,
                    ordinal,
                })
            })
            .collect();

        results.sort_by(MatchCandidate::rank_cmp);
        results
    }

    /// Distance of one entry to the query, and the field that produced it
    fn score(
        &self,
        query: &str,
        query_chars: &[char],
        indexed: &IndexedEntry,
        cutoff: f64,
    ) -> (f64, MatchField) {
        let code = code_distance(query, &indexed.code_key) * self.config.code_field_weight;

        let lower_bound = description_lower_bound(query_chars.len(), indexed.description_key.len());
        let description = if lower_bound > cutoff.min(code) {
            1.0
        } else {
            description_distance(query_chars, &indexed.description_key)
        };

        if code <= description {
            (code, MatchField::Code)
        } else {
            (description, MatchField::Description)
        }
    }

    /// Indexed reference entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Number of rows dropped while building
    pub fn dropped_rows(&self) -> usize {
        self.dropped
    }

    /// Label of the source the index was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Active configuration
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FuzzyIndex for TerminologyIndex {
    fn query(&self, text: &str) -> Vec<MatchCandidate> {
        TerminologyIndex::query(self, text)
    }

    fn len(&self) -> usize {
        TerminologyIndex::len(self)
    }
}
