//! CSV terminology source
//!
//! Headers are resolved once per load against a fixed alias table, matched
//! case-insensitively.

use crate::error::TerminologyError;
use csv::{ReaderBuilder, StringRecord};
use medscan_domain::{ReferenceEntry, TerminologySource};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header aliases for the code column
pub const CODE_ALIASES: &[&str] = &["icdcode", "icd_code", "code"];

/// Header aliases for the description column
pub const DESCRIPTION_ALIASES: &[&str] = &["description", "desc", "long_description"];

/// Header aliases for the category column
pub const CATEGORY_ALIASES: &[&str] = &["category", "chapter"];

const DEFAULT_DESCRIPTION: &str = "No description";
const DEFAULT_CATEGORY: &str = "General";

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Code column
    pub code: usize,
    /// Description column, if present
    pub description: Option<usize>,
    /// Category column, if present
    pub category: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions from a header row.
    ///
    /// The first header matching any alias wins. A missing code column is an
    /// error; every other column falls back to a default value.
    pub fn resolve(headers: &StringRecord) -> Result<Self, TerminologyError> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
        };

        let code = find(CODE_ALIASES).ok_or(TerminologyError::MissingColumn("code"))?;
        Ok(Self {
            code,
            description: find(DESCRIPTION_ALIASES),
            category: find(CATEGORY_ALIASES),
        })
    }

    /// Build an entry from a record. Returns `None` if the code is blank.
    pub fn entry(&self, record: &StringRecord) -> Option<ReferenceEntry> {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let code = field(Some(self.code))?;
        Some(ReferenceEntry::new(
            code,
            field(self.description).unwrap_or(DEFAULT_DESCRIPTION),
            field(self.category).unwrap_or(DEFAULT_CATEGORY),
        ))
    }
}

/// Parse a header-delimited CSV terminology from any reader.
///
/// Malformed records and rows without a code are skipped.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<ReferenceEntry>, TerminologyError> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in csv_reader.records().enumerate() {
        match record {
            Ok(record) => match columns.entry(&record) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            },
            Err(e) => {
                debug!("Skipping malformed terminology row {}: {}", row + 1, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} terminology rows without a usable code", skipped);
    }

    Ok(entries)
}

/// [`TerminologySource`] reading a CSV file from disk
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Create a source for the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TerminologySource for CsvSource {
    type Error = TerminologyError;

    fn load(&self) -> Result<Vec<ReferenceEntry>, Self::Error> {
        let file = File::open(&self.path)?;
        let entries = parse_reader(file)?;
        info!("Read {} terminology rows from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
