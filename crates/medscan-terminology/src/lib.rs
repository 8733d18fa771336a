//! MedScan Terminology
//!
//! Loads a coded reference terminology and answers fuzzy similarity queries
//! against it.
//!
//! # Overview
//!
//! The index is built once per process and then shared read-only by every
//! extraction run and autocomplete lookup. Construction cannot fail:
//!
//! - rows without a code are dropped while building
//! - a missing or unreadable source is replaced by an embedded default set
//!
//! # Matching
//!
//! Queries and indexed fields are case-folded and trimmed. Descriptions are
//! matched as approximate substrings (location ignored); codes are matched as
//! whole strings and weighted so a code hit wins over a description hit of
//! similar distance.
//!
//! # Example Usage
//!
//! ```
//! use medscan_terminology::{IndexConfig, TerminologyIndex};
//!
//! let index = TerminologyIndex::load_or_fallback(None, IndexConfig::default());
//! let best = index.query("hypertension").into_iter().next().unwrap();
//! assert_eq!(best.entry.code, "I10");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fallback;
mod index;
mod loader;
pub mod similarity;

pub use config::IndexConfig;
pub use error::TerminologyError;
pub use fallback::{fallback_entries, EmbeddedSource};
pub use index::TerminologyIndex;
pub use loader::{parse_reader, ColumnMap, CsvSource, CATEGORY_ALIASES, CODE_ALIASES, DESCRIPTION_ALIASES};
