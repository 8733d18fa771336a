//! Error types for terminology loading

use thiserror::Error;

/// Errors that can occur while reading a terminology source.
///
/// None of these escape index construction: `TerminologyIndex::load_or_fallback`
/// recovers from all of them with the embedded dataset.
#[derive(Error, Debug)]
pub enum TerminologyError {
    /// Source file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing or header error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No header resolved to a required column
    #[error("Missing column: none of the headers resolve to '{0}'")]
    MissingColumn(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
