//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Text exceeds maximum length
    #[error("Text too long: {0} bytes (max: {1})")]
    TextTooLong(usize, usize),

    /// The run was superseded or cancelled at a batch boundary
    #[error("Extraction cancelled after {processed} of {total} start positions")]
    Cancelled {
        /// Start positions scanned before stopping
        processed: usize,
        /// Start positions in the run
        total: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
