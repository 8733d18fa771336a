//! Request and response types for extraction

use medscan_domain::Entity;
use serde::{Deserialize, Serialize};

/// Request to extract coded entities from text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Free-form text to analyze
    pub text: String,
}

impl ExtractionRequest {
    /// Create a request for `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Result of an extraction operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Non-overlapping entities sorted by start offset
    pub entities: Vec<Entity>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Tokens produced by the tokenizer
    pub token_count: usize,

    /// Index queries issued by the matcher
    pub phrases_queried: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
