//! MedScan Extractor
//!
//! Finds spans of free text that fuzzily match entries of a coded terminology.
//!
//! # Overview
//!
//! Extraction is a single greedy pass. The text is cut into tokens, then at
//! each uncovered token the matcher searches the index with phrases of up to
//! `max_phrase_len` tokens, longest first, and keeps the first phrase whose
//! best candidate is close enough. Entities never overlap and are returned in
//! text order with a confidence of `1 - distance`.
//!
//! # Architecture
//!
//! ```text
//! Text → Tokenizer → Phrase Matcher ⇄ FuzzyIndex → Assembler → Entities
//! ```
//!
//! # Key Features
//!
//! - **Typo tolerance**: approximate matching against codes and descriptions
//! - **Cooperative execution**: long inputs are scanned in batches with
//!   progress reports and yields between them
//! - **Cancellation**: a caller-supplied check stops stale runs early
//!
//! # Example Usage
//!
//! ```
//! use medscan_extractor::{Extractor, ExtractorConfig, ExtractionRequest};
//! use medscan_terminology::{IndexConfig, TerminologyIndex};
//! use std::sync::Arc;
//!
//! let index = Arc::new(TerminologyIndex::with_fallback(IndexConfig::default()));
//! let extractor = Extractor::new(index, ExtractorConfig::default());
//!
//! let result = extractor
//!     .extract(ExtractionRequest::new("Patient has diabetes and hypertension."))
//!     .unwrap();
//!
//! let codes: Vec<_> = result.entities.iter().map(|e| e.code.as_str()).collect();
//! assert_eq!(codes, vec!["E11.9", "I10"]);
//! ```

#![warn(missing_docs)]

mod assembler;
mod config;
mod error;
mod extractor;
pub mod matcher;
pub mod tokenizer;
mod types;


pub use assembler::assemble;
pub use config::{ExtractorConfig, PhrasePolicy};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use matcher::{MatchOutcome, PhraseMatcher, ScanResult};
pub use tokenizer::{is_stop_word, Tokenizer, STOP_WORDS};
pub use types::{ExtractionMetadata, ExtractionRequest, ExtractionResult};
