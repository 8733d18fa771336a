//! MedScan Domain Layer
//!
//! This crate contains the value types and trait interfaces shared by every
//! other MedScan crate. It holds no matching logic of its own.
//!
//! ## Key Concepts
//!
//! - **ReferenceEntry**: One coded concept (code, description, category)
//! - **Token**: An offset-tagged lexical unit cut from the input text
//! - **MatchCandidate**: A scored answer from a terminology query
//! - **Entity**: An accepted match, reported with a confidence, not a certainty
//!
//! ## Architecture
//!
//! - Pure data and invariants only
//! - Infrastructure implementations (index, extractor, worker) live in other crates
//! - Trait definitions for the seams between them

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod entity;
pub mod entry;
pub mod token;
pub mod traits;

// Re-exports for convenience
pub use candidate::{MatchCandidate, MatchField};
pub use entity::{Entity, Overlap};
pub use entry::ReferenceEntry;
pub use token::Token;
pub use traits::{FuzzyIndex, TerminologySource};
