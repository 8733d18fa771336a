//! Token module

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// An offset-tagged run of text cut from the input.
///
/// `start` and `end` are half-open character offsets into the original text.
/// The matching byte offsets are kept alongside for slicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text, original casing preserved
    pub text: String,
    /// Start offset in characters (inclusive)
    pub start: usize,
    /// End offset in characters (exclusive)
    pub end: usize,
    /// Start offset in bytes (inclusive)
    pub byte_start: usize,
    /// End offset in bytes (exclusive)
    pub byte_end: usize,
}

impl Token {
    /// Create a token for `text` found at character offset `start` and byte
    /// offset `byte_start`
    pub fn new(text: impl Into<String>, start: usize, byte_start: usize) -> Self {
        let text = text.into();
        Self {
            start,
            end: start + text.chars().count(),
            byte_start,
            byte_end: byte_start + text.len(),
            text,
        }
    }

    /// Length of the token in characters
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }

    /// Byte range of the token in the original text
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    /// Whether the token still matches the text it was cut from
    pub fn matches_source(&self, original: &str) -> bool {
        original.get(self.byte_range()) == Some(self.text.as_str())
            && original[..self.byte_start].chars().count() == self.start
    }
}
