//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// How the matcher picks among accepted phrase lengths at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhrasePolicy {
    /// The longest accepted phrase wins, even when a shorter one scores better
    LongestFirst,
    /// The lowest-distance accepted phrase wins; ties go to the longer phrase
    BestScore,
}

impl Default for PhrasePolicy {
    fn default() -> Self {
        PhrasePolicy::LongestFirst
    }
}

/// Configuration for the Extractor
///
/// Fields missing from a TOML table take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (bytes)
    pub max_text_length: usize,

    /// Longest phrase window, in tokens
    pub max_phrase_len: usize,

    /// Distance a single-token phrase must stay strictly below
    pub single_token_threshold: f64,

    /// Distance a multi-token phrase must stay strictly below
    pub multi_token_threshold: f64,

    /// Shortest token kept by the tokenizer (characters)
    pub min_token_len: usize,

    /// Shortest token searched on its own (characters)
    pub min_single_token_len: usize,

    /// Start positions scanned between yields
    pub batch_size: usize,

    /// Tie policy between phrase lengths
    pub phrase_policy: PhrasePolicy,
}

impl ExtractorConfig {
    /// Distance threshold for a phrase of `len` tokens
    pub fn threshold_for(&self, len: usize) -> f64 {
        if len == 1 {
            self.single_token_threshold
        } else {
            self.multi_token_threshold
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config("max_text_length must be greater than 0".to_string()));
        }
        if self.max_phrase_len == 0 {
            return Err(ExtractorError::Config("max_phrase_len must be greater than 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ExtractorError::Config("batch_size must be greater than 0".to_string()));
        }
        for (name, value) in [
            ("single_token_threshold", self.single_token_threshold),
            ("multi_token_threshold", self.multi_token_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ExtractorError::Config(format!(
                    "{} {} out of range [0.0, 1.0]",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration: six-token phrases, 0.15 / 0.25 thresholds
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            max_phrase_len: 6,
            single_token_threshold: 0.15,
            multi_token_threshold: 0.25,
            min_token_len: 3,
            min_single_token_len: 4,
            batch_size: 50,
            phrase_policy: PhrasePolicy::LongestFirst,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: fewer, more certain entities
    pub fn strict() -> Self {
        Self {
            single_token_threshold: 0.08,
            multi_token_threshold: 0.15,
            ..Self::default()
        }
    }

    /// Lenient preset: tolerate more typos, longer phrases
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            max_phrase_len: 8,
            single_token_threshold: 0.2,
            multi_token_threshold: 0.3,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
