//! Configuration for the engine worker
//!
//! Bundles the terminology source, index tuning and extractor tuning that a
//! worker needs to build its engine.

use crate::error::WorkerError;
use medscan_extractor::ExtractorConfig;
use medscan_terminology::IndexConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an [`EngineWorker`](crate::EngineWorker)
///
/// # Examples
///
/// ```
/// use medscan_worker::WorkerConfig;
///
/// let config = WorkerConfig::default();
/// assert!(config.terminology_path.is_none());
/// assert_eq!(config.request_buffer, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// CSV terminology file; the embedded set is used when absent or unusable
    #[serde(default)]
    pub terminology_path: Option<PathBuf>,

    /// Capacity of the request channel
    #[serde(default = "default_request_buffer")]
    pub request_buffer: usize,

    /// Index tuning
    #[serde(default)]
    pub index: IndexConfig,

    /// Extractor tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_request_buffer() -> usize {
    32
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            terminology_path: None,
            request_buffer: default_request_buffer(),
            index: IndexConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Use the CSV terminology at `path`
    pub fn with_terminology(mut self, path: impl Into<PathBuf>) -> Self {
        self.terminology_path = Some(path.into());
        self
    }

    /// Validate the configuration and its nested sections
    pub fn validate(&self) -> Result<(), WorkerError> {
        if self.request_buffer == 0 {
            return Err(WorkerError::Config("request_buffer must be greater than 0".to_string()));
        }
        self.index
            .validate()
            .map_err(|e| WorkerError::Config(e.to_string()))?;
        self.extractor
            .validate()
            .map_err(|e| WorkerError::Config(e.to_string()))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, WorkerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| WorkerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, WorkerError> {
        toml::to_string_pretty(self)
            .map_err(|e| WorkerError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
