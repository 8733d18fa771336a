//! Configuration for the terminology index

use crate::error::TerminologyError;
use serde::{Deserialize, Serialize};

/// Tuning knobs for fuzzy lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Largest distance a candidate may have to be returned by `query`
    pub max_distance: f64,

    /// Largest distance for the autocomplete `search` path
    pub search_max_distance: f64,

    /// Multiplier applied to code-field distances.
    /// Values below 1.0 let a code match win over a description match of
    /// similar distance.
    pub code_field_weight: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_distance: 0.3,
            search_max_distance: 0.4,
            code_field_weight: 0.9,
        }
    }
}

impl IndexConfig {
    /// Strict preset: only near-exact candidates
    pub fn strict() -> Self {
        Self {
            max_distance: 0.2,
            search_max_distance: 0.3,
            code_field_weight: 0.9,
        }
    }

    /// Lenient preset: wider candidate lists, useful for exploration
    pub fn lenient() -> Self {
        Self {
            max_distance: 0.45,
            search_max_distance: 0.6,
            code_field_weight: 0.85,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TerminologyError> {
        for (name, value) in [
            ("max_distance", self.max_distance),
            ("search_max_distance", self.search_max_distance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TerminologyError::Config(format!(
                    "{} must be within [0.0, 1.0], got {}",
                    name, value
                )));
            }
        }
        if !(self.code_field_weight > 0.0 && self.code_field_weight <= 1.0) {
            return Err(TerminologyError::Config(format!(
                "code_field_weight must be within (0.0, 1.0], got {}",
                self.code_field_weight
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, TerminologyError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| TerminologyError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(IndexConfig::default().validate().is_ok());
        assert!(IndexConfig::strict().validate().is_ok());
        assert!(IndexConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_distance() {
        let config = IndexConfig {
            max_distance: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_code_weight_rejected() {
        let config = IndexConfig {
            code_field_weight: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_fills_defaults() {
        let config = IndexConfig::from_toml("max_distance = 0.25").unwrap();
        assert_eq!(config.max_distance, 0.25);
        assert_eq!(config.search_max_distance, 0.4);
        assert_eq!(config.code_field_weight, 0.9);
    }

    #[test]
    fn test_from_toml_without_max_distance() {
        let config = IndexConfig::from_toml("code_field_weight = 0.8").unwrap();
        assert_eq!(config.max_distance, 0.3);
        assert_eq!(config.code_field_weight, 0.8);
    }
}
