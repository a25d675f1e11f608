//! Engine configuration.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Results scoring below this percentage are dropped.
pub const DEFAULT_MIN_PERCENTAGE: f64 = 5.0;

/// Maximum number of ranked results returned per evaluation.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Maximum number of cached evaluations.
pub const DEFAULT_CACHE_MAX_SIZE: usize = 1000;

pub const ENV_MIN_PERCENTAGE: &str = "SYMPTOM_MATCH_MIN_PERCENTAGE";
pub const ENV_MAX_RESULTS: &str = "SYMPTOM_MATCH_MAX_RESULTS";
pub const ENV_CACHE_MAX_SIZE: &str = "SYMPTOM_MATCH_CACHE_MAX_SIZE";

/// Configuration errors.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} is out of range: {value}")]
    OutOfRange { key: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Thresholds and limits used by the diagnosis engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Default threshold below which results are dropped (0-100)
    pub min_percentage: f64,
    /// Default result-count cap
    pub max_results: usize,
    /// Maximum number of entries in the result cache
    pub cache_max_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_percentage: DEFAULT_MIN_PERCENTAGE,
            max_results: DEFAULT_MAX_RESULTS,
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

impl EngineConfig {
    /// Load defaults overridden by environment variables (and `.env`, if present).
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min_percentage = match lookup(ENV_MIN_PERCENTAGE) {
            Some(value) => parse_value(ENV_MIN_PERCENTAGE, &value)?,
            None => defaults.min_percentage,
        };
        let max_results = match lookup(ENV_MAX_RESULTS) {
            Some(value) => parse_value(ENV_MAX_RESULTS, &value)?,
            None => defaults.max_results,
        };
        let cache_max_size = match lookup(ENV_CACHE_MAX_SIZE) {
            Some(value) => parse_value(ENV_CACHE_MAX_SIZE, &value)?,
            None => defaults.cache_max_size,
        };

        let config = Self {
            min_percentage,
            max_results,
            cache_max_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=100.0).contains(&self.min_percentage) {
            return Err(ConfigError::OutOfRange {
                key: ENV_MIN_PERCENTAGE,
                value: self.min_percentage.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
