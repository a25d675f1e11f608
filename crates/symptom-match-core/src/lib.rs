//! Symptom-Match Core Library
//!
//! Deterministic weighted symptom matching against a catalog of conditions.
//!
//! # Architecture
//!
//! ```text
//! Selected symptoms → Normalization → Fingerprint ──hit──→ Cached ranking
//!                                         │
//!                                        miss
//!                                         │
//!                     ┌───────────────────▼───────────────────┐
//!                     │  for each condition in catalog order  │
//!                     │    eligibility gate (hard filter)     │
//!                     │    weighted-overlap score             │
//!                     │    keep if percentage ≥ threshold     │
//!                     └───────────────────┬───────────────────┘
//!                                         │
//!                           sort (stable) → truncate → cache
//!                                         │
//!                                         ▼
//!                          Ranked ConditionMatch records
//!                         (reporting, export, history)
//! ```
//!
//! # Core Principle
//!
//! **Scores are auditable.** Every percentage point traces back to named
//! matched and missing symptoms; there is no statistical inference.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Condition, Symptom, ConditionMatch, DiagnosisRecord)
//! - [`catalog`]: Read-only condition catalog and its JSON loader
//! - [`matcher`]: Normalizer, eligibility filter, scorer and diagnosis engine
//! - [`cache`]: Bounded result cache keyed by symptom-set fingerprints
//! - [`config`]: Engine thresholds and limits

pub mod cache;
pub mod catalog;
pub mod config;
pub mod matcher;
pub mod models;

// Re-export commonly used types
pub use cache::{fingerprint, CacheStats, ResultCache};
pub use catalog::{Catalog, CatalogError, CatalogStats, ConditionFilter};
pub use config::{ConfigError, EngineConfig};
pub use matcher::{is_eligible, normalize_symptom, score, DiagnosisEngine, SymptomSet};
pub use models::{
    Category, Condition, ConditionKind, ConditionMatch, DiagnosisRecord, Eligibility, MatchBand,
    ScoreResult, Severity, Symptom,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum CoreError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<CatalogError> for CoreError {
    fn from(e: CatalogError) -> Self {
        CoreError::CatalogError(e.to_string())
    }
}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        CoreError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Default engine configuration.
#[uniffi::export]
pub fn default_config() -> FfiEngineConfig {
    EngineConfig::default().into()
}

/// Engine configuration from the environment (and `.env`).
#[uniffi::export]
pub fn config_from_env() -> Result<FfiEngineConfig, CoreError> {
    Ok(EngineConfig::from_env()?.into())
}

/// Build an engine from a catalog document.
#[uniffi::export]
pub fn load_catalog_json(
    json: String,
    config: Option<FfiEngineConfig>,
) -> Result<Arc<DiagnosisCore>, CoreError> {
    let catalog = Catalog::from_json_str(&json)?;
    DiagnosisCore::build(catalog, config)
}

/// Build an engine from a catalog file.
#[uniffi::export]
pub fn load_catalog_file(
    path: String,
    config: Option<FfiEngineConfig>,
) -> Result<Arc<DiagnosisCore>, CoreError> {
    let catalog = Catalog::from_path(&path)?;
    DiagnosisCore::build(catalog, config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DiagnosisCore {
    engine: DiagnosisEngine,
}

impl DiagnosisCore {
    fn build(catalog: Catalog, config: Option<FfiEngineConfig>) -> Result<Arc<Self>, CoreError> {
        let config: EngineConfig = config.map(Into::into).unwrap_or_default();
        config.validate()?;
        Ok(Arc::new(Self {
            engine: DiagnosisEngine::new(Arc::new(catalog), config),
        }))
    }
}

#[uniffi::export]
impl DiagnosisCore {
    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Rank conditions using the configured threshold and cap.
    pub fn evaluate(&self, symptoms: Vec<String>) -> Vec<FfiConditionMatch> {
        self.engine
            .evaluate_default(&symptoms)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Rank conditions with an explicit threshold and cap.
    pub fn evaluate_with(
        &self,
        symptoms: Vec<String>,
        min_percentage: f64,
        max_results: u32,
    ) -> Result<Vec<FfiConditionMatch>, CoreError> {
        if !(0.0..=100.0).contains(&min_percentage) {
            return Err(CoreError::InvalidInput(format!(
                "min_percentage must be within 0-100, got {}",
                min_percentage
            )));
        }
        Ok(self
            .engine
            .evaluate(&symptoms, min_percentage, max_results as usize)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Evaluate and wrap the results in a history record (JSON).
    pub fn record_diagnosis(
        &self,
        patient_id: String,
        patient_name: String,
        symptoms: Vec<String>,
    ) -> Result<String, CoreError> {
        let results = self.engine.evaluate_default(&symptoms);
        let record = DiagnosisRecord::new(patient_id, patient_name, symptoms, results);
        Ok(record.to_json()?)
    }

    // =========================================================================
    // Cache Operations
    // =========================================================================

    pub fn clear_cache(&self) {
        self.engine.clear_cache();
    }

    pub fn cache_stats(&self) -> FfiCacheStats {
        self.engine.cache_stats().into()
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Replace the catalog from a new document. Cached results are kept.
    pub fn reload_catalog_json(&self, json: String) -> Result<(), CoreError> {
        let catalog = Catalog::from_json_str(&json)?;
        self.engine.replace_catalog(Arc::new(catalog));
        Ok(())
    }

    /// Every distinct symptom name, sorted.
    pub fn unique_symptoms(&self) -> Vec<String> {
        self.engine.catalog().unique_symptoms()
    }

    /// Symptom names containing the query, ignoring case.
    pub fn search_symptoms(&self, query: String) -> Vec<String> {
        self.engine.catalog().search_symptoms(&query)
    }

    /// Closest symptom names to a possibly misspelled query.
    pub fn suggest_symptoms(&self, query: String, limit: u32) -> Vec<String> {
        self.engine
            .catalog()
            .suggest_symptoms(&query, limit as usize)
    }

    pub fn condition_count(&self) -> u32 {
        u32::try_from(self.engine.catalog().len()).unwrap_or(u32::MAX)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe engine configuration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEngineConfig {
    pub min_percentage: f64,
    pub max_results: u32,
    pub cache_max_size: u32,
}

impl From<EngineConfig> for FfiEngineConfig {
    fn from(config: EngineConfig) -> Self {
        Self {
            min_percentage: config.min_percentage,
            max_results: u32::try_from(config.max_results).unwrap_or(u32::MAX),
            cache_max_size: u32::try_from(config.cache_max_size).unwrap_or(u32::MAX),
        }
    }
}

impl From<FfiEngineConfig> for EngineConfig {
    fn from(config: FfiEngineConfig) -> Self {
        EngineConfig {
            min_percentage: config.min_percentage,
            max_results: config.max_results as usize,
            cache_max_size: config.cache_max_size as usize,
        }
    }
}

/// FFI-safe ranked match.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConditionMatch {
    pub name: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub treatment: String,
    pub severity: String,
    pub percentage: f64,
    pub matched_symptoms: Vec<String>,
    pub missing_symptoms: Vec<String>,
    pub raw_score: f64,
    pub max_score: f64,
}

impl From<ConditionMatch> for FfiConditionMatch {
    fn from(m: ConditionMatch) -> Self {
        Self {
            name: m.name,
            kind: m.kind.label().to_string(),
            category: m.category.label().to_string(),
            description: m.description,
            treatment: m.treatment,
            severity: m.severity.label().to_string(),
            percentage: m.percentage,
            matched_symptoms: m.matched_symptoms,
            missing_symptoms: m.missing_symptoms,
            raw_score: m.raw_score,
            max_score: m.max_score,
        }
    }
}

/// FFI-safe cache statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCacheStats {
    pub count: u64,
    pub total_hits: u64,
    pub average_hits: f64,
}

impl From<CacheStats> for FfiCacheStats {
    fn from(stats: CacheStats) -> Self {
        Self {
            count: stats.count as u64,
            total_hits: stats.total_hits,
            average_hits: stats.average_hits,
        }
    }
}
