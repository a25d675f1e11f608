//! Diagnosis engine.
//!
//! Pipeline: Normalization → Cache lookup → Eligibility → Scoring → Threshold → Rank
//!
//! Cached results are returned as stored, even after the catalog has been
//! replaced. Call [`DiagnosisEngine::clear_cache`] after a reload when fresh
//! results are required.

mod eligibility;
mod normalizer;
mod scorer;

pub use eligibility::*;
pub use normalizer::*;
pub use scorer::*;

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::cache::{cache_key, short, CacheStats, ResultCache};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::models::{ConditionMatch, ScoreResult};

/// A published catalog and its generation number.
#[derive(Debug)]
struct CatalogSlot {
    catalog: Arc<Catalog>,
    generation: u64,
}

/// Main engine that scores a catalog against symptom queries.
#[derive(Debug)]
pub struct DiagnosisEngine {
    slot: RwLock<CatalogSlot>,
    cache: ResultCache,
    config: EngineConfig,
}

impl DiagnosisEngine {
    /// Create an engine over a shared catalog.
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        info!(conditions = catalog.len(), "diagnosis engine initialized");
        Self {
            slot: RwLock::new(CatalogSlot {
                catalog,
                generation: 0,
            }),
            cache: ResultCache::new(config.cache_max_size),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Arc<Catalog> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&slot.catalog)
    }

    /// Number of catalog replacements since construction.
    pub fn generation(&self) -> u64 {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    /// Publish a new catalog. Scans already running finish on the old one.
    ///
    /// The result cache is left untouched.
    pub fn replace_catalog(&self, catalog: Arc<Catalog>) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let previous = slot.catalog.len();
        slot.catalog = catalog;
        slot.generation += 1;
        info!(
            previous,
            current = slot.catalog.len(),
            generation = slot.generation,
            "catalog replaced"
        );
    }

    /// Evaluate with the configured threshold and result cap.
    pub fn evaluate_default<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<ConditionMatch> {
        self.evaluate(symptoms, self.config.min_percentage, self.config.max_results)
    }

    /// Rank every eligible condition against a symptom query.
    ///
    /// Results are sorted by percentage, highest first; equal percentages
    /// keep catalog order. Only results at or above `min_percentage` are
    /// kept, at most `max_results` of them.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        symptoms: &[S],
        min_percentage: f64,
        max_results: usize,
    ) -> Vec<ConditionMatch> {
        if symptoms.is_empty() {
            return Vec::new();
        }

        let query = SymptomSet::from_query(symptoms);
        if query.is_empty() {
            return Vec::new();
        }

        let key = cache_key(&query, min_percentage, max_results);
        if let Some(cached) = self.cache.get(&key) {
            debug!(key = %short(&key), results = cached.len(), "cache hit");
            return cached;
        }
        debug!(key = %short(&key), symptoms = query.len(), "cache miss");

        let catalog = self.catalog();
        let results = rank(&catalog, &query, min_percentage, max_results);

        self.cache.put(key, results.clone());
        results
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Get the cache for direct access.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}

/// Filter, score, threshold, sort and truncate over a whole catalog.
///
/// A condition whose score is not finite is logged and skipped.
pub fn rank(
    catalog: &Catalog,
    query: &SymptomSet,
    min_percentage: f64,
    max_results: usize,
) -> Vec<ConditionMatch> {
    let mut kept: Vec<ScoreResult<'_>> = catalog
        .iter()
        .filter(|condition| is_eligible(condition, query))
        .filter_map(|condition| {
            let result = score(condition, query);
            if result.is_finite() {
                Some(result)
            } else {
                warn!(condition = %condition.name, "skipping condition with non-finite score");
                None
            }
        })
        .filter(|result| result.percentage >= min_percentage)
        .collect();

    // Stable sort: ties keep catalog order
    kept.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    kept.truncate(max_results);

    kept.iter().map(ScoreResult::to_match).collect()
}
