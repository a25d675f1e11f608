//! Bounded cache of ranked evaluation results.
//!
//! Entries are keyed by a symptom-set fingerprint. When full, the entry with
//! the lowest hit count is evicted, earliest insertion first among ties. This
//! is hit-count eviction, not recency-based LRU. There is no expiry.

mod keys;

pub use keys::*;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{round_to, ConditionMatch};

/// A cached evaluation. Never leaves the cache.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<ConditionMatch>,
    created_at: DateTime<Utc>,
    hit_count: u64,
    /// Insertion order, for deterministic tie-breaking on eviction
    seq: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    next_seq: u64,
}

/// Cache statistics snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CacheStats {
    /// Number of entries
    pub count: usize,
    /// Sum of hit counts over all entries
    pub total_hits: u64,
    /// Mean hit count, rounded to two decimals (0 when empty)
    pub average_hits: f64,
}

/// Thread-safe result cache.
///
/// Every operation holds the single internal lock for its full duration.
#[derive(Debug)]
pub struct ResultCache {
    max_size: usize,
    state: Mutex<CacheState>,
}

impl ResultCache {
    /// Create a cache holding at most `max_size` entries. Zero disables caching.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            state: Mutex::new(CacheState::default()),
        }
    }

    // Mutations complete under the guard; a poisoned state is still consistent.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a key, counting a hit when present.
    pub fn get(&self, key: &str) -> Option<Vec<ConditionMatch>> {
        let mut state = self.lock();
        let entry = state.entries.get_mut(key)?;
        entry.hit_count += 1;
        Some(entry.value.clone())
    }

    /// Store a result, evicting the least-hit entry if the cache is full.
    ///
    /// New entries start with a hit count of 1. Replacing an existing key
    /// resets its entry without evicting anything else.
    pub fn put(&self, key: String, value: Vec<ConditionMatch>) {
        if self.max_size == 0 {
            return;
        }

        let mut state = self.lock();
        let seq = state.next_seq;
        state.next_seq += 1;

        if !state.entries.contains_key(&key) && state.entries.len() >= self.max_size {
            let victim = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.hit_count, entry.seq))
                .map(|(k, entry)| (k.clone(), entry.hit_count, entry.created_at));

            if let Some((victim, hits, created_at)) = victim {
                state.entries.remove(&victim);
                let age_secs = (Utc::now() - created_at).num_seconds();
                debug!(key = %short(&victim), hits, age_secs, "evicted cache entry");
            }
        }

        state.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Utc::now(),
                hit_count: 1,
                seq,
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        info!(dropped, "result cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let count = state.entries.len();
        let total_hits: u64 = state.entries.values().map(|e| e.hit_count).sum();
        let average_hits = if count > 0 {
            round_to(total_hits as f64 / count as f64, 2)
        } else {
            0.0
        };

        CacheStats {
            count,
            total_hits,
            average_hits,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Check for a key without counting a hit.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

/// Leading characters of a key, for log fields.
pub(crate) fn short(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}
