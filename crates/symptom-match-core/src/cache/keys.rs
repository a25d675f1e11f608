//! Cache keys derived from symptom sets.

use sha2::{Digest, Sha256};

use crate::matcher::SymptomSet;

/// Hash arbitrary bytes with SHA-256, returning lowercase hex.
fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Order- and duplicate-independent fingerprint of a symptom set.
pub fn fingerprint(query: &SymptomSet) -> String {
    hash_data(query.canonical().as_bytes())
}

/// Key under which an evaluation is cached.
///
/// Scoped by the threshold and cap the results were computed with, so a
/// query with a lower threshold is never answered from a stricter one.
pub fn cache_key(query: &SymptomSet, min_percentage: f64, max_results: usize) -> String {
    let scoped = format!(
        "{}|min={:?}|max={}",
        query.canonical(),
        min_percentage,
        max_results
    );
    hash_data(scoped.as_bytes())
}
