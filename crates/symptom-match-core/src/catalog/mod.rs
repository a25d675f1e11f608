//! Condition catalog.
//!
//! An ordered, read-only collection of conditions. Catalog order is the
//! tiebreak when ranking, so it is preserved exactly as built. A reload
//! builds a new `Catalog` rather than editing one in place.

mod loader;

pub use loader::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use thiserror::Error;

use crate::matcher::normalize_symptom;
use crate::models::{Category, Condition, ConditionKind, Severity};

/// Minimum Jaro-Winkler similarity for a symptom suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.80;

/// Catalog loading errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing section: {0}")]
    MissingSection(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Condition counts by kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub physical: usize,
    pub psychological: usize,
}

/// A typed predicate over condition fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionFilter {
    Kind(ConditionKind),
    Category(Category),
    Severity(Severity),
    /// Case-insensitive substring of the condition name
    NameContains(String),
    /// Condition lists this symptom (compared after normalization)
    HasSymptom(String),
}

impl ConditionFilter {
    pub fn matches(&self, condition: &Condition) -> bool {
        match self {
            ConditionFilter::Kind(kind) => condition.kind == *kind,
            ConditionFilter::Category(category) => condition.category == *category,
            ConditionFilter::Severity(severity) => condition.severity == *severity,
            ConditionFilter::NameContains(fragment) => condition
                .name
                .to_lowercase()
                .contains(&fragment.trim().to_lowercase()),
            ConditionFilter::HasSymptom(name) => condition.has_symptom(name),
        }
    }
}

/// The in-memory condition catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    conditions: Vec<Condition>,
}

impl Catalog {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Conditions in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.conditions.iter()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// First condition with this exact name.
    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name == name)
    }

    /// Conditions satisfying every filter, in catalog order.
    pub fn filter(&self, filters: &[ConditionFilter]) -> Vec<&Condition> {
        self.conditions
            .iter()
            .filter(|c| filters.iter().all(|f| f.matches(c)))
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let physical = self
            .conditions
            .iter()
            .filter(|c| c.kind == ConditionKind::Physical)
            .count();
        CatalogStats {
            total: self.conditions.len(),
            physical,
            psychological: self.conditions.len() - physical,
        }
    }

    /// Normalized key → first display name seen, sorted by key.
    fn vocabulary(&self) -> BTreeMap<&str, &str> {
        let mut vocabulary = BTreeMap::new();
        for symptom in self.conditions.iter().flat_map(|c| c.symptoms()) {
            vocabulary.entry(symptom.key()).or_insert(symptom.name());
        }
        vocabulary
    }

    /// Every distinct symptom in the catalog, sorted.
    pub fn unique_symptoms(&self) -> Vec<String> {
        self.vocabulary().into_values().map(str::to_string).collect()
    }

    /// Symptoms whose name contains the query, ignoring case. An empty query
    /// returns the whole vocabulary.
    pub fn search_symptoms(&self, query: &str) -> Vec<String> {
        let needle = normalize_symptom(query);
        self.vocabulary()
            .into_iter()
            .filter(|(key, _)| key.contains(needle.as_str()))
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Closest known symptoms to a possibly misspelled name, best first.
    pub fn suggest_symptoms(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = normalize_symptom(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .vocabulary()
            .into_iter()
            .map(|(key, name)| (jaro_winkler(&needle, key), name))
            .filter(|(similarity, _)| *similarity >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

impl From<Vec<Condition>> for Catalog {
    fn from(conditions: Vec<Condition>) -> Self {
        Self::new(conditions)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            Condition::new("Gripe", ConditionKind::Physical)
                .with_severity(Severity::Low)
                .with_symptom("Febre", 1.0)
                .with_symptom("Tosse", 1.0)
                .with_symptom("Fadiga", 0.5),
            Condition::new("Pneumonia", ConditionKind::Physical)
                .with_severity(Severity::High)
                .with_symptom("febre", 1.0)
                .with_symptom("Falta de ar", 2.0),
            Condition::new("Ansiedade", ConditionKind::Psychological)
                .with_symptom("Insônia", 1.0)
                .with_symptom("fadiga", 1.0),
        ])
    }

    #[test]
    fn test_stats() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.stats(),
            CatalogStats {
                total: 3,
                physical: 2,
                psychological: 1
            }
        );
        assert_eq!(Catalog::default().stats().total, 0);
    }

    #[test]
    fn test_unique_symptoms_sorted_and_deduped() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.unique_symptoms(),
            vec!["Fadiga", "Falta de ar", "Febre", "Insônia", "Tosse"]
        );
    }

    #[test]
    fn test_search_symptoms() {
        let catalog = sample_catalog();
        assert_eq!(catalog.search_symptoms("FA"), vec!["Fadiga", "Falta de ar"]);
        assert_eq!(catalog.search_symptoms("xyz"), Vec::<String>::new());
        assert_eq!(catalog.search_symptoms("").len(), 5);
    }

    #[test]
    fn test_suggest_symptoms() {
        let catalog = sample_catalog();
        let suggestions = catalog.suggest_symptoms("febree", 3);
        assert_eq!(suggestions.first().map(String::as_str), Some("Febre"));

        assert!(catalog.suggest_symptoms("zzzz", 3).is_empty());
        assert!(catalog.suggest_symptoms("  ", 3).is_empty());
    }

    #[test]
    fn test_filters() {
        let catalog = sample_catalog();

        let physical = catalog.filter(&[ConditionFilter::Kind(ConditionKind::Physical)]);
        assert_eq!(physical.len(), 2);

        let severe_with_fever = catalog.filter(&[
            ConditionFilter::Severity(Severity::High),
            ConditionFilter::HasSymptom("FEBRE".into()),
        ]);
        assert_eq!(severe_with_fever.len(), 1);
        assert_eq!(severe_with_fever[0].name, "Pneumonia");

        let by_name = catalog.filter(&[ConditionFilter::NameContains("gri".into())]);
        assert_eq!(by_name[0].name, "Gripe");

        let mental = catalog.filter(&[ConditionFilter::Category(Category::Mental)]);
        assert_eq!(mental[0].name, "Ansiedade");

        assert_eq!(catalog.filter(&[]).len(), 3);
    }

    #[test]
    fn test_get_and_order() {
        let catalog = sample_catalog();
        assert!(catalog.get("Pneumonia").is_some());
        assert!(catalog.get("pneumonia").is_none());

        let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gripe", "Pneumonia", "Ansiedade"]);
    }
}
