//! Condition catalog models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matcher::normalize_symptom;

/// Whether a condition (or one of its symptoms) is physical or psychological.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    #[serde(rename = "físico", alias = "physical")]
    Physical,
    #[serde(rename = "psicológico", alias = "psychological")]
    Psychological,
}

impl ConditionKind {
    /// Label used in catalog and history files.
    pub fn label(self) -> &'static str {
        match self {
            ConditionKind::Physical => "físico",
            ConditionKind::Psychological => "psicológico",
        }
    }

    /// Parse a catalog label, accepting the English names as well.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "físico" | "fisico" | "physical" => Some(Self::Physical),
            "psicológico" | "psicologico" | "psychological" => Some(Self::Psychological),
            _ => None,
        }
    }

    /// Category a condition of this kind belongs to unless overridden.
    pub fn default_category(self) -> Category {
        match self {
            ConditionKind::Physical => Category::Physical,
            ConditionKind::Psychological => Category::Mental,
        }
    }
}

/// Catalog section a condition was listed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "fisica", alias = "physical")]
    Physical,
    #[serde(rename = "mental")]
    Mental,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Physical => "fisica",
            Category::Mental => "mental",
        }
    }
}

/// Clinical severity of a condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[serde(rename = "baixa", alias = "low")]
    Low,
    #[default]
    #[serde(rename = "moderada", alias = "moderate")]
    Moderate,
    #[serde(rename = "alta", alias = "high")]
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "baixa",
            Severity::Moderate => "moderada",
            Severity::High => "alta",
        }
    }

    /// Parse a catalog label, accepting the English names as well.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "baixa" | "low" => Some(Self::Low),
            "moderada" | "media" | "média" | "moderate" => Some(Self::Moderate),
            "alta" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A weighted symptom attached to a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Symptom {
    /// Display name as written in the catalog (trimmed)
    name: String,
    /// Normalized join key used for matching
    key: String,
    /// Contribution to the condition's score
    pub weight: f64,
    /// Physical or psychological indicator
    pub kind: ConditionKind,
}

impl Symptom {
    /// Create a symptom; the match key is derived from `name` once, here.
    pub fn new(name: impl Into<String>, weight: f64, kind: ConditionKind) -> Self {
        let name = name.into().trim().to_string();
        let key = normalize_symptom(&name);
        Self {
            name,
            key,
            weight,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized name, the key compared against query symptoms.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Hard pre-filter rules gating whether a condition is scored at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Eligibility {
    /// Normalized symptom keys that must all be present in the query
    required_symptoms: BTreeSet<String>,
    /// Number of the condition's own symptoms that must appear (0 = no constraint)
    pub min_symptom_overlap: usize,
}

impl Eligibility {
    /// No constraint at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<I, S>(required_symptoms: I, min_symptom_overlap: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required_symptoms = required_symptoms
            .into_iter()
            .map(|s| normalize_symptom(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            required_symptoms,
            min_symptom_overlap,
        }
    }

    /// Only require the given symptoms.
    pub fn requiring<I, S>(required_symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(required_symptoms, 0)
    }

    /// Only require a minimum overlap.
    pub fn min_overlap(min_symptom_overlap: usize) -> Self {
        Self::new(std::iter::empty::<&str>(), min_symptom_overlap)
    }

    pub fn required_symptoms(&self) -> &BTreeSet<String> {
        &self.required_symptoms
    }

    /// True when neither rule constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.required_symptoms.is_empty() && self.min_symptom_overlap == 0
    }
}

/// A catalogued disease or disorder.
///
/// Every optional field is defaulted at construction so scoring never has to
/// branch on absence.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Condition name (expected unique within a catalog, not enforced)
    pub name: String,
    pub kind: ConditionKind,
    pub category: Category,
    pub description: String,
    pub treatment: String,
    pub severity: Severity,
    /// Weighted symptoms, one entry per normalized key
    symptoms: Vec<Symptom>,
    pub eligibility: Eligibility,
}

impl Condition {
    /// Create a condition with required fields; the rest get neutral defaults.
    pub fn new(name: impl Into<String>, kind: ConditionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            category: kind.default_category(),
            description: String::new(),
            treatment: String::new(),
            severity: Severity::default(),
            symptoms: Vec::new(),
            eligibility: Eligibility::none(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = treatment.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Add a symptom of the condition's own kind.
    pub fn with_symptom(mut self, name: impl Into<String>, weight: f64) -> Self {
        let kind = self.kind;
        self.push_symptom(Symptom::new(name, weight, kind));
        self
    }

    /// Add a symptom.
    ///
    /// A symptom whose key is already present replaces the earlier weight and
    /// kind but keeps the earlier position, so a name listed twice counts once
    /// toward the maximum score rather than once per listing. Empty names are
    /// ignored.
    pub fn push_symptom(&mut self, symptom: Symptom) {
        if symptom.key.is_empty() {
            return;
        }
        match self.symptoms.iter_mut().find(|s| s.key == symptom.key) {
            Some(existing) => {
                existing.weight = symptom.weight;
                existing.kind = symptom.kind;
            }
            None => self.symptoms.push(symptom),
        }
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// Normalized keys of this condition's symptoms, in catalog order.
    pub fn symptom_keys(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(Symptom::key)
    }

    /// Check if the condition lists a symptom (compared after normalization).
    pub fn has_symptom(&self, name: &str) -> bool {
        let key = normalize_symptom(name);
        self.symptoms.iter().any(|s| s.key == key)
    }

    /// Sum of all symptom weights.
    pub fn total_weight(&self) -> f64 {
        self.symptoms.iter().map(|s| s.weight).sum()
    }
}
