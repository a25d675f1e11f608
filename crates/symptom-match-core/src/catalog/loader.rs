//! Build a catalog from the JSON catalog document.
//!
//! Conditions listed under `doencas.fisicas` are physical, those under
//! `doencas.mentais` psychological. Missing optional fields get their
//! defaults here so nothing downstream branches on absence. A malformed
//! entry is logged and skipped; only a document without the `doencas`
//! section fails as a whole.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::{Condition, ConditionKind, Eligibility, Severity, Symptom};

use super::{Catalog, CatalogError, CatalogResult};

/// Weight used when a symptom does not declare one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

const ROOT_SECTION: &str = "doencas";
const PHYSICAL_SECTION: &str = "fisicas";
const MENTAL_SECTION: &str = "mentais";

#[derive(Debug, Deserialize)]
struct RawCondition {
    #[serde(rename = "doenca", default)]
    name: String,
    #[serde(rename = "descricao", default)]
    description: String,
    #[serde(rename = "tratamento", default)]
    treatment: String,
    #[serde(rename = "severidade", default)]
    severity: Option<String>,
    #[serde(rename = "sintomas", default)]
    symptoms: Vec<RawSymptom>,
    #[serde(rename = "condicoes", default)]
    eligibility: RawEligibility,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSymptom {
    Named(String),
    Weighted {
        s: String,
        #[serde(default)]
        peso: Option<RawWeight>,
        #[serde(default)]
        tipo: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Number(f64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawEligibility {
    #[serde(default)]
    min_sintomas: usize,
    #[serde(default)]
    sintomas_obrigatorios: Vec<String>,
}

impl RawWeight {
    /// Parse the weight. Only finite values above zero are accepted.
    fn to_f64(&self) -> Result<f64, String> {
        let weight = match self {
            RawWeight::Number(n) => *n,
            RawWeight::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("weight '{}' is not a number", text))?,
        };
        if !weight.is_finite() || weight <= 0.0 {
            return Err(format!("weight {} must be a finite number above zero", weight));
        }
        Ok(weight)
    }
}

impl RawCondition {
    fn into_condition(self, kind: ConditionKind) -> Result<Condition, String> {
        let severity = match self.severity.as_deref() {
            None => Severity::default(),
            Some(label) => Severity::from_label(label).unwrap_or_else(|| {
                warn!(condition = %self.name, severity = label, "unknown severity, using default");
                Severity::default()
            }),
        };

        let mut condition = Condition::new(self.name, kind)
            .with_description(self.description)
            .with_treatment(self.treatment)
            .with_severity(severity)
            .with_eligibility(Eligibility::new(
                self.eligibility.sintomas_obrigatorios,
                self.eligibility.min_sintomas,
            ));

        for raw in self.symptoms {
            let symptom = match raw {
                RawSymptom::Named(name) => Symptom::new(name, DEFAULT_WEIGHT, kind),
                RawSymptom::Weighted { s, peso, tipo } => {
                    let weight = match peso {
                        Some(weight) => weight.to_f64()?,
                        None => DEFAULT_WEIGHT,
                    };
                    let symptom_kind = tipo
                        .as_deref()
                        .and_then(ConditionKind::from_label)
                        .unwrap_or(kind);
                    Symptom::new(s, weight, symptom_kind)
                }
            };
            condition.push_symptom(symptom);
        }

        Ok(condition)
    }
}

/// Parse one section's entries, skipping the ones that fail.
fn load_section(
    sections: &serde_json::Map<String, Value>,
    section: &str,
    kind: ConditionKind,
) -> Vec<Condition> {
    let entries = match sections.get(section) {
        None => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            warn!(section, "catalog section is not a list, skipping");
            return Vec::new();
        }
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let parsed = RawCondition::deserialize(entry)
                .map_err(|e| e.to_string())
                .and_then(|raw| raw.into_condition(kind));
            match parsed {
                Ok(condition) => Some(condition),
                Err(reason) => {
                    warn!(section, index, %reason, "skipping malformed condition");
                    None
                }
            }
        })
        .collect()
}

impl Catalog {
    /// Parse a catalog document.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let document: Value = serde_json::from_str(json)?;

        let sections = document
            .get(ROOT_SECTION)
            .and_then(Value::as_object)
            .ok_or_else(|| CatalogError::MissingSection(ROOT_SECTION.to_string()))?;

        let mut conditions = load_section(sections, PHYSICAL_SECTION, ConditionKind::Physical);
        let physical = conditions.len();
        conditions.extend(load_section(sections, MENTAL_SECTION, ConditionKind::Psychological));

        info!(
            physical,
            mental = conditions.len() - physical,
            "catalog loaded"
        );

        Ok(Self::new(conditions))
    }

    /// Read and parse a catalog file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
