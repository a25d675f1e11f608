//! Match results produced by the scorer and returned by the engine.

use serde::{Deserialize, Serialize};

use super::condition::{Category, Condition, ConditionKind, Severity};

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Per-query scoring breakdown for one condition.
///
/// Borrows the condition it was computed for and lives only for the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult<'a> {
    pub condition: &'a Condition,
    /// Matched symptom names, in catalog order
    pub matched_symptoms: Vec<String>,
    /// Unmatched symptom names, in catalog order
    pub missing_symptoms: Vec<String>,
    /// Sum of matched weights
    pub raw_score: f64,
    /// Sum of all weights
    pub max_score: f64,
    /// 100 * raw / max rounded to one decimal, 0.0 when max is 0
    pub percentage: f64,
}

impl ScoreResult<'_> {
    /// False when a malformed weight made any figure NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.raw_score.is_finite() && self.max_score.is_finite() && self.percentage.is_finite()
    }

    /// Convert into the exported record.
    pub fn to_match(&self) -> ConditionMatch {
        let condition = self.condition;
        ConditionMatch {
            name: condition.name.clone(),
            kind: condition.kind,
            category: condition.category,
            description: condition.description.clone(),
            treatment: condition.treatment.clone(),
            severity: condition.severity,
            percentage: self.percentage,
            matched_symptoms: self.matched_symptoms.clone(),
            missing_symptoms: self.missing_symptoms.clone(),
            raw_score: round_to(self.raw_score, 2),
            max_score: round_to(self.max_score, 2),
        }
    }
}

/// A ranked match as exposed to reporting, export and history.
///
/// Field keys follow the persisted history format and must stay stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionMatch {
    #[serde(rename = "doenca")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: ConditionKind,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tratamento")]
    pub treatment: String,
    #[serde(rename = "severidade")]
    pub severity: Severity,
    #[serde(rename = "porcentagem")]
    pub percentage: f64,
    #[serde(rename = "sintomas_correspondentes")]
    pub matched_symptoms: Vec<String>,
    #[serde(rename = "sintomas_faltantes")]
    pub missing_symptoms: Vec<String>,
    #[serde(rename = "pontuacao_bruta")]
    pub raw_score: f64,
    #[serde(rename = "pontuacao_maxima")]
    pub max_score: f64,
}

/// Coarse likelihood band used when highlighting results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchBand {
    High,
    Medium,
    Low,
}

impl MatchBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            MatchBand::High
        } else if percentage >= 40.0 {
            MatchBand::Medium
        } else {
            MatchBand::Low
        }
    }
}

impl ConditionMatch {
    pub fn band(&self) -> MatchBand {
        MatchBand::from_percentage(self.percentage)
    }
}
