//! Diagnosis history records.

use serde::{Deserialize, Serialize};

use super::result::ConditionMatch;

/// Maximum number of matches embedded in a history record.
pub const MAX_RECORDED_RESULTS: usize = 10;

/// Placeholder stored as the top result when nothing matched.
pub const NO_RESULT: &str = "Nenhum resultado";

/// One evaluation as recorded in a patient's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisRecord {
    /// Unique record ID
    pub id: String,
    #[serde(rename = "paciente_id")]
    pub patient_id: String,
    #[serde(rename = "paciente_nome")]
    pub patient_name: String,
    /// Symptoms as selected by the user
    #[serde(rename = "sintomas")]
    pub symptoms: Vec<String>,
    /// RFC 3339 timestamp
    #[serde(rename = "data_hora")]
    pub recorded_at: String,
    /// Leading matches, at most [`MAX_RECORDED_RESULTS`]
    #[serde(rename = "resultados")]
    pub results: Vec<ConditionMatch>,
    #[serde(rename = "top_resultado")]
    pub top_result: String,
    #[serde(rename = "top_porcentagem")]
    pub top_percentage: f64,
}

impl DiagnosisRecord {
    /// Create a record from a ranked evaluation.
    pub fn new(
        patient_id: String,
        patient_name: String,
        symptoms: Vec<String>,
        mut results: Vec<ConditionMatch>,
    ) -> Self {
        let (top_result, top_percentage) = match results.first() {
            Some(top) => (top.name.clone(), top.percentage),
            None => (NO_RESULT.to_string(), 0.0),
        };
        results.truncate(MAX_RECORDED_RESULTS);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            patient_name,
            symptoms,
            recorded_at: chrono::Utc::now().to_rfc3339(),
            results,
            top_result,
            top_percentage,
        }
    }

    /// Serialize for the history file.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
