//! Weighted-overlap scoring of one condition against a query.
//!
//! Every symptom weight counts toward the maximum; the weights of symptoms
//! present in the query count toward the raw score. The percentage is the
//! ratio of the two, so each point is traceable to named matched and missing
//! symptoms.

use crate::models::{round_to, Condition, ScoreResult};

use super::SymptomSet;

/// Score a condition against a normalized query. Total over all inputs.
pub fn score<'a>(condition: &'a Condition, query: &SymptomSet) -> ScoreResult<'a> {
    let mut matched_symptoms = Vec::new();
    let mut missing_symptoms = Vec::new();
    let mut raw_score = 0.0;
    let mut max_score = 0.0;

    for symptom in condition.symptoms() {
        max_score += symptom.weight;
        if query.contains(symptom.key()) {
            raw_score += symptom.weight;
            matched_symptoms.push(symptom.name().to_string());
        } else {
            missing_symptoms.push(symptom.name().to_string());
        }
    }

    let percentage = if max_score > 0.0 {
        round_to((raw_score / max_score) * 100.0, 1)
    } else {
        0.0
    };

    ScoreResult {
        condition,
        matched_symptoms,
        missing_symptoms,
        raw_score,
        max_score,
        percentage,
    }
}
