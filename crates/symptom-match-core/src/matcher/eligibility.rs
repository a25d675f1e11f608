//! Eligibility gate applied before scoring.

use crate::models::Condition;

use super::SymptomSet;

/// Decide whether a condition is considered at all for a query.
///
/// Required symptoms must all be present, and at least `min_symptom_overlap`
/// of the condition's own symptoms must appear. A condition failing either
/// rule is excluded whatever its score would have been.
pub fn is_eligible(condition: &Condition, query: &SymptomSet) -> bool {
    let rules = &condition.eligibility;

    if !rules
        .required_symptoms()
        .iter()
        .all(|required| query.contains(required))
    {
        return false;
    }

    if rules.min_symptom_overlap > 0 {
        let overlap = condition
            .symptom_keys()
            .filter(|key| query.contains(key))
            .count();
        if overlap < rules.min_symptom_overlap {
            return false;
        }
    }

    true
}
