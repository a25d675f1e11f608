//! Golden tests for the diagnosis engine.
//!
//! These tests verify ranking against known catalog/query cases.

use std::sync::Arc;

use symptom_match_core::catalog::Catalog;
use symptom_match_core::config::EngineConfig;
use symptom_match_core::matcher::DiagnosisEngine;
use symptom_match_core::models::{Condition, ConditionKind, Eligibility};

/// Test case from golden table.
struct GoldenCase {
    id: &'static str,
    query: &'static [&'static str],
    min_percentage: f64,
    max_results: usize,
    /// (condition, percentage) in expected order
    expected: &'static [(&'static str, f64)],
}

fn golden_catalog() -> Catalog {
    Catalog::new(vec![
        Condition::new("Flu", ConditionKind::Physical)
            .with_symptom("fever", 1.0)
            .with_symptom("cough", 1.0)
            .with_symptom("fatigue", 0.5),
        Condition::new("Common Cold", ConditionKind::Physical)
            .with_symptom("cough", 1.0)
            .with_symptom("sneezing", 1.0)
            .with_symptom("sore throat", 1.0)
            .with_symptom("congestion", 1.0)
            .with_symptom("fever", 1.0),
        Condition::new("Rare", ConditionKind::Physical)
            .with_symptom("a", 1.0)
            .with_eligibility(Eligibility::requiring(["b"])),
        Condition::new("Pneumonia", ConditionKind::Physical)
            .with_symptom("fever", 1.0)
            .with_symptom("cough", 1.0)
            .with_symptom("shortness of breath", 2.0)
            .with_eligibility(Eligibility::min_overlap(2)),
        Condition::new("Anxiety", ConditionKind::Psychological)
            .with_symptom("insomnia", 1.0)
            .with_symptom("fatigue", 1.0)
            .with_symptom("restlessness", 2.0),
    ])
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "flu-weighted-overlap",
            query: &["fever", "cough"],
            min_percentage: 0.0,
            max_results: 50,
            expected: &[
                ("Flu", 80.0),
                ("Pneumonia", 50.0),
                ("Common Cold", 40.0),
                ("Anxiety", 0.0),
            ],
        },
        GoldenCase {
            id: "threshold-drops-low-scores",
            query: &["fever", "cough"],
            min_percentage: 50.0,
            max_results: 50,
            expected: &[("Flu", 80.0), ("Pneumonia", 50.0)],
        },
        GoldenCase {
            id: "required-symptom-gate",
            query: &["a"],
            min_percentage: 0.0,
            max_results: 50,
            expected: &[("Flu", 0.0), ("Common Cold", 0.0), ("Anxiety", 0.0)],
        },
        GoldenCase {
            id: "required-symptom-present",
            query: &["a", "b"],
            min_percentage: 1.0,
            max_results: 50,
            expected: &[("Rare", 100.0)],
        },
        GoldenCase {
            id: "min-overlap-gate",
            query: &["fever"],
            min_percentage: 1.0,
            max_results: 50,
            expected: &[("Flu", 40.0), ("Common Cold", 20.0)],
        },
        GoldenCase {
            id: "case-and-spacing-normalized",
            query: &["  FEVER", "Shortness   of Breath", "cough "],
            min_percentage: 1.0,
            max_results: 50,
            expected: &[
                ("Pneumonia", 100.0),
                ("Flu", 80.0),
                ("Common Cold", 40.0),
            ],
        },
        GoldenCase {
            id: "truncated-to-cap",
            query: &["fever", "cough", "fatigue"],
            min_percentage: 0.0,
            max_results: 2,
            expected: &[("Flu", 100.0), ("Pneumonia", 50.0)],
        },
        GoldenCase {
            id: "psychological-condition",
            query: &["insomnia", "restlessness"],
            min_percentage: 5.0,
            max_results: 50,
            expected: &[("Anxiety", 75.0)],
        },
        GoldenCase {
            id: "unknown-symptoms-only",
            query: &["purple spots"],
            min_percentage: 5.0,
            max_results: 50,
            expected: &[],
        },
    ]
}

#[test]
fn test_golden_cases() {
    for case in get_golden_cases() {
        let engine = DiagnosisEngine::new(Arc::new(golden_catalog()), EngineConfig::default());
        let results = engine.evaluate(case.query, case.min_percentage, case.max_results);

        let actual: Vec<(&str, f64)> = results
            .iter()
            .map(|r| (r.name.as_str(), r.percentage))
            .collect();

        assert_eq!(
            actual,
            case.expected.to_vec(),
            "Case {}: ranking mismatch",
            case.id
        );
    }
}

#[test]
fn test_flu_breakdown() {
    let engine = DiagnosisEngine::new(Arc::new(golden_catalog()), EngineConfig::default());
    let results = engine.evaluate(&["fever", "cough"], 0.0, 50);

    let flu = &results[0];
    assert_eq!(flu.name, "Flu");
    assert_eq!(flu.raw_score, 2.0);
    assert_eq!(flu.max_score, 2.5);
    assert_eq!(flu.percentage, 80.0);
    assert_eq!(flu.matched_symptoms, vec!["fever", "cough"]);
    assert_eq!(flu.missing_symptoms, vec!["fatigue"]);
}

#[test]
fn test_required_symptom_excludes_perfect_match() {
    let catalog = Catalog::new(vec![Condition::new("Rare", ConditionKind::Physical)
        .with_symptom("a", 1.0)
        .with_eligibility(Eligibility::requiring(["b"]))]);
    let engine = DiagnosisEngine::new(Arc::new(catalog), EngineConfig::default());

    // 100% weighted overlap, but the gate fails
    assert!(engine.evaluate(&["a"], 0.0, 50).is_empty());
}

#[test]
fn test_threshold_keeps_only_high_score() {
    let catalog = Catalog::new(vec![
        Condition::new("High", ConditionKind::Physical)
            .with_symptom("a", 4.0)
            .with_symptom("b", 1.0),
        Condition::new("Low", ConditionKind::Physical)
            .with_symptom("a", 2.0)
            .with_symptom("c", 3.0),
    ]);
    let engine = DiagnosisEngine::new(Arc::new(catalog), EngineConfig::default());

    let results = engine.evaluate(&["a"], 50.0, 50);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "High");
    assert_eq!(results[0].percentage, 80.0);
}

#[test]
fn test_ties_keep_catalog_order() {
    let catalog = Catalog::new(vec![
        Condition::new("Zeta", ConditionKind::Physical)
            .with_symptom("fever", 1.0)
            .with_symptom("x", 1.0),
        Condition::new("Top", ConditionKind::Physical).with_symptom("fever", 1.0),
        Condition::new("Alpha", ConditionKind::Physical)
            .with_symptom("fever", 2.0)
            .with_symptom("y", 2.0),
        Condition::new("Mid", ConditionKind::Psychological)
            .with_symptom("fever", 3.0)
            .with_symptom("z", 3.0),
    ]);
    let engine = DiagnosisEngine::new(Arc::new(catalog), EngineConfig::default());

    let results = engine.evaluate(&["fever"], 0.0, 50);
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["Top", "Zeta", "Alpha", "Mid"]);
    assert!(results[1..].iter().all(|r| r.percentage == 50.0));
}

#[test]
fn test_empty_catalog() {
    let engine = DiagnosisEngine::new(Arc::new(Catalog::default()), EngineConfig::default());
    assert!(engine.evaluate(&["fever"], 0.0, 50).is_empty());
}

#[test]
fn test_zero_symptom_condition_scores_zero() {
    let catalog = Catalog::new(vec![Condition::new("Empty", ConditionKind::Physical)]);
    let engine = DiagnosisEngine::new(Arc::new(catalog), EngineConfig::default());

    let results = engine.evaluate(&["fever"], 0.0, 50);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].percentage, 0.0);
    assert_eq!(results[0].max_score, 0.0);
}

#[test]
fn test_loaded_catalog_end_to_end() {
    let json = r#"{"doencas": {
        "fisicas": [
            {"doenca": "Gripe", "descricao": "Infecção viral", "tratamento": "Repouso",
             "severidade": "baixa",
             "sintomas": [{"s": "Febre", "peso": 1.0}, {"s": "Tosse", "peso": 1.0}, {"s": "Fadiga", "peso": 0.5}]},
            {"doenca": "Dengue", "severidade": "alta",
             "sintomas": ["febre", "manchas vermelhas", "dor atrás dos olhos"],
             "condicoes": {"sintomas_obrigatorios": ["manchas vermelhas"]}}
        ],
        "mentais": [
            {"doenca": "Depressão", "sintomas": [{"s": "Fadiga", "peso": 1.0}, {"s": "Tristeza", "peso": 2.0}]}
        ]
    }}"#;
    let catalog = Catalog::from_json_str(json).unwrap();
    let engine = DiagnosisEngine::new(Arc::new(catalog), EngineConfig::default());

    let results = engine.evaluate_default(&["febre", "TOSSE", "fadiga"]);
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Gripe", "Depressão"]);
    assert_eq!(results[0].description, "Infecção viral");
    assert_eq!(results[1].percentage, 33.3);

    let json_out = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json_out["doenca"], "Gripe");
    assert_eq!(json_out["severidade"], "baixa");
    assert_eq!(json_out["tipo"], "físico");
    assert_eq!(json_out["sintomas_correspondentes"][0], "Febre");
}
