use std::cmp::Ordering;

use super::models::{Activity, CandidateCondition, SymptomContext};
use crate::core::config::ScoringConfig;
use crate::knowledge::{DiseaseRecord, KnowledgeBase};


pub fn confidence_for(score: u32, divisor: f64) -> f64 {
    if score == 0 {
        return 0.0;
    }
    if divisor <= 0.0 {
        return 1.0;
    }
    (f64::from(score) / divisor).min(1.0)
}


/// Scores one disease against the context. Returns `None` when nothing matched.
pub fn score_disease(
    key: &str,
    record: &DiseaseRecord,
    context: &SymptomContext,
    config: &ScoringConfig,
) -> Option<CandidateCondition> {
    let mut score = 0u32;
    let mut matched_symptoms = Vec::new();
    let mut matched_factors = Vec::new();

    let symptom_text = record.symptom_text();
    for symptom in &context.symptoms {
        if symptom_text.contains(symptom.as_str()) {
            score = score.saturating_add(config.symptom_points);
            matched_symptoms.push(symptom.clone());
        }
    }

    if context.has_activity(Activity::Sexual) && record.transmission_text().contains("sexual") {
        score = score.saturating_add(config.sexual_points);
        matched_factors.push("sexual transmission".to_string());
    }

    if context.has_activity(Activity::Travel) {
        let high_risk_areas = record.high_risk_area_text();
        for location in &context.locations {
            if high_risk_areas.contains(location.as_str()) {
                score = score.saturating_add(config.location_points);
                matched_factors.push(format!("endemic in {location}"));
            }
        }
    }

    if score == 0 {
        return None;
    }

    Some(CandidateCondition {
        disease: key.to_string(),
        score,
        confidence: confidence_for(score, config.confidence_divisor),
        matched_symptoms,
        matched_factors,
        description: record.description.clone(),
        treatment: record.treatment.clone(),
    })
}


/// Highest confidence first; equal confidence falls back to raw score, then name.
pub fn compare_candidates(a: &CandidateCondition, b: &CandidateCondition) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.disease.cmp(&b.disease))
}


pub fn rank_conditions(
    knowledge_base: &KnowledgeBase,
    context: &SymptomContext,
    config: &ScoringConfig,
) -> Vec<CandidateCondition> {
    let mut ranked: Vec<CandidateCondition> = knowledge_base
        .iter()
        .filter_map(|(key, record)| score_disease(key, record, context, config))
        .collect();

    ranked.sort_by(compare_candidates);
    ranked.truncate(config.max_candidates);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::{extract_context, normalize};
    use crate::analysis::matcher::SubstringMatcher;
    use crate::knowledge::test_support::sample_knowledge_base;

    fn context_for(text: &str) -> SymptomContext {
        extract_context(&normalize(text), &SubstringMatcher)
    }

    fn score_of(candidates: &[CandidateCondition], disease: &str) -> u32 {
        candidates
            .iter()
            .find(|c| c.disease == disease)
            .map(|c| c.score)
            .unwrap_or(0)
    }

    #[test]
    fn test_confidence_is_clamped_linear() {
        assert_eq!(confidence_for(0, 10.0), 0.0);
        assert!((confidence_for(3, 10.0) - 0.3).abs() < 1e-9);
        assert_eq!(confidence_for(10, 10.0), 1.0);
        assert_eq!(confidence_for(17, 10.0), 1.0);
    }

    #[test]
    fn test_travel_to_endemic_area_boosts_malaria() {
        let kb = sample_knowledge_base();
        let context = context_for("fever and headache after I visited Mozambique");
        let ranked = rank_conditions(&kb, &context, &ScoringConfig::default());

        let malaria = &ranked[0];
        assert_eq!(malaria.disease, "malaria");
        assert_eq!(malaria.score, 10);
        assert_eq!(malaria.confidence, 1.0);
        assert_eq!(malaria.matched_symptoms, vec!["fever", "headache"]);
        assert_eq!(malaria.matched_factors, vec!["endemic in mozambique"]);
    }

    #[test]
    fn test_visiting_is_not_a_travel_trigger() {
        let kb = sample_knowledge_base();
        let context = context_for("fever and headache after visiting Mozambique");
        let ranked = rank_conditions(&kb, &context, &ScoringConfig::default());

        assert_eq!(ranked[0].disease, "malaria");
        assert_eq!(ranked[0].score, 6);
        assert!(ranked[0].matched_factors.is_empty());
    }

    #[test]
    fn test_location_without_travel_scores_nothing() {
        let kb = sample_knowledge_base();
        let context = context_for("I live in Mozambique");
        assert!(rank_conditions(&kb, &context, &ScoringConfig::default()).is_empty());
    }

    #[test]
    fn test_sexual_exposure_boosts_sexually_transmitted_diseases() {
        let kb = sample_knowledge_base();
        let context = context_for("I had unprotected sex and now have a rash");
        let ranked = rank_conditions(&kb, &context, &ScoringConfig::default());

        assert_eq!(ranked[0].disease, "hiv");
        assert_eq!(ranked[0].score, 8);
        assert_eq!(ranked[0].matched_factors, vec!["sexual transmission"]);
        assert_eq!(score_of(&ranked, "gonorrhea"), 5);
        assert_eq!(score_of(&ranked, "malaria"), 0);
    }

    #[test]
    fn test_equal_confidence_ties_break_by_name() {
        let kb = sample_knowledge_base();
        let context = context_for("I have a fever");
        let ranked = rank_conditions(&kb, &context, &ScoringConfig::default());

        let names: Vec<&str> = ranked.iter().map(|c| c.disease.as_str()).collect();
        assert_eq!(names, vec!["hiv", "malaria", "tuberculosis"]);
        assert!(ranked.iter().all(|c| c.score == 3));
    }

    #[test]
    fn test_ranking_and_confidence_invariants() {
        let kb = sample_knowledge_base();
        let config = ScoringConfig::default();
        let inputs = [
            "fever, rash, diarrhea and nausea after a trip to Limpopo and Mozambique",
            "had sex, tired, fever, coughing",
            "headache",
            "",
        ];

        for input in inputs {
            let ranked = rank_conditions(&kb, &context_for(input), &config);
            assert!(ranked.len() <= config.max_candidates);
            for pair in ranked.windows(2) {
                assert!(pair[0].confidence >= pair[1].confidence);
            }
            for candidate in &ranked {
                assert!(candidate.score > 0);
                assert!((0.0..=1.0).contains(&candidate.confidence));
                let expected = (f64::from(candidate.score) / 10.0).min(1.0);
                assert!((candidate.confidence - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_adding_symptom_never_lowers_score() {
        let kb = sample_knowledge_base();
        let config = ScoringConfig::default();
        let before = rank_conditions(&kb, &context_for("I have a fever"), &config);
        let after = rank_conditions(&kb, &context_for("I have a fever and a headache"), &config);

        for name in kb.names() {
            assert!(score_of(&after, name) >= score_of(&before, name));
        }
        assert!(score_of(&after, "malaria") > score_of(&before, "malaria"));
    }

    #[test]
    fn test_weights_come_from_config() {
        let kb = sample_knowledge_base();
        let config = ScoringConfig {
            symptom_points: 1,
            confidence_divisor: 2.0,
            ..Default::default()
        };
        let ranked = rank_conditions(&kb, &context_for("headache"), &config);
        assert_eq!(ranked[0].disease, "malaria");
        assert_eq!(ranked[0].score, 1);
        assert!((ranked[0].confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_optional_fields_are_total() {
        let kb = KnowledgeBase::from_records(vec![DiseaseRecord::new("Mystery")]);
        let context = context_for("fever after I visited Durban, had sex");
        assert!(rank_conditions(&kb, &context, &ScoringConfig::default()).is_empty());
    }

    #[test]
    fn test_huge_weights_saturate_instead_of_overflowing() {
        let kb = sample_knowledge_base();
        let config = ScoringConfig {
            symptom_points: u32::MAX,
            location_points: u32::MAX,
            ..Default::default()
        };
        let context = context_for("fever and headache after a trip to Mozambique");
        let ranked = rank_conditions(&kb, &context, &config);

        let malaria = ranked.iter().find(|c| c.disease == "malaria").unwrap();
        assert_eq!(malaria.score, u32::MAX);
        assert_eq!(malaria.confidence, 1.0);
    }
}
