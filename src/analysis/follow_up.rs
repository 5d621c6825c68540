use std::collections::HashSet;

use lazy_static::lazy_static;

use super::models::RiskFactors;

lazy_static! {
    static ref FEVER_QUESTIONS: Vec<&'static str> = vec![
        "How high is your fever and how long have you had it?",
        "Are you experiencing chills, sweating, or shaking?",
    ];

    static ref HEADACHE_QUESTIONS: Vec<&'static str> = vec![
        "How severe is the headache on a scale of 1-10?",
        "Is the headache different from your usual headaches?",
    ];

    static ref SEXUAL_EXPOSURE_QUESTIONS: Vec<&'static str> = vec![
        "When was this exposure and have you been tested since?",
        "Are you experiencing any unusual discharge, sores, or burning sensation?",
    ];

    static ref TRAVEL_QUESTIONS: Vec<&'static str> = vec![
        "Which specific areas did you visit and when did you return?",
        "Did you take any preventive medications during travel?",
    ];
}

pub const GENERIC_QUESTION: &str =
    "Do you have any chronic medical conditions or take regular medications?";


/// Picks clarifying questions: fever, headache, sexual exposure, travel, then the generic one.
pub fn generate_follow_up_questions(
    symptoms: &[String],
    risk_factors: &RiskFactors,
    max_questions: usize,
) -> Vec<String> {
    let has = |name: &str| symptoms.iter().any(|s| s == name);

    let mut candidates: Vec<&str> = Vec::new();
    if has("fever") {
        candidates.extend(FEVER_QUESTIONS.iter());
    }
    if has("headache") {
        candidates.extend(HEADACHE_QUESTIONS.iter());
    }
    if risk_factors.sexual {
        candidates.extend(SEXUAL_EXPOSURE_QUESTIONS.iter());
    }
    if risk_factors.travel {
        candidates.extend(TRAVEL_QUESTIONS.iter());
    }
    candidates.push(GENERIC_QUESTION);

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|question| seen.insert(*question))
        .take(max_questions)
        .map(str::to_string)
        .collect()
}
