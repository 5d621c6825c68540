use super::keywords::EMERGENCY_PHRASES;
use super::models::Urgency;

const MODERATE_SYMPTOM_COUNT: usize = 3;


/// Emergency phrases win outright; otherwise three symptoms or any fever is moderate.
pub fn classify_urgency(input: &str, symptoms: &[String]) -> Urgency {
    let lower = input.to_lowercase();

    if EMERGENCY_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return Urgency::High;
    }

    if symptoms.len() >= MODERATE_SYMPTOM_COUNT || symptoms.iter().any(|s| s == "fever") {
        return Urgency::Moderate;
    }

    Urgency::Low
}
