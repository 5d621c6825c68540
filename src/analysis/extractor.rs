use super::keywords::{ACTIVITY_PATTERNS, LOCATIONS, SYMPTOM_KEYWORDS};
use super::matcher::KeywordMatcher;
use super::models::SymptomContext;


pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}


/// Builds a [`SymptomContext`] from text that has already been through [`normalize`].
pub fn extract_context<M>(normalized: &str, matcher: &M) -> SymptomContext
where
    M: KeywordMatcher + ?Sized,
{
    let symptoms = SYMPTOM_KEYWORDS
        .iter()
        .filter(|(_, keywords)| matcher.matches_any(normalized, keywords))
        .map(|(symptom, _)| (*symptom).to_string())
        .collect();

    let locations = LOCATIONS
        .iter()
        .filter(|location| matcher.matches(normalized, location))
        .map(|location| (*location).to_string())
        .collect();

    let activities = ACTIVITY_PATTERNS
        .iter()
        .filter(|(_, phrases)| matcher.matches_any(normalized, phrases))
        .map(|(activity, _)| *activity)
        .collect();

    SymptomContext {
        symptoms,
        locations,
        activities,
        timeframe: None,
        severity: None,
    }
}
