use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::SymptomContext;
use crate::EMERGENCY_NUMBER;

lazy_static! {
    static ref BOILERPLATE: Regex = Regex::new(
        r"(?i)improve the medical response for rural south african clinics:|rural clinic response:|medical response:|i'll help you|let me help you"
    )
    .expect("boilerplate pattern is valid");

    static ref EXTRA_BLANK_LINES: Regex = Regex::new(r"\n{3,}").expect("blank line pattern is valid");
}


/// Fills the retrieval-augmented question template.
pub fn build_document_prompt(context: &str, question: &str) -> String {
    format!(
        "You are EDI, a South African medical assistant. Use the context to answer the question.\n\n\
         Context: {context}\n\n\
         Question: {question}\n\n\
         Medical Response:"
    )
}


/// Strips template echoes and stock openers from a generated answer.
pub fn clean_response(response: &str) -> String {
    let stripped = BOILERPLATE.replace_all(response, "");
    EXTRA_BLANK_LINES
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string()
}


/// Appends a note tied to what the user described, for answers too short to be useful.
pub fn enhance_response(response: &str, context: &SymptomContext) -> String {
    let mut enhanced = response.trim().to_string();
    if !enhanced.is_empty() {
        enhanced.push_str("\n\n");
    }

    if context.symptoms.is_empty() {
        enhanced.push_str(&format!(
            "If you describe your symptoms (for example fever, cough or rash), I can give more specific guidance. For emergencies, call {EMERGENCY_NUMBER}."
        ));
        return enhanced;
    }

    enhanced.push_str(&format!(
        "Based on what you described ({}), please visit your nearest clinic for a proper assessment.",
        context.symptoms.join(", ")
    ));

    if !context.locations.is_empty() {
        enhanced.push_str(&format!(
            " Tell the nurse you have been in {}.",
            context.locations.join(", ")
        ));
    }

    enhanced
}
