use crate::analysis::{AnalysisResult, Urgency};
use crate::core::config::ScoringConfig;
use crate::knowledge::DiseaseRecord;
use crate::utils::safe_truncate;
use crate::EMERGENCY_NUMBER;

use super::guidance::local_guidance;


pub const CLINIC_CLOSING: &str =
    "For more information or if you're experiencing these symptoms, please visit your nearest clinic.";

pub const DISCLAIMER: &str = "---\n*This is preliminary guidance only. Please see a healthcare professional for proper diagnosis and treatment.*";

pub const FOLLOW_UP_HEADING: &str = "**To better assess your condition, could you tell me:**";


/// Something the formatter knows how to turn into a chat answer.
#[derive(Debug, Clone, Copy)]
pub enum Rendered<'a> {
    Disease(&'a DiseaseRecord),
    Analysis(&'a AnalysisResult),
}


pub fn render(item: &Rendered<'_>, config: &ScoringConfig) -> String {
    match item {
        Rendered::Disease(record) => render_disease(record),
        Rendered::Analysis(analysis) => render_analysis(analysis, config),
    }
}


pub fn confidence_label(confidence: f64, config: &ScoringConfig) -> &'static str {
    if confidence > config.high_likelihood_threshold {
        "High likelihood"
    } else if confidence > config.moderate_threshold {
        "Moderate possibility"
    } else {
        "Possible"
    }
}


pub fn urgency_banner(urgency: Urgency) -> String {
    match urgency {
        Urgency::High => format!(
            "🚨 **URGENT**: These symptoms require immediate medical attention. Go to the nearest hospital or call {EMERGENCY_NUMBER}."
        ),
        Urgency::Moderate => {
            "⚠️ **IMPORTANT**: Please visit a clinic within 24 hours for proper evaluation and testing."
                .to_string()
        }
        Urgency::Low => {
            "💡 **RECOMMENDATION**: Schedule a clinic visit soon, especially if symptoms persist or worsen."
                .to_string()
        }
    }
}


/// Full write-up of a single catalog entry. Empty sections are left out.
pub fn render_disease(record: &DiseaseRecord) -> String {
    let heading = if record.name.is_empty() {
        "DISEASE".to_string()
    } else {
        record.name.to_uppercase()
    };

    let mut sections = vec![format!("**{heading}**")];

    if !record.description.is_empty() {
        sections.push(record.description.clone());
    }

    for (label, items) in [
        ("Symptoms", &record.symptoms),
        ("Treatment", &record.treatment),
        ("Prevention", &record.prevention),
        ("High-risk areas", &record.high_risk_areas),
    ] {
        if !items.is_empty() {
            sections.push(format!("**{label}:** {}", items.join(", ")));
        }
    }

    sections.push(format!("**Local guidance:** {}", local_guidance(&record.name)));

    if record.is_urgent() {
        let warning = if record.urgent_symptoms.is_empty() {
            format!("🚨 **URGENT**: Seek care immediately or call {EMERGENCY_NUMBER}.")
        } else {
            format!(
                "🚨 **URGENT**: Seek care immediately or call {EMERGENCY_NUMBER} if you notice: {}",
                record.urgent_symptoms.join(", ")
            )
        };
        sections.push(warning);
    }

    sections.push(CLINIC_CLOSING.to_string());
    sections.join("\n\n")
}


/// Ranked-candidate answer with urgency banner and disclaimer.
pub fn render_analysis(analysis: &AnalysisResult, config: &ScoringConfig) -> String {
    let mut parts: Vec<String> = Vec::new();

    let symptoms = &analysis.context.symptoms;
    if !symptoms.is_empty() {
        parts.push(format!(
            "I understand you're experiencing {}. Let me help analyze what this might indicate.\n",
            symptoms.join(", ")
        ));
    }

    if !analysis.possible_conditions.is_empty() {
        parts.push("**Based on your symptoms, here are the most likely conditions:**\n".to_string());

        let shown = analysis
            .possible_conditions
            .iter()
            .take(config.rendered_candidates);

        for (rank, condition) in shown.enumerate() {
            parts.push(format!(
                "\n**{}. {}** ({})",
                rank + 1,
                condition.disease.to_uppercase(),
                confidence_label(condition.confidence, config)
            ));

            if !condition.description.is_empty() {
                parts.push(format!(
                    "\n   {}...",
                    safe_truncate(&condition.description, config.description_preview_chars)
                ));
            }
            if !condition.matched_symptoms.is_empty() {
                parts.push(format!(
                    "\n   • Matching symptoms: {}",
                    condition.matched_symptoms.join(", ")
                ));
            }
            if !condition.matched_factors.is_empty() {
                parts.push(format!(
                    "\n   • Risk factors: {}",
                    condition.matched_factors.join(", ")
                ));
            }
            if let Some(step) = condition.treatment.first() {
                parts.push(format!("\n   • Initial step: {step}"));
            }
        }
    }

    parts.push("\n".to_string());
    parts.push(urgency_banner(analysis.urgency));
    parts.push(format!("\n\n{DISCLAIMER}"));

    parts.join("\n")
}


/// Numbered question block, or an empty string when there is nothing to ask.
pub fn render_follow_ups(questions: &[String]) -> String {
    if questions.is_empty() {
        return String::new();
    }

    let mut block = format!("\n\n{FOLLOW_UP_HEADING}\n");
    for (index, question) in questions.iter().enumerate() {
        block.push_str(&format!("{}. {}\n", index + 1, question));
    }
    block
}
