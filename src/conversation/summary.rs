use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


const SYMPTOM_VOCABULARY: [&str; 40] = [
    "fever",
    "headache",
    "cough",
    "pain",
    "fatigue",
    "nausea",
    "vomiting",
    "diarrhea",
    "rash",
    "weakness",
    "dizziness",
    "chills",
    "sweating",
    "sore throat",
    "runny nose",
    "body ache",
    "muscle pain",
    "abdominal pain",
    "shortness of breath",
    "chest pain",
    "bleeding",
    "swelling",
    "itching",
    "redness",
    "loss of appetite",
    "weight loss",
    "night sweats",
    "confusion",
    "seizures",
    "loss of consciousness",
    "joint pain",
    "stiffness",
    "numbness",
    "tingling",
    "vision changes",
    "hearing loss",
    "ear pain",
    "toothache",
    "back pain",
    "leg pain",
];

const MEDICATIONS: [&str; 5] = ["paracetamol", "ibuprofen", "antibiotic", "aspirin", "insulin"];

const DIAGNOSTIC_TERMS: [&str; 8] = [
    "test",
    "x-ray",
    "blood test",
    "scan",
    "examination",
    "diagnosis",
    "diagnose",
    "lab results",
];

const MALARIA_RECOMMENDATION: &str = "Consider malaria testing if patient has travel history";
const TB_RECOMMENDATION: &str = "Screen for TB if cough persists over 2 weeks";
const MULTIPLE_SYMPTOMS_RECOMMENDATION: &str =
    "Multiple symptoms present - comprehensive assessment recommended";


/// Hand-off notes for a clinician reviewing a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub timestamp: DateTime<Utc>,
    pub total_messages: usize,
    /// Vocabulary order, each term once.
    pub symptoms_identified: Vec<String>,
    /// One entry per mention, message order.
    pub medications_discussed: Vec<String>,
    pub diagnostic_procedures: Vec<String>,
    pub key_points: Vec<String>,
    pub doctor_recommendations: Vec<String>,
}

impl ConversationSummary {
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms_identified.iter().any(|s| s == symptom)
    }
}


pub fn summarize_conversation(messages: &[String]) -> ConversationSummary {
    summarize_conversation_at(messages, Utc::now())
}


pub fn summarize_conversation_at(messages: &[String], at: DateTime<Utc>) -> ConversationSummary {
    let lowered: Vec<String> = messages.iter().map(|m| m.to_lowercase()).collect();

    let symptoms_identified: Vec<String> = SYMPTOM_VOCABULARY
        .iter()
        .filter(|term| lowered.iter().any(|m| m.contains(*term)))
        .map(|term| term.to_string())
        .collect();

    let mut medications_discussed = Vec::new();
    let mut diagnostic_procedures = Vec::new();
    let mut key_points = Vec::new();

    for (index, message) in lowered.iter().enumerate() {
        medications_discussed.extend(
            MEDICATIONS
                .iter()
                .filter(|med| message.contains(*med))
                .map(|med| med.to_string()),
        );
        diagnostic_procedures.extend(
            DIAGNOSTIC_TERMS
                .iter()
                .filter(|term| message.contains(*term))
                .map(|term| term.to_string()),
        );

        let position = index + 1;
        if message.contains("urgent") || message.contains("emergency") {
            key_points.push(format!("Urgent care mentioned at message {position}"));
        }
        if message.contains("follow up") || message.contains("follow-up") {
            key_points.push(format!("Follow-up care discussed at message {position}"));
        }
    }

    let mut summary = ConversationSummary {
        timestamp: at,
        total_messages: messages.len(),
        symptoms_identified,
        medications_discussed,
        diagnostic_procedures,
        key_points,
        doctor_recommendations: Vec::new(),
    };
    summary.doctor_recommendations = recommendations_for(&summary);
    summary
}


fn recommendations_for(summary: &ConversationSummary) -> Vec<String> {
    let mut recommendations = Vec::new();
    let fever = summary.has_symptom("fever");

    if fever && summary.has_symptom("headache") {
        recommendations.push(MALARIA_RECOMMENDATION.to_string());
    }
    if fever && summary.has_symptom("cough") {
        recommendations.push(TB_RECOMMENDATION.to_string());
    }
    if summary.symptoms_identified.len() >= 3 {
        recommendations.push(MULTIPLE_SYMPTOMS_RECOMMENDATION.to_string());
    }
    recommendations
}
