use async_trait::async_trait;

use super::base::{ResponderError, ResponseMetadata, Responder};


const HIV_ANSWER: &str = "HIV (Human Immunodeficiency Virus) attacks the immune system. Symptoms include fever, fatigue, swollen lymph nodes, and weight loss. Free HIV testing and ART treatment are available at all South African public clinics.";

const MALARIA_ANSWER: &str = "Malaria is transmitted by mosquito bites in endemic areas. Symptoms include high fever, chills, headache, and body aches. If you've traveled to malaria areas and have fever, seek immediate medical testing.";

const TB_ANSWER: &str = "Tuberculosis (TB) affects the lungs primarily. Symptoms include persistent cough, night sweats, weight loss, and fever. TB testing and treatment are free at South African clinics.";

pub const CLINIC_ANSWER: &str =
    "I recommend visiting your nearest clinic for proper medical evaluation. For emergencies, call 10177.";


/// Offline responder with canned answers. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedResponder;

impl RuleBasedResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn answer(&self, prompt: &str) -> &'static str {
        let lower = prompt.to_lowercase();

        if lower.contains("hiv") {
            HIV_ANSWER
        } else if lower.contains("malaria") {
            MALARIA_ANSWER
        } else if lower.contains("tb") || lower.contains("tuberculosis") {
            TB_ANSWER
        } else {
            CLINIC_ANSWER
        }
    }
}

#[async_trait]
impl Responder for RuleBasedResponder {
    async fn generate(&self, prompt: &str) -> Result<(String, ResponseMetadata), ResponderError> {
        let metadata = ResponseMetadata {
            provider: self.provider_name().to_string(),
            model: self.model_name().to_string(),
            ..Default::default()
        };
        Ok((self.answer(prompt).to_string(), metadata))
    }

    fn provider_name(&self) -> &str {
        "rule_based"
    }

    fn model_name(&self) -> &str {
        "canned"
    }
}
