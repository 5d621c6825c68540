use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Activity {
    Sexual,
    Travel,
    Food,
    Mosquito,
}


#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Moderate,
    High,
}


/// What was recognised in a single utterance. Every list keeps dictionary order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomContext {
    pub symptoms: Vec<String>,
    pub locations: Vec<String>,
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl SymptomContext {
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }

    pub fn has_activity(&self, activity: Activity) -> bool {
        self.activities.contains(&activity)
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.locations.is_empty() && self.activities.is_empty()
    }
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub travel: bool,
    pub sexual: bool,
}

impl RiskFactors {
    pub fn from_context(context: &SymptomContext) -> Self {
        Self {
            travel: context.has_activity(Activity::Travel),
            sexual: context.has_activity(Activity::Sexual),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCondition {
    pub disease: String,
    pub score: u32,
    pub confidence: f64,
    pub matched_symptoms: Vec<String>,
    pub matched_factors: Vec<String>,
    pub description: String,
    pub treatment: Vec<String>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub context: SymptomContext,
    pub possible_conditions: Vec<CandidateCondition>,
    pub urgency: Urgency,
    pub risk_factors: RiskFactors,
}

impl AnalysisResult {
    pub fn top_condition(&self) -> Option<&CandidateCondition> {
        self.possible_conditions.first()
    }

    /// No candidate scored; the caller should fall back to retrieval or generation.
    pub fn is_no_match(&self) -> bool {
        self.possible_conditions.is_empty()
    }

    pub fn condition_names(&self, limit: usize) -> Vec<String> {
        self.possible_conditions
            .iter()
            .take(limit)
            .map(|c| c.disease.clone())
            .collect()
    }
}
