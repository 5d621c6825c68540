//! Rule-based symptom triage: keyword extraction, disease scoring, urgency and follow-ups.

pub mod analyzer;
pub mod direct_match;
pub mod extractor;
pub mod follow_up;
pub mod keywords;
pub mod matcher;
pub mod models;
pub mod scoring;
pub mod urgency;

pub use analyzer::SymptomAnalyzer;
pub use direct_match::{find_matching_disease, DirectMatch, MatchRule};
pub use extractor::{extract_context, normalize};
pub use follow_up::generate_follow_up_questions;
pub use matcher::{KeywordMatcher, SubstringMatcher};
pub use models::{Activity, AnalysisResult, CandidateCondition, RiskFactors, SymptomContext, Urgency};
pub use scoring::{confidence_for, rank_conditions, score_disease};
pub use urgency::classify_urgency;
