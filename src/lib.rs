pub mod analysis;
pub mod chat;
pub mod conversation;
pub mod core;
pub mod knowledge;
pub mod llm;
pub mod render;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};

pub use analysis::{
    AnalysisResult, CandidateCondition, RiskFactors, SymptomAnalyzer, SymptomContext, Urgency,
};
pub use chat::{ChatPipeline, ChatReply, ReplySource};
pub use conversation::ConversationHistory;
pub use self::core::config::{MedicalBotConfig, ScoringConfig};
pub use self::core::error::{MedicalBotError, Result};
pub use knowledge::{DiseaseRecord, KnowledgeBase};
pub use llm::{Responder, ResponderFactory};


pub const DEFAULT_KNOWLEDGE_BASE_PATH: &str = "data/medical_disease.json";


pub const DEFAULT_HF_URL: &str = "https://api-inference.huggingface.co/models";


pub const DEFAULT_HF_MODEL: &str = "microsoft/BioGPT";


pub const DEFAULT_MAX_HISTORY: usize = 4;


pub const EMERGENCY_NUMBER: &str = "10177";
