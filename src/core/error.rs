use thiserror::Error;

use crate::knowledge::KnowledgeBaseError;
use crate::llm::ResponderError;


#[derive(Error, Debug)]
pub enum MedicalBotError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KnowledgeBaseError),

    #[error("Responder error: {0}")]
    Responder(#[from] ResponderError),

    #[error("Empty message")]
    EmptyInput,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}


pub type Result<T> = std::result::Result<T, MedicalBotError>;
