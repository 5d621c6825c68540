pub mod config;
pub mod error;

pub use config::{MedicalBotConfig, ScoringConfig};
pub use error::{MedicalBotError, Result};
