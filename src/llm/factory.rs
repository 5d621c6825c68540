use std::str::FromStr;
use std::sync::Arc;

use strum::{Display, EnumString, IntoStaticStr};
use tracing::warn;

use super::providers::base::{Responder, ResponderError};
use super::providers::fallback::ResponderWithFallback;
use super::providers::huggingface::HuggingFaceResponder;
use super::providers::rule_based::RuleBasedResponder;
use crate::core::config::MedicalBotConfig;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResponderKind {
    #[strum(to_string = "rule_based", serialize = "simple")]
    RuleBased,
    #[strum(to_string = "huggingface", serialize = "hf")]
    HuggingFace,
}


pub struct ResponderFactory;

impl ResponderFactory {
    pub fn create(kind: ResponderKind, config: &MedicalBotConfig) -> Result<Box<dyn Responder>, ResponderError> {
        match kind {
            ResponderKind::RuleBased => Ok(Box::new(RuleBasedResponder::new())),
            ResponderKind::HuggingFace => Ok(Box::new(HuggingFaceResponder::new(
                &config.hf_url,
                config.hf_model.clone(),
                config.hf_api_token.clone(),
                config.hf_max_new_tokens,
                config.temperature,
                config.timeout,
            )?)),
        }
    }

    /// Builds the responder chain named in the config.
    ///
    /// A hosted responder is wrapped with the rule-based fallback when enabled.
    /// If the hosted responder cannot be constructed the rule-based one is used alone.
    pub fn from_config(config: &MedicalBotConfig) -> Result<Arc<dyn Responder>, ResponderError> {
        let kind = ResponderKind::from_str(&config.responder).map_err(|_| {
            ResponderError::Config(format!(
                "Unknown responder: {}. Supported: rule_based, huggingface",
                config.responder
            ))
        })?;

        match (kind, Self::create(kind, config)) {
            (ResponderKind::RuleBased, Ok(responder)) => Ok(Arc::from(responder)),
            (ResponderKind::HuggingFace, Ok(responder)) if config.fallback_enabled => Ok(Arc::new(
                ResponderWithFallback::with_rule_based(Arc::from(responder)),
            )),
            (_, Ok(responder)) => Ok(Arc::from(responder)),
            (_, Err(e)) if config.fallback_enabled => {
                warn!("Could not create {} responder, using rule_based: {}", kind, e);
                Ok(Arc::new(RuleBasedResponder::new()))
            }
            (_, Err(e)) => Err(e),
        }
    }
}
