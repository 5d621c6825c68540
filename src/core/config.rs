use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{MedicalBotError, Result};
use crate::{DEFAULT_HF_MODEL, DEFAULT_HF_URL, DEFAULT_KNOWLEDGE_BASE_PATH, DEFAULT_MAX_HISTORY};


const ENV_PREFIX: &str = "MEDICALBOT";


/// Hand-tuned weights and thresholds used by matching, ranking and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per extracted symptom found in a disease's symptom list.
    pub symptom_points: u32,
    /// Points when sexual exposure meets a sexually transmitted disease.
    pub sexual_points: u32,
    /// Points per visited location listed as a high-risk area.
    pub location_points: u32,
    /// Score at which a candidate reaches full confidence.
    pub confidence_divisor: f64,
    pub max_candidates: usize,
    pub rendered_candidates: usize,
    pub high_likelihood_threshold: f64,
    pub moderate_threshold: f64,
    /// Follow-up questions are asked only below this top confidence.
    pub follow_up_threshold: f64,
    pub max_follow_ups: usize,
    pub direct_match_min_symptoms: usize,
    pub description_preview_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            symptom_points: 3,
            sexual_points: 5,
            location_points: 4,
            confidence_divisor: 10.0,
            max_candidates: 5,
            rendered_candidates: 3,
            high_likelihood_threshold: 0.7,
            moderate_threshold: 0.4,
            follow_up_threshold: 0.8,
            max_follow_ups: 3,
            direct_match_min_symptoms: 2,
            description_preview_chars: 200,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.confidence_divisor.is_nan() || self.confidence_divisor <= 0.0 {
            return Err(MedicalBotError::InvalidConfig(format!(
                "confidence_divisor must be positive, got {}",
                self.confidence_divisor
            )));
        }

        for (name, value) in [
            ("high_likelihood_threshold", self.high_likelihood_threshold),
            ("moderate_threshold", self.moderate_threshold),
            ("follow_up_threshold", self.follow_up_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MedicalBotError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.moderate_threshold > self.high_likelihood_threshold {
            return Err(MedicalBotError::InvalidConfig(
                "moderate_threshold must not exceed high_likelihood_threshold".to_string(),
            ));
        }

        Ok(())
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalBotConfig {
    pub knowledge_base_path: PathBuf,

    pub responder: String,
    pub hf_model: String,
    pub hf_url: String,
    pub hf_api_token: Option<String>,
    pub hf_max_new_tokens: u32,
    pub temperature: f64,
    pub timeout: u64,
    pub fallback_enabled: bool,

    pub max_history: usize,
    /// Fallback answers shorter than this many words get a symptom-aware note appended.
    pub short_answer_words: usize,

    pub scoring: ScoringConfig,
}

impl Default for MedicalBotConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: PathBuf::from(DEFAULT_KNOWLEDGE_BASE_PATH),

            responder: "huggingface".to_string(),
            hf_model: DEFAULT_HF_MODEL.to_string(),
            hf_url: DEFAULT_HF_URL.to_string(),
            hf_api_token: None,
            hf_max_new_tokens: 300,
            temperature: 0.7,
            timeout: 60,
            fallback_enabled: true,

            max_history: DEFAULT_MAX_HISTORY,
            short_answer_words: 20,

            scoring: ScoringConfig::default(),
        }
    }
}

impl MedicalBotConfig {
    /// Layers an optional config file and `MEDICALBOT_*` environment variables over the defaults.
    ///
    /// Nested scoring keys use a double underscore: `MEDICALBOT_SCORING__SYMPTOM_POINTS=4`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: Self = builder.build()?.try_deserialize()?;

        if loaded.hf_api_token.is_none() {
            loaded.hf_api_token = std::env::var("HUGGINGFACE_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty());
        }

        loaded.validate()?;
        Ok(loaded)
    }


    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            return Err(MedicalBotError::InvalidConfig(
                "max_history must be at least 1".to_string(),
            ));
        }
        self.scoring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_scoring_matches_documented_weights() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.symptom_points, 3);
        assert_eq!(scoring.sexual_points, 5);
        assert_eq!(scoring.location_points, 4);
        assert_eq!(scoring.confidence_divisor, 10.0);
        assert_eq!(scoring.max_candidates, 5);
        assert_eq!(scoring.follow_up_threshold, 0.8);
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_divisor() {
        let scoring = ScoringConfig {
            confidence_divisor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            scoring.validate(),
            Err(MedicalBotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan_divisor() {
        let scoring = ScoringConfig {
            confidence_divisor: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            scoring.validate(),
            Err(MedicalBotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let scoring = ScoringConfig {
            high_likelihood_threshold: 0.3,
            moderate_threshold: 0.6,
            ..Default::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_history_window() {
        let config = MedicalBotConfig {
            max_history: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "responder = \"rule_based\"\nmax_history = 6\n\n[scoring]\nsymptom_points = 2\n"
        )
        .unwrap();

        let config = MedicalBotConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.responder, "rule_based");
        assert_eq!(config.max_history, 6);
        assert_eq!(config.scoring.symptom_points, 2);
        assert_eq!(config.scoring.sexual_points, 5);
        assert_eq!(config.hf_model, DEFAULT_HF_MODEL);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let result = MedicalBotConfig::load(Some(Path::new("/nonexistent/medicalbot.toml")));
        assert!(matches!(result, Err(MedicalBotError::Config(_))));
    }
}
