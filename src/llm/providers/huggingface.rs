use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::base::{ResponderError, ResponseMetadata, Responder};

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Generations(Vec<Generation>),
    Single(Generation),
    Failure { error: String },
}


/// Text generation through the hosted inference API.
pub struct HuggingFaceResponder {
    endpoint: Url,
    model: String,
    api_token: Option<String>,
    max_new_tokens: u32,
    temperature: f64,
    client: Client,
}

impl HuggingFaceResponder {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_token: Option<String>,
        max_new_tokens: u32,
        temperature: f64,
        timeout_secs: u64,
    ) -> Result<Self, ResponderError> {
        let model = model.into();
        let endpoint = model_endpoint(base_url, &model)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        info!(
            "HuggingFace responder initialized (model={}, url={}, token={})",
            model,
            endpoint,
            if api_token.is_some() { "set" } else { "none" }
        );

        Ok(Self {
            endpoint,
            model,
            api_token,
            max_new_tokens,
            temperature,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}


fn model_endpoint(base_url: &str, model: &str) -> Result<Url, ResponderError> {
    if model.trim().is_empty() {
        return Err(ResponderError::Config("model name is empty".to_string()));
    }
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), model.trim_matches('/'));
    Url::parse(&raw).map_err(|e| ResponderError::Config(format!("invalid url '{raw}': {e}")))
}


fn parse_generation(body: &str) -> Result<String, ResponderError> {
    let text = match serde_json::from_str::<GenerationResponse>(body)? {
        GenerationResponse::Generations(items) => items
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| ResponderError::Provider("no generations returned".to_string()))?,
        GenerationResponse::Single(generation) => generation.generated_text,
        GenerationResponse::Failure { error } => return Err(ResponderError::Provider(error)),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ResponderError::Provider("empty generation".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl Responder for HuggingFaceResponder {
    async fn generate(&self, prompt: &str) -> Result<(String, ResponseMetadata), ResponderError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        };

        let mut builder = self.client.post(self.endpoint.clone()).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("HuggingFace responded with {} ({} bytes)", status, body.len());

        let content = match parse_generation(&body) {
            Ok(text) if status.is_success() => text,
            Ok(_) => return Err(ResponderError::Provider(format!("HTTP {status}"))),
            Err(ResponderError::Json(_)) if !status.is_success() => {
                return Err(ResponderError::Provider(format!("HTTP {status}")));
            }
            Err(e) => return Err(e),
        };

        let metadata = ResponseMetadata {
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
            base_url: Some(self.endpoint.to_string()),
            ..Default::default()
        };

        Ok((content, metadata))
    }

    fn provider_name(&self) -> &str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_HF_MODEL, DEFAULT_HF_URL};

    #[test]
    fn test_endpoint_joins_model_path() {
        let url = model_endpoint("https://api-inference.huggingface.co/models/", "microsoft/BioGPT").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api-inference.huggingface.co/models/microsoft/BioGPT"
        );
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(matches!(
            model_endpoint("not a url", "m"),
            Err(ResponderError::Config(_))
        ));
        assert!(matches!(
            model_endpoint(DEFAULT_HF_URL, "  "),
            Err(ResponderError::Config(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerationRequest {
            inputs: "What is malaria?",
            parameters: GenerationParameters {
                max_new_tokens: 300,
                temperature: 0.7,
                return_full_text: false,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputs"], "What is malaria?");
        assert_eq!(value["parameters"]["max_new_tokens"], 300);
        assert_eq!(value["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_parse_generation_variants() {
        assert_eq!(
            parse_generation(r#"[{"generated_text": "  Drink fluids.  "}]"#).unwrap(),
            "Drink fluids."
        );
        assert_eq!(
            parse_generation(r#"{"generated_text": "Rest."}"#).unwrap(),
            "Rest."
        );
        assert!(matches!(
            parse_generation(r#"{"error": "Model is currently loading"}"#),
            Err(ResponderError::Provider(msg)) if msg.contains("loading")
        ));
        assert!(matches!(parse_generation("[]"), Err(ResponderError::Provider(_))));
        assert!(matches!(
            parse_generation(r#"[{"generated_text": "   "}]"#),
            Err(ResponderError::Provider(_))
        ));
        assert!(matches!(parse_generation("<html>"), Err(ResponderError::Json(_))));
    }

    #[test]
    fn test_new_builds_client() {
        let responder =
            HuggingFaceResponder::new(DEFAULT_HF_URL, DEFAULT_HF_MODEL, None, 300, 0.7, 5).unwrap();
        assert_eq!(responder.provider_name(), "huggingface");
        assert_eq!(responder.model_name(), DEFAULT_HF_MODEL);
        assert!(responder.endpoint().as_str().ends_with("/microsoft/BioGPT"));
    }
}
