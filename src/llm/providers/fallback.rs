use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use super::base::{ResponderError, ResponseMetadata, Responder};
use super::rule_based::RuleBasedResponder;


/// Tries the primary responder and answers from the secondary when it fails.
pub struct ResponderWithFallback {
    primary: Arc<dyn Responder>,
    fallback: Arc<dyn Responder>,
    fallback_enabled: bool,
    using_fallback: AtomicBool,
    fallback_count: AtomicUsize,
    primary_failures: AtomicUsize,
}

impl ResponderWithFallback {
    pub fn new(primary: Arc<dyn Responder>, fallback: Arc<dyn Responder>, fallback_enabled: bool) -> Self {
        info!(
            "ResponderWithFallback initialized: primary={}, fallback={}",
            primary.provider_name(),
            fallback.provider_name()
        );

        Self {
            primary,
            fallback,
            fallback_enabled,
            using_fallback: AtomicBool::new(false),
            fallback_count: AtomicUsize::new(0),
            primary_failures: AtomicUsize::new(0),
        }
    }

    /// Falls back to the canned rule-based answers.
    pub fn with_rule_based(primary: Arc<dyn Responder>) -> Self {
        Self::new(primary, Arc::new(RuleBasedResponder::new()), true)
    }

    async fn fallback_generate(
        &self,
        prompt: &str,
        original_error: &ResponderError,
    ) -> Result<(String, ResponseMetadata), ResponderError> {
        warn!(
            "Falling back to {} due to: {}",
            self.fallback.provider_name(),
            original_error
        );

        let (content, mut metadata) = self.fallback.generate(prompt).await?;

        metadata.fallback_used = true;
        metadata.original_provider = Some(self.primary.provider_name().to_string());
        metadata.original_error = Some(original_error.to_string());

        self.using_fallback.store(true, Ordering::SeqCst);
        self.fallback_count.fetch_add(1, Ordering::SeqCst);

        info!(
            "Fallback successful, total_fallbacks={}",
            self.fallback_count.load(Ordering::SeqCst)
        );

        Ok((content, metadata))
    }
}

#[async_trait]
impl Responder for ResponderWithFallback {
    async fn generate(&self, prompt: &str) -> Result<(String, ResponseMetadata), ResponderError> {
        match self.primary.generate(prompt).await {
            Ok((content, metadata)) => {
                self.using_fallback.store(false, Ordering::SeqCst);
                self.primary_failures.store(0, Ordering::SeqCst);
                Ok((content, metadata))
            }
            Err(e) => {
                self.primary_failures.fetch_add(1, Ordering::SeqCst);
                warn!(
                    "Primary responder failed ({}x): {}",
                    self.primary_failures.load(Ordering::SeqCst),
                    e
                );

                if self.fallback_enabled {
                    self.fallback_generate(prompt, &e).await
                } else {
                    Err(e)
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        if self.using_fallback.load(Ordering::SeqCst) {
            self.fallback.provider_name()
        } else {
            self.primary.provider_name()
        }
    }

    fn model_name(&self) -> &str {
        if self.using_fallback.load(Ordering::SeqCst) {
            self.fallback.model_name()
        } else {
            self.primary.model_name()
        }
    }
}
