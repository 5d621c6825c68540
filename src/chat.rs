//! One chat turn: validate, analyze, pick an answer path, record the exchange.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisResult, KeywordMatcher, SubstringMatcher, SymptomAnalyzer, Urgency};
use crate::conversation::ConversationHistory;
use crate::core::config::MedicalBotConfig;
use crate::core::error::{MedicalBotError, Result};
use crate::knowledge::KnowledgeBase;
use crate::llm::{build_document_prompt, clean_response, enhance_response, Responder, ResponderFactory};
use crate::render::{render_analysis, render_disease, render_follow_ups};
use crate::utils::{safe_truncate_ellipsis, word_count};


#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Retrieval backend failed: {0}")]
    Backend(String),

    #[error("Retrieval timed out")]
    Timeout,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
            score: None,
        }
    }
}


/// Document lookup used when the knowledge base has nothing to say.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> std::result::Result<Vec<Snippet>, RetrievalError>;
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReplySource {
    DirectMatch,
    Analysis,
    Retrieval,
    Responder,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub source: ReplySource,
    pub session_id: String,
    pub symptoms: Vec<String>,
    pub conditions: Vec<String>,
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_up_questions: Vec<String>,
    #[serde(default)]
    pub fallback_used: bool,
}


/// Trims the utterance and rejects blank input.
pub fn validate_utterance(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MedicalBotError::EmptyInput);
    }
    Ok(trimmed)
}


pub struct ChatPipeline<M = SubstringMatcher> {
    analyzer: SymptomAnalyzer<M>,
    responder: Arc<dyn Responder>,
    retriever: Option<Arc<dyn Retriever>>,
    short_answer_words: usize,
}

impl ChatPipeline<SubstringMatcher> {
    /// Analyzer and responder chain as described by the config.
    pub fn from_config(config: &MedicalBotConfig, knowledge_base: Arc<KnowledgeBase>) -> Result<Self> {
        let analyzer = SymptomAnalyzer::new(knowledge_base, config.scoring.clone());
        let responder = ResponderFactory::from_config(config)?;
        Ok(Self::new(analyzer, responder).with_short_answer_words(config.short_answer_words))
    }
}

impl<M: KeywordMatcher> ChatPipeline<M> {
    pub fn new(analyzer: SymptomAnalyzer<M>, responder: Arc<dyn Responder>) -> Self {
        Self {
            analyzer,
            responder,
            retriever: None,
            short_answer_words: 20,
        }
    }

    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn with_short_answer_words(mut self, words: usize) -> Self {
        self.short_answer_words = words;
        self
    }

    pub fn analyzer(&self) -> &SymptomAnalyzer<M> {
        &self.analyzer
    }

    pub fn responder_name(&self) -> &str {
        self.responder.provider_name()
    }

    /// Answers one utterance and appends the exchange to `history`.
    pub async fn respond(&self, input: &str, history: &mut ConversationHistory) -> Result<ChatReply> {
        let utterance = validate_utterance(input)?;
        let analysis = self.analyzer.analyze(utterance);
        let mut follow_up_questions = Vec::new();
        let mut fallback_used = false;

        let (answer, source) = if let Some(hit) = self.analyzer.find_direct_match(utterance) {
            debug!("Direct match on '{}' via {}", hit.record.name, hit.rule);
            (render_disease(hit.record), ReplySource::DirectMatch)
        } else if !analysis.is_no_match() {
            let mut answer = render_analysis(&analysis, self.analyzer.config());
            follow_up_questions = self.analyzer.follow_up_questions(&analysis);
            answer.push_str(&render_follow_ups(&follow_up_questions));
            (answer, ReplySource::Analysis)
        } else {
            let (answer, source, used) = self.generate_answer(utterance).await?;
            fallback_used = used;
            let answer = if word_count(&answer) < self.short_answer_words {
                enhance_response(&answer, &analysis.context)
            } else {
                answer
            };
            (answer, source)
        };

        info!(
            session = history.session_id(),
            utterance = %safe_truncate_ellipsis(utterance, 48),
            source = %source,
            urgency = %analysis.urgency,
            "Chat turn answered"
        );

        history.push(utterance, answer.clone());
        Ok(self.reply(answer, source, history, &analysis, follow_up_questions, fallback_used))
    }

    async fn generate_answer(&self, utterance: &str) -> Result<(String, ReplySource, bool)> {
        if let Some(retriever) = &self.retriever {
            match retriever.retrieve(utterance).await {
                Ok(snippets) if !snippets.is_empty() => {
                    let context = snippets
                        .iter()
                        .map(|s| s.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\n\n");
                    let prompt = build_document_prompt(&context, utterance);

                    match self.responder.generate(&prompt).await {
                        Ok((content, metadata)) => {
                            return Ok((clean_response(&content), ReplySource::Retrieval, metadata.fallback_used));
                        }
                        Err(e) => warn!("Responder failed on retrieved context, asking directly: {}", e),
                    }
                }
                Ok(_) => debug!("Retriever returned no snippets"),
                Err(e) => warn!("Retriever failed, asking responder directly: {}", e),
            }
        }

        let (content, metadata) = self.responder.generate(utterance).await?;
        Ok((content, ReplySource::Responder, metadata.fallback_used))
    }

    fn reply(
        &self,
        answer: String,
        source: ReplySource,
        history: &ConversationHistory,
        analysis: &AnalysisResult,
        follow_up_questions: Vec<String>,
        fallback_used: bool,
    ) -> ChatReply {
        ChatReply {
            answer,
            source,
            session_id: history.session_id().to_string(),
            symptoms: analysis.context.symptoms.clone(),
            conditions: analysis.condition_names(self.analyzer.config().rendered_candidates),
            urgency: analysis.urgency,
            follow_up_questions,
            fallback_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::analysis::follow_up::GENERIC_QUESTION;
    use crate::core::config::ScoringConfig;
    use crate::knowledge::test_support::sample_knowledge_base;
    use crate::llm::providers::rule_based::CLINIC_ANSWER;
    use crate::llm::{ResponderError, ResponderWithFallback, ResponseMetadata, RuleBasedResponder};
    use crate::render::formatter::FOLLOW_UP_HEADING;

    fn analyzer() -> SymptomAnalyzer {
        SymptomAnalyzer::new(Arc::new(sample_knowledge_base()), ScoringConfig::default())
    }

    fn pipeline() -> ChatPipeline {
        ChatPipeline::new(analyzer(), Arc::new(RuleBasedResponder::new()))
    }

    #[derive(Default)]
    struct Recording {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Responder for Recording {
        async fn generate(&self, prompt: &str) -> std::result::Result<(String, ResponseMetadata), ResponderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok((
                "Rural clinic response: Boil drinking water and rest. Drink oral rehydration solution often, keep eating small meals, and visit a clinic if you cannot keep fluids down.".to_string(),
                ResponseMetadata::default(),
            ))
        }

        fn provider_name(&self) -> &str {
            "recording"
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    struct Broken;

    #[async_trait]
    impl Responder for Broken {
        async fn generate(&self, _prompt: &str) -> std::result::Result<(String, ResponseMetadata), ResponderError> {
            Err(ResponderError::Provider("503 Service Unavailable".to_string()))
        }

        fn provider_name(&self) -> &str {
            "broken"
        }

        fn model_name(&self) -> &str {
            "broken"
        }
    }

    struct FixedRetriever(Vec<Snippet>);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str) -> std::result::Result<Vec<Snippet>, RetrievalError> {
            Ok(self.0.clone())
        }
    }

    struct DownRetriever;

    #[async_trait]
    impl Retriever for DownRetriever {
        async fn retrieve(&self, _query: &str) -> std::result::Result<Vec<Snippet>, RetrievalError> {
            Err(RetrievalError::Timeout)
        }
    }

    #[test]
    fn test_validate_utterance() {
        assert_eq!(validate_utterance("  fever \n").unwrap(), "fever");
        assert!(matches!(validate_utterance(" \t "), Err(MedicalBotError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected_before_analysis() {
        let mut history = ConversationHistory::new(4);
        let result = pipeline().respond("   ", &mut history).await;
        assert!(matches!(result, Err(MedicalBotError::EmptyInput)));
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_named_disease_is_answered_from_catalog() {
        let mut history = ConversationHistory::with_session_id("s-1", 4);
        let reply = pipeline().respond("hiv", &mut history).await.unwrap();

        assert_eq!(reply.source, ReplySource::DirectMatch);
        assert!(reply.answer.starts_with("**HIV**"));
        assert!(reply.answer.contains("Antiretroviral therapy (ART)"));
        assert_eq!(reply.session_id, "s-1");
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().reply, reply.answer);
    }

    #[tokio::test]
    async fn test_named_disease_wins_over_ranked_candidates() {
        let pipeline = pipeline();
        let text = "I have malaria and a fever and headache";
        assert!(!pipeline.analyzer().analyze(text).is_no_match());

        let mut history = ConversationHistory::new(4);
        let reply = pipeline.respond(text, &mut history).await.unwrap();

        assert_eq!(reply.source, ReplySource::DirectMatch);
        assert!(reply.answer.starts_with("**MALARIA**"));
        assert!(!reply.conditions.is_empty());
        assert_eq!(reply.conditions[0], "malaria");
        assert!(reply.follow_up_questions.is_empty());
    }

    #[tokio::test]
    async fn test_listed_symptoms_match_disease_directly() {
        let mut history = ConversationHistory::new(4);
        let reply = pipeline()
            .respond("I have chills and muscle pain", &mut history)
            .await
            .unwrap();
        assert_eq!(reply.source, ReplySource::DirectMatch);
        assert!(reply.answer.starts_with("**MALARIA**"));
        assert_eq!(reply.symptoms, vec!["muscle pain"]);
    }

    #[tokio::test]
    async fn test_travel_case_is_ranked_without_follow_ups() {
        let mut history = ConversationHistory::new(4);
        let reply = pipeline()
            .respond("fever and headache after I visited Mozambique", &mut history)
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Analysis);
        assert_eq!(reply.conditions[0], "malaria");
        assert!(reply.conditions.len() <= 3);
        assert_eq!(reply.urgency, Urgency::Moderate);
        assert!(reply.follow_up_questions.is_empty());
        assert!(!reply.answer.contains(FOLLOW_UP_HEADING));
    }

    #[tokio::test]
    async fn test_low_confidence_asks_follow_ups() {
        let mut history = ConversationHistory::new(4);
        let reply = pipeline().respond("I have a cough", &mut history).await.unwrap();

        assert_eq!(reply.source, ReplySource::Analysis);
        assert_eq!(reply.conditions, vec!["tuberculosis"]);
        assert_eq!(reply.follow_up_questions, vec![GENERIC_QUESTION.to_string()]);
        assert!(reply.answer.contains(FOLLOW_UP_HEADING));
        assert!(reply.answer.contains(&format!("1. {GENERIC_QUESTION}")));
    }

    #[tokio::test]
    async fn test_chest_pain_is_urgent() {
        let mut history = ConversationHistory::new(4);
        let reply = pipeline()
            .respond("I have chest pain and a fever", &mut history)
            .await
            .unwrap();
        assert_eq!(reply.urgency, Urgency::High);
        assert!(reply.answer.contains("10177"));
    }

    #[tokio::test]
    async fn test_no_match_uses_responder_and_enhances_short_answer() {
        let mut history = ConversationHistory::new(4);
        let reply = pipeline()
            .respond("I feel generally unwell", &mut history)
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Responder);
        assert!(reply.answer.starts_with(CLINIC_ANSWER));
        assert!(reply.answer.contains("If you describe your symptoms"));
        assert!(reply.conditions.is_empty());
        assert_eq!(reply.urgency, Urgency::Low);
    }

    #[tokio::test]
    async fn test_retrieved_context_is_prompted_and_cleaned() {
        let responder = Arc::new(Recording::default());
        let pipeline = ChatPipeline::new(analyzer(), responder.clone()).with_retriever(Arc::new(
            FixedRetriever(vec![
                Snippet::new("Cholera spreads through contaminated water."),
                Snippet::new("Oral rehydration is the first step."),
            ]),
        ));

        let mut history = ConversationHistory::new(4);
        let reply = pipeline
            .respond("How do I stay safe during an outbreak?", &mut history)
            .await
            .unwrap();

        assert_eq!(reply.source, ReplySource::Retrieval);
        assert!(reply.answer.starts_with("Boil drinking water and rest."));

        let prompts = responder.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(
            "Context: Cholera spreads through contaminated water.\n\nOral rehydration is the first step."
        ));
        assert!(prompts[0].contains("Question: How do I stay safe during an outbreak?"));
    }

    #[tokio::test]
    async fn test_retriever_failure_falls_back_to_direct_question() {
        let responder = Arc::new(Recording::default());
        let pipeline =
            ChatPipeline::new(analyzer(), responder.clone()).with_retriever(Arc::new(DownRetriever));

        let mut history = ConversationHistory::new(4);
        let reply = pipeline.respond("Is it safe to swim?", &mut history).await.unwrap();

        assert_eq!(reply.source, ReplySource::Responder);
        assert_eq!(responder.prompts.lock().unwrap().as_slice(), ["Is it safe to swim?"]);
    }

    #[tokio::test]
    async fn test_failed_responder_without_fallback_is_an_error() {
        let pipeline = ChatPipeline::new(analyzer(), Arc::new(Broken));
        let mut history = ConversationHistory::new(4);
        let result = pipeline.respond("I feel generally unwell", &mut history).await;
        assert!(matches!(result, Err(MedicalBotError::Responder(_))));
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_chain_marks_reply() {
        let chain = Arc::new(ResponderWithFallback::with_rule_based(Arc::new(Broken)));
        let pipeline = ChatPipeline::new(analyzer(), chain);
        let mut history = ConversationHistory::new(4);

        let reply = pipeline.respond("I feel generally unwell", &mut history).await.unwrap();
        assert!(reply.fallback_used);
        assert!(reply.answer.starts_with(CLINIC_ANSWER));
    }

    #[tokio::test]
    async fn test_history_stays_bounded() {
        let pipeline = pipeline();
        let mut history = ConversationHistory::new(4);
        for turn in ["hiv", "malaria", "I have a cough", "rash", "I feel generally unwell"] {
            pipeline.respond(turn, &mut history).await.unwrap();
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history.iter().next().unwrap().user, "malaria");
    }

    #[test]
    fn test_from_config_builds_rule_based_pipeline() {
        let config = MedicalBotConfig {
            responder: "rule_based".to_string(),
            ..Default::default()
        };
        let pipeline = ChatPipeline::from_config(&config, Arc::new(sample_knowledge_base())).unwrap();
        assert_eq!(pipeline.responder_name(), "rule_based");

        let mut history = ConversationHistory::new(config.max_history);
        let reply = tokio_test::block_on(pipeline.respond("tuberculosis", &mut history)).unwrap();
        assert_eq!(reply.source, ReplySource::DirectMatch);
    }
}
