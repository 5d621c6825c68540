use std::sync::Arc;

use tracing::debug;

use super::direct_match::{find_matching_disease, DirectMatch};
use super::extractor::{extract_context, normalize};
use super::follow_up::generate_follow_up_questions;
use super::matcher::{KeywordMatcher, SubstringMatcher};
use super::models::{AnalysisResult, RiskFactors};
use super::scoring::rank_conditions;
use super::urgency::classify_urgency;
use crate::core::config::ScoringConfig;
use crate::knowledge::KnowledgeBase;


/// Stateless triage over an injected, read-only knowledge base.
pub struct SymptomAnalyzer<M = SubstringMatcher> {
    knowledge_base: Arc<KnowledgeBase>,
    config: ScoringConfig,
    matcher: M,
}

impl SymptomAnalyzer<SubstringMatcher> {
    pub fn new(knowledge_base: Arc<KnowledgeBase>, config: ScoringConfig) -> Self {
        Self::with_matcher(knowledge_base, config, SubstringMatcher)
    }
}

impl<M: KeywordMatcher> SymptomAnalyzer<M> {
    pub fn with_matcher(knowledge_base: Arc<KnowledgeBase>, config: ScoringConfig, matcher: M) -> Self {
        Self {
            knowledge_base,
            config,
            matcher,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze(&self, utterance: &str) -> AnalysisResult {
        let normalized = normalize(utterance);
        let context = extract_context(&normalized, &self.matcher);
        let possible_conditions = rank_conditions(&self.knowledge_base, &context, &self.config);
        let urgency = classify_urgency(&normalized, &context.symptoms);
        let risk_factors = RiskFactors::from_context(&context);

        debug!(
            symptoms = ?context.symptoms,
            candidates = possible_conditions.len(),
            urgency = %urgency,
            "Symptom analysis complete"
        );

        AnalysisResult {
            context,
            possible_conditions,
            urgency,
            risk_factors,
        }
    }

    pub fn find_direct_match(&self, utterance: &str) -> Option<DirectMatch<'_>> {
        find_matching_disease(
            utterance,
            &self.knowledge_base,
            self.config.direct_match_min_symptoms,
        )
    }

    /// True when candidates exist but the best one is below the follow-up threshold.
    pub fn needs_follow_up(&self, analysis: &AnalysisResult) -> bool {
        analysis
            .top_condition()
            .is_some_and(|top| top.confidence < self.config.follow_up_threshold)
    }

    pub fn follow_up_questions(&self, analysis: &AnalysisResult) -> Vec<String> {
        if !self.needs_follow_up(analysis) {
            return Vec::new();
        }
        generate_follow_up_questions(
            &analysis.context.symptoms,
            &analysis.risk_factors,
            self.config.max_follow_ups,
        )
    }
}
