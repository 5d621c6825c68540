use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::knowledge::{DiseaseRecord, KnowledgeBase};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchRule {
    /// The disease name occurs verbatim.
    Name,
    /// The disease name occurs once spaces are removed from both sides.
    CompactName,
    /// Enough of the disease's listed symptoms occur verbatim.
    Symptoms,
}


#[derive(Debug, Clone, Copy)]
pub struct DirectMatch<'a> {
    pub record: &'a DiseaseRecord,
    pub rule: MatchRule,
    pub matched_symptoms: usize,
}


/// Finds a disease the user named outright, or whose symptoms they listed.
///
/// Rules are tried in order and the first hit wins. The symptom rule needs at
/// least `min_symptoms` hits and keeps the earliest disease on equal counts.
pub fn find_matching_disease<'a>(
    input: &str,
    knowledge_base: &'a KnowledgeBase,
    min_symptoms: usize,
) -> Option<DirectMatch<'a>> {
    let lower = input.to_lowercase();

    for (key, record) in knowledge_base.iter() {
        if !key.is_empty() && lower.contains(key) {
            return Some(DirectMatch {
                record,
                rule: MatchRule::Name,
                matched_symptoms: 0,
            });
        }
    }

    let compact_input = lower.replace(' ', "");
    for (key, record) in knowledge_base.iter() {
        let compact_key = key.replace(' ', "");
        if !compact_key.is_empty() && compact_input.contains(&compact_key) {
            return Some(DirectMatch {
                record,
                rule: MatchRule::CompactName,
                matched_symptoms: 0,
            });
        }
    }

    let mut best: Option<(&DiseaseRecord, usize)> = None;
    for (_, record) in knowledge_base.iter() {
        let count = record
            .symptoms
            .iter()
            .map(|symptom| symptom.to_lowercase())
            .filter(|symptom| !symptom.is_empty() && lower.contains(symptom.as_str()))
            .count();

        if count > 0 && best.is_none_or(|(_, top)| count > top) {
            best = Some((record, count));
        }
    }

    best.filter(|(_, count)| *count >= min_symptoms.max(1))
        .map(|(record, count)| DirectMatch {
            record,
            rule: MatchRule::Symptoms,
            matched_symptoms: count,
        })
}
