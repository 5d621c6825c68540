use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::summary::{summarize_conversation, ConversationSummary};
use crate::DEFAULT_MAX_HISTORY;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub reply: String,
    pub at: DateTime<Utc>,
}


/// Sliding window over the most recent exchanges of one session.
///
/// Owned by the caller and passed into each chat turn; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    session_id: String,
    capacity: usize,
    exchanges: VecDeque<Exchange>,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        Self::with_session_id(Uuid::new_v4().to_string(), capacity)
    }

    pub fn with_session_id(session_id: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            session_id: session_id.into(),
            capacity,
            exchanges: VecDeque::with_capacity(capacity),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an exchange, evicting the oldest once the window is full.
    pub fn push(&mut self, user: impl Into<String>, reply: impl Into<String>) {
        if self.exchanges.len() == self.capacity {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(Exchange {
            user: user.into(),
            reply: reply.into(),
            at: Utc::now(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.back()
    }

    /// User and bot turns interleaved, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.exchanges
            .iter()
            .flat_map(|exchange| [exchange.user.clone(), exchange.reply.clone()])
            .collect()
    }

    pub fn summarize(&self) -> ConversationSummary {
        summarize_conversation(&self.messages())
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_keeps_most_recent() {
        let mut history = ConversationHistory::with_session_id("clinic-7", 2);
        history.push("one", "a");
        history.push("two", "b");
        history.push("three", "c");

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages(), vec!["two", "b", "three", "c"]);
        assert_eq!(history.last().unwrap().user, "three");
        assert_eq!(history.session_id(), "clinic-7");
    }

    #[test]
    fn test_default_window_and_generated_session() {
        let first = ConversationHistory::default();
        let second = ConversationHistory::default();

        assert_eq!(first.capacity(), DEFAULT_MAX_HISTORY);
        assert!(first.is_empty());
        assert_ne!(first.session_id(), second.session_id());
        assert!(Uuid::parse_str(first.session_id()).is_ok());
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut history = ConversationHistory::new(0);
        history.push("hello", "hi");
        history.push("fever", "see a clinic");
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }

    #[test]
    fn test_summarize_uses_both_sides() {
        let mut history = ConversationHistory::new(4);
        history.push("I have a fever", "Please follow up at a clinic");
        let summary = history.summarize();
        assert_eq!(summary.total_messages, 2);
        assert_eq!(summary.symptoms_identified, vec!["fever"]);
        assert_eq!(summary.key_points, vec!["Follow-up care discussed at message 2"]);
    }

    #[test]
    fn test_clear() {
        let mut history = ConversationHistory::new(3);
        history.push("a", "b");
        history.clear();
        assert!(history.is_empty());
    }
}
