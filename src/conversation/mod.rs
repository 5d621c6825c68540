pub mod history;
pub mod summary;

pub use history::{ConversationHistory, Exchange};
pub use summary::{summarize_conversation, summarize_conversation_at, ConversationSummary};
