pub mod base;
pub mod fallback;
pub mod huggingface;
pub mod rule_based;

pub use base::{Responder, ResponderError, ResponseMetadata};
pub use fallback::ResponderWithFallback;
pub use huggingface::HuggingFaceResponder;
pub use rule_based::RuleBasedResponder;
