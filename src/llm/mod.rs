pub mod factory;
pub mod prompt;
pub mod providers;

pub use factory::{ResponderFactory, ResponderKind};
pub use prompt::{build_document_prompt, clean_response, enhance_response};
pub use providers::{
    HuggingFaceResponder, Responder, ResponderError, ResponderWithFallback, ResponseMetadata,
    RuleBasedResponder,
};
