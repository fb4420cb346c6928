pub mod responder;
pub mod transcript;

pub use responder::{respond, Assistant, ResponseRule, RESPONSE_RULES};
pub use transcript::{ChatMessage, Speaker, Transcript};
