//! Slide outline generation through a chat-completion service.
//!
//! One request, no retries: a failed or malformed answer is replaced by a
//! fixed outline so rendering always has something to work with.

pub mod client;
pub mod fallback;
pub mod generator;
pub mod parse;
pub mod prompt;

pub use client::{CompletionRequest, CompletionService, GroqClient};
pub use fallback::fallback_outline;
pub use generator::{GenerationSettings, OutlineGenerator, OutlineOutcome};
pub use parse::{parse_outline, strip_code_fences};
