//! Generative model transport and prompt assembly.
//!
//! The planner only depends on the [`GenerativeModel`] trait. The shipped
//! implementation, [`OpenAiCompatibleClient`], talks to any OpenAI-style
//! `/chat/completions` endpoint (Groq by default).

pub mod error;
pub mod openai;
pub mod prompts;
pub mod provider;

pub use error::LlmError;
pub use openai::{OpenAiCompatibleClient, OpenAiCompatibleConfig};
pub use prompts::PromptBuilder;
pub use provider::{CompletionRequest, GenerativeModel};
