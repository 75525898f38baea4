//! The model seam used by the planner.

use async_trait::async_trait;

use super::error::LlmError;

/// A single-turn chat request: one system message, one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// A generative text model. Returns the raw assistant text, untouched.
///
/// Timeouts and retries belong to the implementation, never to callers.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Short identifier for logs and the health endpoint.
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
