//! Transport errors for the generative model client.

/// Errors raised by a [`super::GenerativeModel`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Client could not be constructed from its configuration.
    #[error("model client misconfigured: {0}")]
    Config(String),

    /// Request never produced an HTTP response (DNS, connect, TLS, ...).
    #[error("model request failed: {0}")]
    Request(String),

    /// Request exceeded the configured timeout.
    #[error("model request timed out: {0}")]
    Timeout(String),

    /// Provider answered with a non-success status.
    #[error("model provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Provider answered 2xx but the body was not a usable completion.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}
