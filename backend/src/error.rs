//! Error types for the planning pipeline.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`PlannerError::code()`].

use crate::llm::LlmError;

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Request carried neither tasks nor events.
    pub const INVALID_INPUT: &str = "INVALID_INPUT";

    /// No structured literal could be located in the model output.
    pub const EXTRACTION_FAILURE: &str = "EXTRACTION_FAILURE";

    /// A literal was located but is not valid data of an accepted shape.
    pub const PARSE_FAILURE: &str = "PARSE_FAILURE";

    /// The generative model call itself failed.
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";

    /// The tip sub-call returned unusable content.
    pub const TIP_PARSE_FAILURE: &str = "TIP_PARSE_FAILURE";
}

/// Result type for pipeline stages.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors produced while turning a request into a [`crate::models::ScheduleResponse`].
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// No tasks and no events supplied.
    #[error("[{}] {}", error_codes::INVALID_INPUT, .0)]
    InvalidInput(String),

    /// No structured literal locatable in the model's raw text.
    #[error("[{}] {}", error_codes::EXTRACTION_FAILURE, .0)]
    ExtractionFailure(String),

    /// Structured literal located but not valid data.
    #[error("[{}] {}", error_codes::PARSE_FAILURE, .0)]
    ParseFailure(String),

    /// The generative model call failed (network, quota, malformed API response).
    #[error("[{}] {}", error_codes::UPSTREAM_ERROR, .0)]
    Upstream(#[from] LlmError),

    /// Tip content unusable. Absorbed by the planner, never returned to callers.
    #[error("[{}] {}", error_codes::TIP_PARSE_FAILURE, .0)]
    TipParseFailure(String),
}

impl PlannerError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => error_codes::INVALID_INPUT,
            Self::ExtractionFailure(_) => error_codes::EXTRACTION_FAILURE,
            Self::ParseFailure(_) => error_codes::PARSE_FAILURE,
            Self::Upstream(_) => error_codes::UPSTREAM_ERROR,
            Self::TipParseFailure(_) => error_codes::TIP_PARSE_FAILURE,
        }
    }

    /// Human-readable diagnostic without the code prefix.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(m)
            | Self::ExtractionFailure(m)
            | Self::ParseFailure(m)
            | Self::TipParseFailure(m) => m.clone(),
            Self::Upstream(e) => e.to_string(),
        }
    }

    /// True when the caller, not the model or transport, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
