//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Body of every 500 answer.
pub const GENERATION_FAILED: &str = "Failed to generate schedule";

/// Body of a 400 answer for an unreadable request.
pub const INVALID_BODY: &str = "Invalid request body";

/// API error response body: `{ "error": ..., "details": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Optional diagnostic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Body was not JSON of the request shape
    MalformedBody(JsonRejection),
    /// Pipeline failure
    Planner(PlannerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::MalformedBody(rejection) => {
                let status = match rejection.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                tracing::debug!(%status, "Rejected request body: {}", rejection.body_text());
                (status, ApiError::new(INVALID_BODY).with_details(rejection.body_text()))
            }
            AppError::Planner(e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, ApiError::new(e.message()))
            }
            AppError::Planner(e) => {
                tracing::error!(code = e.code(), "Schedule generation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new(GENERATION_FAILED).with_details(e.message()),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection)
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError::Planner(err)
    }
}
