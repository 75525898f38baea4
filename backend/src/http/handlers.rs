//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! [`crate::services::SchedulePlanner`].

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::dto::{HealthResponse, ScheduleRequest, ScheduleResponse};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Liveness plus the configured model name. Does not call the model.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.planner.model_name().to_string(),
    }))
}

/// POST /api/schedule
///
/// Body `{ tasks, events }`. Answers 200 with the plan, 400 when the body is
/// unreadable or empty, 500 when the model output cannot be used.
pub async fn generate_schedule(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> HandlerResult<ScheduleResponse> {
    let Json(request) = payload?;
    let today = state.clock.today();
    let response = state.planner.plan(&request, today).await?;
    Ok(Json(response))
}
