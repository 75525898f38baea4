//! Data Transfer Objects for the HTTP API.
//!
//! The planning request and response are the domain types themselves; only
//! the health payload is HTTP-specific.

use serde::{Deserialize, Serialize};

pub use crate::models::{DaySchedule, ScheduleBlock, ScheduleRequest, ScheduleResponse, StudyTip, Task};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Model identifier requests are sent to
    pub model: String,
}
