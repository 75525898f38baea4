//! Public API surface for the Synapse backend.
//!
//! Consolidates the types embedders need to run the planner without the
//! HTTP layer.

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{AppConfig, ConfigError, LlmSettings, PlannerSettings, ServerSettings};
pub use crate::error::{error_codes, PlannerError, PlannerResult};
pub use crate::llm::{
    CompletionRequest, GenerativeModel, LlmError, OpenAiCompatibleClient, OpenAiCompatibleConfig,
    PromptBuilder,
};
pub use crate::models::{
    BlockKind, DaySchedule, Priority, ScheduleBlock, ScheduleRequest, ScheduleResponse, StudyTip,
    Task, TaskId,
};
pub use crate::services::{KeywordClassifier, SchedulePlanner, StudyClassifier, StudyTopics};
