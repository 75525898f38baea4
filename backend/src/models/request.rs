//! Planning request body.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::task::Task;
use crate::error::PlannerError;

/// Message returned when a request carries nothing to plan.
pub const EMPTY_REQUEST_MESSAGE: &str = "No tasks or events provided.";

/// `{ tasks: Task[], events: string[] }`. Either list may be empty, not both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "deserialize_tasks")]
    pub tasks: Vec<Task>,
    /// Opaque commitment descriptions ("Mon-Fri 8am-5pm work")
    #[serde(default, deserialize_with = "deserialize_events")]
    pub events: Vec<String>,
}

impl ScheduleRequest {
    pub fn new(tasks: Vec<Task>, events: Vec<String>) -> Self {
        Self { tasks, events }
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.tasks.is_empty() && self.events.is_empty() {
            return Err(PlannerError::InvalidInput(EMPTY_REQUEST_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Older clients post bare task names; they become text-only tasks.
///
/// Object entries go straight through `Task`'s own deserializer so field
/// diagnostics (such as an unreadable `dueDate`) reach the caller intact.
fn deserialize_tasks<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    let mut tasks = Vec::new();
    for (index, entry) in entries.unwrap_or_default().into_iter().enumerate() {
        match entry {
            Value::String(text) if text.trim().is_empty() => {}
            Value::String(text) => tasks.push(Task::new(text.trim())),
            other => {
                let task = Task::deserialize(other)
                    .map_err(|e| D::Error::custom(format!("tasks[{}]: {}", index, e)))?;
                tasks.push(task);
            }
        }
    }
    Ok(tasks)
}

fn deserialize_events<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let events: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(events
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect())
}
