//! Prompt assembly for the two model round trips.
//!
//! Only the *contract* matters to the rest of the crate: the schedule prompt
//! asks for `{ "days": [ { "day", "date", "schedule": [...] } ] }` and the tip
//! prompt asks for `[ { "relatedTo", "title", "content" } ]`. Everything
//! downstream tolerates the model ignoring either contract.

use chrono::NaiveDate;

use super::provider::CompletionRequest;
use crate::models::{ScheduleRequest, Task};
use crate::services::tip_correlator::StudyTopics;

pub const SCHEDULE_SYSTEM_PROMPT: &str = "You are a planning assistant that returns structured JSON \
schedules. Every activity has an explicit start time, end time and calendar date.";

pub const TIP_SYSTEM_PROMPT: &str = "You write short, practical study tips. Return exactly one JSON \
object per task you are given.";

const SCHEDULE_CONTRACT: &str = r#"Build a realistic multi-day schedule for a student, using
spaced repetition, interleaving and Pomodoro-style breaks.

Rules:
- Reply with JSON only. No markdown fences, no commentary.
- The top-level value MUST have this shape:
{
  "days": [
    {
      "day": "Monday",
      "date": "10/27",
      "schedule": [
        { "timeStart": "9:00 AM", "timeEnd": "10:00 AM", "task": "Math HW" },
        { "timeStart": "10:00 AM", "timeEnd": "10:15 AM", "break": "Short break" },
        { "timeStart": "11:00 AM", "timeEnd": "1:00 PM", "event": "Church" }
      ]
    }
  ]
}
- Every entry has "timeStart" and "timeEnd" in 12-hour format.
- Every entry has exactly one of "task", "event" or "break".
- Use each task's text verbatim as its "task" label.
- The first day is today. Days are consecutive.
- No overlapping entries. Finish tasks before their due dates.
- Schedule around the fixed events. Include meals and breaks."#;

const TIP_CONTRACT: &str = r#"Write ONE study or productivity tip for each task below.
Each tip:
- starts its title with one fitting emoji,
- is 2-3 sentences (40-60 words) of concrete, encouraging, task-specific advice.

Reply with a JSON array only:
[
  { "relatedTo": "<task name exactly as given>", "title": "<short title>", "content": "<tip>" }
]"#;

/// Builds [`CompletionRequest`]s for the planner.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    /// Operator-supplied text prepended to the schedule prompt
    preamble: Option<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preamble(mut self, preamble: Option<String>) -> Self {
        self.preamble = preamble.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    /// Prompt for the schedule generation call.
    pub fn schedule_request(&self, request: &ScheduleRequest, today: NaiveDate) -> CompletionRequest {
        let mut prompt = String::new();
        if let Some(preamble) = &self.preamble {
            prompt.push_str(preamble.trim_end());
            prompt.push_str("\n\n");
        }
        prompt.push_str(SCHEDULE_CONTRACT);
        prompt.push_str(&format!(
            "\n\nToday is {} ({}).\n\nTasks:\n",
            today.format("%A, %B %-d, %Y"),
            today.format("%-m/%-d")
        ));
        if request.tasks.is_empty() {
            prompt.push_str("None provided.\n");
        } else {
            for task in &request.tasks {
                prompt.push_str(&format_task(task));
                prompt.push('\n');
            }
        }
        prompt.push_str("\nEvents:\n");
        prompt.push_str(&format_events(&request.events));
        prompt.push('\n');

        CompletionRequest::new(SCHEDULE_SYSTEM_PROMPT, prompt)
    }

    /// Prompt for the tip generation call. One line per topic.
    pub fn tip_request(&self, topics: &StudyTopics) -> CompletionRequest {
        let mut prompt = String::from(TIP_CONTRACT);
        prompt.push_str("\n\nTasks:\n");
        prompt.push_str(&topics.as_slice().join("\n"));
        prompt.push('\n');
        CompletionRequest::new(TIP_SYSTEM_PROMPT, prompt)
    }
}

/// Render one task as labelled lines, skipping absent fields.
pub fn format_task(task: &Task) -> String {
    let mut lines = vec![format!("Task: {}", task.text)];
    if let Some(details) = task.details.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!("Notes: {}", details));
    }
    if let Some(time) = task.time.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("Time Estimate: {}", time));
    }
    if let Some(due) = task.due_date {
        lines.push(format!("Due Date: {}", due.format("%Y-%m-%d")));
    }
    if let Some(priority) = task.priority {
        lines.push(format!("Priority: {}", priority));
    }
    if task.is_splittable() {
        lines.push("This task can be split.".to_string());
    }
    lines.join("\n")
}

/// Bulleted event list, or a note that there are none.
pub fn format_events(events: &[String]) -> String {
    if events.is_empty() {
        return "No events provided.".to_string();
    }
    events
        .iter()
        .map(|e| format!("• {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
