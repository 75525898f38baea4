//! Calendar output types: blocks, days, tips and the response artifact.
//!
//! A [`ScheduleBlock`] serializes to the flat wire form clients render:
//! `{ "timeStart": "9:00 AM", "timeEnd": "10:00 AM", "task": "Math HW" }`,
//! where the key carrying the label (`task`, `event` or `break`) is the block's
//! [`BlockKind`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::task::Priority;

/// Label used when the model emits a block with no `task`, `event` or `break`.
pub const UNTITLED: &str = "Untitled";

/// Semantic tag of a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Task,
    Event,
    Break,
}

impl BlockKind {
    /// Precedence used when a raw block carries more than one label key.
    pub const PRECEDENCE: [BlockKind; 3] = [BlockKind::Task, BlockKind::Event, BlockKind::Break];

    /// JSON key holding the label for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            BlockKind::Task => "task",
            BlockKind::Event => "event",
            BlockKind::Break => "break",
        }
    }
}

/// An advisory tip returned by the second model round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTip {
    /// Topic key; matched against block labels
    pub related_to: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl StudyTip {
    pub fn new(
        related_to: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            related_to: related_to.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Case-insensitive exact comparison against a block label. No trimming.
    pub fn relates_to(&self, label: &str) -> bool {
        self.related_to.to_lowercase() == label.to_lowercase()
    }
}

/// A single timed or untimed activity within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub kind: BlockKind,
    /// Never empty; falls back to [`UNTITLED`]
    pub label: String,
    pub priority: Option<Priority>,
    /// Tips attached by correlation
    pub tips: Vec<StudyTip>,
}

impl ScheduleBlock {
    pub fn new(kind: BlockKind, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            time_start: None,
            time_end: None,
            kind,
            label: if label.is_empty() {
                UNTITLED.to_string()
            } else {
                label
            },
            priority: None,
            tips: Vec::new(),
        }
    }

    pub fn task(label: impl Into<String>) -> Self {
        Self::new(BlockKind::Task, label)
    }

    pub fn event(label: impl Into<String>) -> Self {
        Self::new(BlockKind::Event, label)
    }

    pub fn rest(label: impl Into<String>) -> Self {
        Self::new(BlockKind::Break, label)
    }

    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.time_start = Some(start.into());
        self.time_end = Some(end.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl Serialize for ScheduleBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(start) = &self.time_start {
            map.serialize_entry("timeStart", start)?;
        }
        if let Some(end) = &self.time_end {
            map.serialize_entry("timeEnd", end)?;
        }
        map.serialize_entry(self.kind.key(), &self.label)?;
        if let Some(priority) = &self.priority {
            map.serialize_entry("priority", priority)?;
        }
        if !self.tips.is_empty() {
            map.serialize_entry("tips", &self.tips)?;
        }
        map.end()
    }
}

/// One calendar day of the plan. Block order is rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    /// Weekday short name ("Mon") once aligned; the model's raw label before
    pub day: String,
    /// Short month/day label ("Oct 27") once aligned; the model's raw label before
    pub date: String,
    pub schedule: Vec<ScheduleBlock>,
}

impl DaySchedule {
    pub fn new(day: impl Into<String>, date: impl Into<String>, schedule: Vec<ScheduleBlock>) -> Self {
        Self {
            day: day.into(),
            date: date.into(),
            schedule,
        }
    }
}

/// The engine's output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub days: Vec<DaySchedule>,
    pub study_tips: Vec<StudyTip>,
}
