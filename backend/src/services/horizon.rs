//! Clips the aligned plan to a planning horizon.
//!
//! The horizon extends at least `floor_days` past today, and further when a
//! task is due later. The result is then capped to `max_days` entries.

use chrono::{Duration, NaiveDate};

use crate::models::Task;
use crate::services::calendar_aligner::AlignedDay;

pub const DEFAULT_FLOOR_DAYS: u32 = 4;
pub const DEFAULT_MAX_DAYS: usize = 10;

/// Horizon parameters, usually taken from `[planner]` config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonWindow {
    pub floor_days: u32,
    pub max_days: usize,
}

impl Default for HorizonWindow {
    fn default() -> Self {
        Self {
            floor_days: DEFAULT_FLOOR_DAYS,
            max_days: DEFAULT_MAX_DAYS,
        }
    }
}

impl HorizonWindow {
    pub fn new(floor_days: u32, max_days: usize) -> Self {
        Self {
            floor_days,
            max_days,
        }
    }

    pub fn cutoff(&self, tasks: &[Task], today: NaiveDate) -> NaiveDate {
        cutoff_date(tasks, today, self.floor_days)
    }

    /// Cutoff then cap, in one step.
    pub fn apply(&self, days: Vec<AlignedDay>, tasks: &[Task], today: NaiveDate) -> Vec<AlignedDay> {
        apply_window(days, self.cutoff(tasks, today), self.max_days)
    }
}

/// `max(latest due date, today + floor_days)`.
pub fn cutoff_date(tasks: &[Task], today: NaiveDate, floor_days: u32) -> NaiveDate {
    let floor = today + Duration::days(i64::from(floor_days));
    tasks
        .iter()
        .filter_map(|task| task.due_date)
        .max()
        .map_or(floor, |latest| latest.max(floor))
}

/// Keep entries dated on or before `cutoff`, then at most `max_days` of them.
/// Order is preserved.
pub fn apply_window(days: Vec<AlignedDay>, cutoff: NaiveDate, max_days: usize) -> Vec<AlignedDay> {
    days.into_iter()
        .filter(|day| day.date <= cutoff)
        .take(max_days)
        .collect()
}
