//! Coerces the parsed model payload into canonical day entries.
//!
//! Two input shapes are accepted:
//!
//! - canonical: `{ "days": [ { "day", "date", "schedule": [...] } ] }`
//! - flat mapping: `{ "Monday": [...], "Tuesday": [...] }`, keys become day
//!   labels in the order written, with an empty date label
//!
//! Anything else is a [`PlannerError::ParseFailure`]. Output serialized back to
//! JSON normalizes to itself.

use serde_json::{Map, Value};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BlockKind, DaySchedule, Priority, ScheduleBlock, UNTITLED};

/// Normalize a parsed payload into day entries (labels still as the model wrote them).
pub fn normalize(value: &Value) -> PlannerResult<Vec<DaySchedule>> {
    let map = value.as_object().ok_or_else(|| {
        PlannerError::ParseFailure(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(value)
        ))
    })?;

    match map.get("days") {
        Some(Value::Array(days)) => days
            .iter()
            .enumerate()
            .map(|(index, entry)| day_from_entry(index, entry))
            .collect(),
        _ => days_from_flat_mapping(map),
    }
}

fn day_from_entry(index: usize, entry: &Value) -> PlannerResult<DaySchedule> {
    let obj = entry.as_object().ok_or_else(|| {
        PlannerError::ParseFailure(format!(
            "days[{}] should be an object, found {}",
            index,
            json_kind(entry)
        ))
    })?;

    let schedule = match obj.get("schedule") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(blocks)) => blocks_from_array(blocks, &format!("days[{}]", index))?,
        Some(other) => {
            return Err(PlannerError::ParseFailure(format!(
                "days[{}].schedule should be an array, found {}",
                index,
                json_kind(other)
            )))
        }
    };

    Ok(DaySchedule {
        day: string_field(obj, "day").unwrap_or_default().to_string(),
        date: string_field(obj, "date").unwrap_or_default().to_string(),
        schedule,
    })
}

fn days_from_flat_mapping(map: &Map<String, Value>) -> PlannerResult<Vec<DaySchedule>> {
    map.iter()
        .map(|(label, value)| match value {
            Value::Array(blocks) => Ok(DaySchedule {
                day: label.clone(),
                date: String::new(),
                schedule: blocks_from_array(blocks, label)?,
            }),
            other => Err(PlannerError::ParseFailure(format!(
                "unrecognized schedule shape: key '{}' holds {}, expected a 'days' array or a day-to-blocks mapping",
                label,
                json_kind(other)
            ))),
        })
        .collect()
}

fn blocks_from_array(blocks: &[Value], context: &str) -> PlannerResult<Vec<ScheduleBlock>> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            block_from_value(block).ok_or_else(|| {
                PlannerError::ParseFailure(format!(
                    "{} block {} should be an object, found {}",
                    context,
                    index,
                    json_kind(block)
                ))
            })
        })
        .collect()
}

/// Build a block from one raw entry. `None` when the entry is not an object.
pub fn block_from_value(value: &Value) -> Option<ScheduleBlock> {
    let obj = value.as_object()?;

    let (kind, label) = BlockKind::PRECEDENCE
        .iter()
        .find_map(|kind| {
            string_field(obj, kind.key())
                .filter(|label| !label.is_empty())
                .map(|label| (*kind, label.to_string()))
        })
        .unwrap_or((BlockKind::Task, UNTITLED.to_string()));

    Some(ScheduleBlock {
        time_start: string_field(obj, "timeStart").map(str::to_string),
        time_end: string_field(obj, "timeEnd").map(str::to_string),
        kind,
        label,
        priority: string_field(obj, "priority").and_then(|p| p.parse::<Priority>().ok()),
        tips: Vec::new(),
    })
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
