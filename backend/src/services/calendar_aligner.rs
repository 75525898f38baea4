//! Anchors normalized day entries to real calendar dates.
//!
//! The model's `day` / `date` labels are advisory and often inconsistent (a
//! weekday that does not match its date, a duplicated day, "Day 1"). Alignment
//! picks one entry as "today" and derives every other date by fixed offset:
//!
//! 1. the first entry whose explicit date equals today, else
//! 2. the first entry whose weekday equals today's weekday, else
//! 3. entry 0.
//!
//! Entry `i` then gets `today - offset + i` days, so the output is always a
//! contiguous, strictly increasing run of dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::DaySchedule;

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2}|\d{4}))?\b").expect("numeric date pattern is valid")
});

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal pattern is valid"));

/// Formats tried once weekday and ordinals are stripped. `%B` also accepts "Oct".
const PHRASE_FORMATS: [&str; 3] = ["%B %d %Y", "%d %B %Y", "%Y %B %d"];

/// A day entry with its resolved calendar date and rendered labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedDay {
    pub date: NaiveDate,
    pub schedule: DaySchedule,
}

impl AlignedDay {
    pub fn into_schedule(self) -> DaySchedule {
        self.schedule
    }
}

/// Per-entry label resolution (steps 1 and 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedLabels {
    pub date: Option<NaiveDate>,
    pub weekday: Option<Weekday>,
}

impl ResolvedLabels {
    pub fn resolve(day: &DaySchedule, year: i32) -> Self {
        Self {
            date: parse_explicit_date(&day.date, year),
            weekday: parse_weekday(&day.day),
        }
    }
}

/// Assign every entry a date anchored to `today`, rewriting `day` / `date` labels.
pub fn align(days: Vec<DaySchedule>, today: NaiveDate) -> Vec<AlignedDay> {
    let offset = match_offset(&days, today);
    let base = today - Duration::days(offset as i64);

    days.into_iter()
        .enumerate()
        .map(|(index, mut schedule)| {
            let date = base + Duration::days(index as i64);
            schedule.day = weekday_label(date);
            schedule.date = date_label(date);
            AlignedDay { date, schedule }
        })
        .collect()
}

/// Index of the entry judged to be today.
pub fn match_offset(days: &[DaySchedule], today: NaiveDate) -> usize {
    let resolved: Vec<ResolvedLabels> = days
        .iter()
        .map(|day| ResolvedLabels::resolve(day, today.year()))
        .collect();

    resolved
        .iter()
        .position(|labels| labels.date == Some(today))
        .or_else(|| {
            resolved
                .iter()
                .position(|labels| labels.weekday == Some(today.weekday()))
        })
        .unwrap_or(0)
}

/// Parse an explicit date label. `year` fills in when the label has none.
///
/// Accepts `month/day[/year]`, ISO `YYYY-MM-DD`, and phrases such as
/// `"Monday, Oct 27"` or `"October 27th, 2025"`.
pub fn parse_explicit_date(label: &str, year: i32) -> Option<NaiveDate> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = NUMERIC_DATE.captures(trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = match caps.get(3) {
            Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
            Some(y) => y.as_str().parse().ok()?,
            None => year,
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    parse_date_phrase(trimmed, year)
}

fn parse_date_phrase(label: &str, year: i32) -> Option<NaiveDate> {
    let cleaned = ORDINAL_SUFFIX.replace_all(label, "$1").replace([',', '.'], " ");
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();

    if tokens
        .first()
        .is_some_and(|t| t.chars().all(char::is_alphabetic) && parse_weekday(t).is_some())
    {
        tokens.remove(0);
    }
    if tokens.is_empty() {
        return None;
    }

    let has_year = tokens
        .iter()
        .any(|t| t.len() == 4 && t.chars().all(|c| c.is_ascii_digit()));
    let mut phrase = tokens.join(" ");
    if !has_year {
        phrase.push_str(&format!(" {}", year));
    }

    PHRASE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&phrase, format).ok())
}

/// Resolve a weekday from the first three characters of a label.
pub fn parse_weekday(label: &str) -> Option<Weekday> {
    let prefix: String = label
        .trim_start()
        .chars()
        .take(3)
        .collect::<String>()
        .to_lowercase();
    match prefix.as_str() {
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// "Mon"
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// "Oct 27"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
#[path = "calendar_aligner_tests.rs"]
mod tests;
