//! Study-topic selection, tip parsing and tip-to-block correlation.
//!
//! Selection decides which block labels are worth a tip. The planner only makes
//! the tip round trip when the resulting [`StudyTopics`] is non-empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BlockKind, DaySchedule, ScheduleBlock, StudyTip};
use crate::services::extractor::{extract_payload, PayloadShape};

pub const DEFAULT_MAX_TOPICS: usize = 5;

pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "study",
    "homework",
    "hw",
    "review",
    "practice",
    "essay",
    "reading",
    "assignment",
    "prepare",
    "research",
];

static DEFAULT_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| keyword_pattern(DEFAULT_KEYWORDS.iter().copied()));

/// Decides whether a block deserves a study tip.
pub trait StudyClassifier: Send + Sync {
    fn is_study_block(&self, block: &ScheduleBlock) -> bool;
}

/// Matches `task` blocks whose label contains a study keyword (case-insensitive).
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    pattern: Option<Regex>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl KeywordClassifier {
    /// Classifier over exactly `keywords`. Blank keywords are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<S> = keywords.into_iter().collect();
        Self {
            pattern: keyword_pattern(keywords.iter().map(AsRef::as_ref)),
        }
    }

    /// Default keywords plus `extra`.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Self {
        if extra.iter().all(|k| k.as_ref().trim().is_empty()) {
            return Self::default();
        }
        let keywords = DEFAULT_KEYWORDS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref));
        Self {
            pattern: keyword_pattern(keywords),
        }
    }
}

impl StudyClassifier for KeywordClassifier {
    fn is_study_block(&self, block: &ScheduleBlock) -> bool {
        block.kind == BlockKind::Task
            && self
                .pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(&block.label))
    }
}

fn keyword_pattern<'a>(keywords: impl Iterator<Item = &'a str>) -> Option<Regex> {
    let alternatives: Vec<String> = keywords
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    // Escaped literals only, so this cannot fail to compile.
    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).ok()
}

/// Distinct study labels in first-seen order, capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyTopics(Vec<String>);

impl StudyTopics {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for StudyTopics {
    fn from(topics: Vec<String>) -> Self {
        Self(topics)
    }
}

/// Collect labels the classifier accepts, deduplicated (exact match), at most `cap`.
pub fn select_topics(days: &[DaySchedule], classifier: &dyn StudyClassifier, cap: usize) -> StudyTopics {
    let mut topics: Vec<String> = Vec::new();
    for block in days.iter().flat_map(|day| day.schedule.iter()) {
        if topics.len() >= cap {
            break;
        }
        if classifier.is_study_block(block) && !topics.contains(&block.label) {
            topics.push(block.label.clone());
        }
    }
    StudyTopics(topics)
}

/// Parse the tip round trip's raw text into tips.
///
/// Only an unusable payload fails. Elements without a string `relatedTo` are
/// skipped; a missing or non-string title or content becomes empty.
pub fn parse_tips(raw: &str) -> PlannerResult<Vec<StudyTip>> {
    let payload = extract_payload(raw, PayloadShape::Array)
        .map_err(|e| PlannerError::TipParseFailure(e.message()))?;
    let elements: Vec<Value> = serde_json::from_str(payload)
        .map_err(|e| PlannerError::TipParseFailure(format!("tip payload is not an array: {}", e)))?;

    Ok(elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let tip = tip_from_value(element);
            if tip.is_none() {
                warn!(index, element = %element, "Skipping tip without a relatedTo string");
            }
            tip
        })
        .collect())
}

fn tip_from_value(element: &Value) -> Option<StudyTip> {
    let related_to = element.get("relatedTo")?.as_str()?;
    Some(StudyTip::new(
        related_to,
        text_field(element, "title"),
        text_field(element, "content"),
    ))
}

fn text_field<'a>(element: &'a Value, key: &str) -> &'a str {
    element.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Attach each tip to every block it relates to. Returns the number of attachments.
pub fn correlate(days: &mut [DaySchedule], tips: &[StudyTip]) -> usize {
    let mut attached = 0;
    for block in days.iter_mut().flat_map(|day| day.schedule.iter_mut()) {
        for tip in tips.iter().filter(|tip| tip.relates_to(&block.label)) {
            block.tips.push(tip.clone());
            attached += 1;
        }
    }
    attached
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(blocks: Vec<ScheduleBlock>) -> DaySchedule {
        DaySchedule::new("Mon", "Oct 27", blocks)
    }

    #[test]
    fn test_default_keywords_match_task_labels() {
        let classifier = KeywordClassifier::default();
        assert!(classifier.is_study_block(&ScheduleBlock::task("Math HW")));
        assert!(classifier.is_study_block(&ScheduleBlock::task("ESSAY draft")));
        assert!(classifier.is_study_block(&ScheduleBlock::task("Prepare slides")));
        assert!(!classifier.is_study_block(&ScheduleBlock::task("Laundry")));
    }

    #[test]
    fn test_only_task_blocks_are_study_blocks() {
        let classifier = KeywordClassifier::default();
        assert!(!classifier.is_study_block(&ScheduleBlock::event("Soccer practice")));
        assert!(!classifier.is_study_block(&ScheduleBlock::rest("Review break")));
    }

    #[test]
    fn test_extra_keywords() {
        let classifier = KeywordClassifier::with_extra(&["flashcards", "  "]);
        assert!(classifier.is_study_block(&ScheduleBlock::task("Biology flashcards")));
        assert!(classifier.is_study_block(&ScheduleBlock::task("Study group")));
    }

    #[test]
    fn test_keywords_are_literal() {
        let classifier = KeywordClassifier::new(["c++"]);
        assert!(classifier.is_study_block(&ScheduleBlock::task("C++ labs")));
        assert!(!classifier.is_study_block(&ScheduleBlock::task("c labs")));
    }

    #[test]
    fn test_empty_keyword_set_matches_nothing() {
        let classifier = KeywordClassifier::new(Vec::<String>::new());
        assert!(!classifier.is_study_block(&ScheduleBlock::task("Study")));
    }

    #[test]
    fn test_select_dedups_in_first_seen_order() {
        let days = vec![
            day(vec![
                ScheduleBlock::task("Math HW"),
                ScheduleBlock::task("Essay Draft"),
                ScheduleBlock::rest("Short break"),
                ScheduleBlock::task("Math HW"),
            ]),
            day(vec![
                ScheduleBlock::task("Essay Draft"),
                ScheduleBlock::task("Chem reading"),
                ScheduleBlock::task("Math HW"),
                ScheduleBlock::task("Chem reading"),
                ScheduleBlock::task("Essay Draft"),
            ]),
        ];
        let topics = select_topics(&days, &KeywordClassifier::default(), DEFAULT_MAX_TOPICS);
        assert_eq!(topics.as_slice(), ["Math HW", "Essay Draft", "Chem reading"]);
    }

    #[test]
    fn test_select_caps_topics() {
        let blocks = (1..=8).map(|n| ScheduleBlock::task(format!("Study unit {}", n))).collect();
        let topics = select_topics(&[day(blocks)], &KeywordClassifier::default(), 5);
        assert_eq!(topics.len(), 5);
        assert_eq!(topics.iter().last().map(String::as_str), Some("Study unit 5"));
    }

    #[test]
    fn test_select_empty_when_nothing_qualifies() {
        let days = vec![day(vec![ScheduleBlock::event("Church"), ScheduleBlock::task("Groceries")])];
        assert!(select_topics(&days, &KeywordClassifier::default(), 5).is_empty());
    }

    #[test]
    fn test_correlation_is_case_insensitive_but_exact() {
        let mut days = vec![day(vec![
            ScheduleBlock::task("Math HW"),
            ScheduleBlock::task("math hw "),
            ScheduleBlock::task("MATH HW"),
        ])];
        let tips = vec![StudyTip::new("math hw", "📐 Chunk it", "Work in 25 minute blocks.")];

        assert_eq!(correlate(&mut days, &tips), 2);
        let blocks = &days[0].schedule;
        assert_eq!(blocks[0].tips.len(), 1);
        assert!(blocks[1].tips.is_empty());
        assert_eq!(blocks[2].tips[0].title, "📐 Chunk it");
    }

    #[test]
    fn test_correlation_attaches_to_every_occurrence() {
        let mut days = vec![
            day(vec![ScheduleBlock::task("Essay Draft")]),
            day(vec![ScheduleBlock::task("Essay Draft")]),
        ];
        let tips = vec![StudyTip::new("Essay Draft", "✍️ Outline first", "Start with bullets.")];
        assert_eq!(correlate(&mut days, &tips), 2);
        assert_eq!(days[1].schedule[0].tips.len(), 1);
    }

    #[test]
    fn test_parse_tips_from_noisy_text() {
        let raw = "Sure! ```json\n[{\"relatedTo\": \"Math HW\", \"title\": \"📐 Focus\", \"content\": \"Do it.\"}]\n```";
        let tips = parse_tips(raw).unwrap();
        assert_eq!(tips, vec![StudyTip::new("Math HW", "📐 Focus", "Do it.")]);
    }

    #[test]
    fn test_parse_tips_defaults_missing_text() {
        let tips = parse_tips("[{\"relatedTo\": \"Essay\"}]").unwrap();
        assert_eq!(tips[0].title, "");
        assert_eq!(tips[0].content, "");
    }

    #[test]
    fn test_parse_tips_null_text_is_empty() {
        let tips = parse_tips("[{\"relatedTo\": \"Essay\", \"title\": null, \"content\": 7}]").unwrap();
        assert_eq!(tips, vec![StudyTip::new("Essay", "", "")]);
    }

    #[test]
    fn test_parse_tips_skips_bad_elements() {
        let raw = r#"[
            {"relatedTo": "Math HW", "title": "📐 Focus", "content": "Do it."},
            {"relatedTo": 3, "title": "numeric key"},
            {"title": "missing relatedTo"},
            "just a string",
            null
        ]"#;
        let tips = parse_tips(raw).unwrap();
        assert_eq!(tips, vec![StudyTip::new("Math HW", "📐 Focus", "Do it.")]);
    }

    #[test]
    fn test_parse_tips_all_bad_elements_is_empty() {
        assert!(parse_tips("[{\"title\": \"missing relatedTo\"}]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_tips_failures() {
        for raw in ["no tips today", "[oops]"] {
            let err = parse_tips(raw).unwrap_err();
            assert!(matches!(err, PlannerError::TipParseFailure(_)), "{}", raw);
        }
    }
}
