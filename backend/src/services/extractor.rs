//! Locates the structured literal embedded in free-form model output.
//!
//! The slice runs from the first opening delimiter to the last closing one.
//! There is no depth matching: the model is asked for exactly one literal and
//! anything before or after it (prose, markdown fences) is discarded.

use serde_json::Value;

use crate::error::{PlannerError, PlannerResult};

/// Which kind of literal the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Object,
    Array,
}

impl PayloadShape {
    fn delimiters(self) -> (char, char) {
        match self {
            PayloadShape::Object => ('{', '}'),
            PayloadShape::Array => ('[', ']'),
        }
    }
}

/// Return the outermost `{...}` / `[...]` slice of `raw`.
pub fn extract_payload(raw: &str, shape: PayloadShape) -> PlannerResult<&str> {
    let (open, close) = shape.delimiters();

    let start = raw.find(open).ok_or_else(|| {
        PlannerError::ExtractionFailure(format!("no '{}' found in model output", open))
    })?;
    let end = raw.rfind(close).ok_or_else(|| {
        PlannerError::ExtractionFailure(format!("no '{}' found in model output", close))
    })?;
    if end < start {
        return Err(PlannerError::ExtractionFailure(format!(
            "last '{}' precedes first '{}' in model output",
            close, open
        )));
    }

    // Both delimiters are single-byte, so these are char boundaries.
    Ok(&raw[start..=end])
}

/// Extract and parse the literal.
pub fn parse_payload(raw: &str, shape: PayloadShape) -> PlannerResult<Value> {
    let payload = extract_payload(raw, shape)?;
    serde_json::from_str(payload)
        .map_err(|e| PlannerError::ParseFailure(format!("model output is not valid JSON: {}", e)))
}
