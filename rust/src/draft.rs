//! Milestone drafts extracted from the brief by the language model.
//!
//! The model is asked for a bare JSON array such as
//! `[{"name": "企画提案予定日", "fixed_date": "2025-02-10"}, ...]`, but often
//! wraps it in a Markdown code fence or leaves dates as free text.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{coerce_duration, parse_fixed_date, Milestone};

/// Duration given to drafted milestones that do not state one.
pub const DEFAULT_DRAFT_DURATION: i64 = 3;

/// Errors that can occur while reading a milestone draft.
#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Model output is not a JSON array")]
    NotAnArray,
    #[error("Milestone {0} has no name")]
    MissingName(usize),
}

#[derive(Deserialize)]
struct DraftEntry {
    name: Option<String>,
    #[serde(default)]
    fixed_date: Option<serde_json::Value>,
    #[serde(default)]
    duration_days: Option<serde_json::Value>,
}

/// Remove a surrounding ``` fence and its optional `json` language tag.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.trim_start();
    inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner)
        .trim()
}

fn value_as_date(value: Option<&serde_json::Value>) -> Option<chrono::NaiveDate> {
    value.and_then(|v| v.as_str()).and_then(parse_fixed_date)
}

fn value_as_duration(value: Option<&serde_json::Value>) -> u32 {
    let raw = match value {
        None | Some(serde_json::Value::Null) => Some(DEFAULT_DRAFT_DURATION),
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    coerce_duration(raw)
}

/// Parse the model's milestone list.
///
/// Unreadable dates become "no fixed date"; a missing duration defaults to
/// [`DEFAULT_DRAFT_DURATION`] and an unusable one to 1.
pub fn parse_milestone_draft(text: &str) -> Result<Vec<Milestone>, DraftError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(text))?;
    let serde_json::Value::Array(items) = value else {
        return Err(DraftError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| -> Result<Milestone, DraftError> {
            let entry: DraftEntry = serde_json::from_value(item)?;
            let name = entry
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .ok_or(DraftError::MissingName(i))?;
            Ok(Milestone {
                name,
                fixed_date: value_as_date(entry.fixed_date.as_ref()),
                duration_days: value_as_duration(entry.duration_days.as_ref()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bare_array() {
        let text = r#"[
            {"name": "企画提案予定日", "fixed_date": "2025-02-10"},
            {"name": "調査開始日", "fixed_date": null}
        ]"#;
        let milestones = parse_milestone_draft(text).unwrap();
        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[0].name, "企画提案予定日");
        assert_eq!(milestones[0].fixed_date, NaiveDate::from_ymd_opt(2025, 2, 10));
        assert_eq!(milestones[0].duration_days, 3);
        assert_eq!(milestones[1].fixed_date, None);
    }

    #[test]
    fn test_fenced_output() {
        let text = "```json\n[{\"name\": \"報告書納品日\", \"fixed_date\": \"2025/03/31\"}]\n```";
        let milestones = parse_milestone_draft(text).unwrap();
        assert_eq!(milestones[0].fixed_date, NaiveDate::from_ymd_opt(2025, 3, 31));

        let text = "```\n[]\n```";
        assert!(parse_milestone_draft(text).unwrap().is_empty());
    }

    #[test]
    fn test_free_text_date_and_durations() {
        let text = r#"[
            {"name": "a", "fixed_date": "3月上旬", "duration_days": 5},
            {"name": "b", "fixed_date": 20250210, "duration_days": "2"},
            {"name": "c", "duration_days": 0},
            {"name": "d", "duration_days": 2.7}
        ]"#;
        let milestones = parse_milestone_draft(text).unwrap();
        assert_eq!(milestones[0].fixed_date, None);
        assert_eq!(milestones[0].duration_days, 5);
        assert_eq!(milestones[1].fixed_date, None);
        assert_eq!(milestones[1].duration_days, 2);
        assert_eq!(milestones[2].duration_days, 1);
        assert_eq!(milestones[3].duration_days, 2);
    }

    #[test]
    fn test_not_an_array() {
        let result = parse_milestone_draft(r#"{"name": "a"}"#);
        assert!(matches!(result, Err(DraftError::NotAnArray)));
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_milestone_draft("以下がマイルストンです。");
        assert!(matches!(result, Err(DraftError::InvalidJson(_))));
    }

    #[test]
    fn test_missing_name() {
        let result = parse_milestone_draft(r#"[{"name": "a"}, {"fixed_date": null}]"#);
        assert!(matches!(result, Err(DraftError::MissingName(1))));

        let result = parse_milestone_draft(r#"[{"name": "  "}]"#);
        assert!(matches!(result, Err(DraftError::MissingName(0))));
    }
}
