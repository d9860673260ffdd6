//! Core data types shared by the schedule and estimate engines.

use chrono::{DateTime, NaiveDate};
use pyo3::prelude::*;

/// A named project phase to be placed on the calendar.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Milestone {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub fixed_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub duration_days: u32,
}

impl Milestone {
    /// Build a milestone from an unvalidated table row.
    ///
    /// Unparseable fixed dates are dropped and missing or non-positive
    /// durations become 1.
    pub fn from_raw(name: &str, fixed_date: Option<&str>, duration_days: Option<i64>) -> Self {
        Self {
            name: name.to_string(),
            fixed_date: fixed_date.and_then(parse_fixed_date),
            duration_days: coerce_duration(duration_days),
        }
    }
}

#[pymethods]
impl Milestone {
    #[new]
    #[pyo3(signature = (name, fixed_date=None, duration_days=None))]
    fn new(name: String, fixed_date: Option<NaiveDate>, duration_days: Option<i64>) -> Self {
        Self {
            name,
            fixed_date,
            duration_days: coerce_duration(duration_days),
        }
    }

    /// Alternate constructor for rows whose fixed date is still text.
    #[staticmethod]
    #[pyo3(name = "from_raw", signature = (name, fixed_date=None, duration_days=None))]
    fn py_from_raw(name: String, fixed_date: Option<String>, duration_days: Option<i64>) -> Self {
        Self::from_raw(&name, fixed_date.as_deref(), duration_days)
    }

    fn __repr__(&self) -> String {
        format!(
            "Milestone(name={:?}, fixed_date={:?}, duration_days={})",
            self.name, self.fixed_date, self.duration_days
        )
    }
}

/// Clamp a raw duration to a whole number of business days, at least 1.
pub fn coerce_duration(duration_days: Option<i64>) -> u32 {
    match duration_days {
        Some(d) if d >= 1 => u32::try_from(d).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Parse a fixed date typed by a user or returned by the model.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and RFC 3339 timestamps (date part only).
pub fn parse_fixed_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    // "2025-02-10 00:00:00" as produced by dataframe exports
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// A milestone after sequencing.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledPhase {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    /// Inclusive
    #[pyo3(get, set)]
    pub end_date: NaiveDate,
    #[pyo3(get, set)]
    pub fixed_date: Option<NaiveDate>,
}

#[pymethods]
impl ScheduledPhase {
    #[new]
    #[pyo3(signature = (name, start_date, end_date, fixed_date=None))]
    fn new(
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        fixed_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name,
            start_date,
            end_date,
            fixed_date,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledPhase(name={:?}, start={}, end={})",
            self.name, self.start_date, self.end_date
        )
    }
}

/// One day of the expanded schedule calendar.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarRow {
    #[pyo3(get)]
    pub date: NaiveDate,
    /// Display form, `MM/DD`
    #[pyo3(get)]
    pub date_label: String,
    /// Single-character Japanese weekday (月 .. 日)
    #[pyo3(get)]
    pub weekday: String,
    /// Name of the phase starting on this day, empty otherwise
    #[pyo3(get, set)]
    pub milestone: String,
    #[pyo3(get)]
    pub is_non_business: bool,
}

#[pymethods]
impl CalendarRow {
    fn __repr__(&self) -> String {
        format!(
            "CalendarRow(date={}, weekday={}, milestone={:?}, non_business={})",
            self.date_label, self.weekday, self.milestone, self.is_non_business
        )
    }
}

/// Question count and sample size of one survey wave.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurveySpec {
    #[pyo3(get, set)]
    pub questions: u32,
    #[pyo3(get, set)]
    pub sample_size: u32,
}

impl SurveySpec {
    pub fn new(questions: u32, sample_size: u32) -> Self {
        Self {
            questions,
            sample_size,
        }
    }
}

#[pymethods]
impl SurveySpec {
    #[new]
    fn py_new(questions: u32, sample_size: u32) -> Self {
        Self::new(questions, sample_size)
    }

    fn __repr__(&self) -> String {
        format!(
            "SurveySpec(questions={}, sample_size={})",
            self.questions, self.sample_size
        )
    }
}

/// Inputs of the cost estimate.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CostInput {
    #[pyo3(get, set)]
    pub hours_planning: f64,
    #[pyo3(get, set)]
    pub hours_fieldwork: f64,
    #[pyo3(get, set)]
    pub hours_tabulation: f64,
    #[pyo3(get, set)]
    pub hours_analysis: f64,
    #[pyo3(get, set)]
    pub screening: SurveySpec,
    #[pyo3(get, set)]
    pub main: SurveySpec,
}

impl Default for CostInput {
    fn default() -> Self {
        Self {
            hours_planning: 0.0,
            hours_fieldwork: 0.0,
            hours_tabulation: 0.0,
            hours_analysis: 0.0,
            screening: SurveySpec::new(5, 10000),
            main: SurveySpec::new(20, 300),
        }
    }
}

impl CostInput {
    /// Activity names paired with their hour quantities, in display order.
    pub fn activities(&self) -> [(&'static str, f64); 4] {
        [
            ("planning", self.hours_planning),
            ("fieldwork", self.hours_fieldwork),
            ("tabulation", self.hours_tabulation),
            ("analysis", self.hours_analysis),
        ]
    }
}

#[pymethods]
impl CostInput {
    #[new]
    #[pyo3(signature = (
        hours_planning=0.0,
        hours_fieldwork=0.0,
        hours_tabulation=0.0,
        hours_analysis=0.0,
        screening=None,
        main=None
    ))]
    fn new(
        hours_planning: f64,
        hours_fieldwork: f64,
        hours_tabulation: f64,
        hours_analysis: f64,
        screening: Option<SurveySpec>,
        main: Option<SurveySpec>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            hours_planning,
            hours_fieldwork,
            hours_tabulation,
            hours_analysis,
            screening: screening.unwrap_or(defaults.screening),
            main: main.unwrap_or(defaults.main),
        }
    }

    /// True when nothing has been entered yet (every hour and count is zero).
    pub fn is_blank(&self) -> bool {
        self.activities().iter().all(|(_, hours)| *hours == 0.0)
            && self.screening == SurveySpec::new(0, 0)
            && self.main == SurveySpec::new(0, 0)
    }

    fn __repr__(&self) -> String {
        format!(
            "CostInput(hours=({}, {}, {}, {}), screening={}x{}, main={}x{})",
            self.hours_planning,
            self.hours_fieldwork,
            self.hours_tabulation,
            self.hours_analysis,
            self.screening.questions,
            self.screening.sample_size,
            self.main.questions,
            self.main.sample_size
        )
    }
}

/// One of the five comparison scenarios of the estimate.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct EstimatePattern {
    /// 1-based position, matches the `EDIT_amount{index}` placeholder
    #[pyo3(get)]
    pub index: usize,
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub main: SurveySpec,
    #[pyo3(get)]
    pub planning_total: f64,
    #[pyo3(get)]
    pub screening_cost: i64,
    #[pyo3(get)]
    pub main_cost: i64,
    #[pyo3(get)]
    pub survey_total: i64,
    #[pyo3(get)]
    pub total_cost: f64,
    #[pyo3(get)]
    pub summary: String,
}

#[pymethods]
impl EstimatePattern {
    fn __repr__(&self) -> String {
        format!(
            "EstimatePattern(index={}, main={}x{}, total_cost={})",
            self.index, self.main.questions, self.main.sample_size, self.total_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_fixed_date_formats() {
        let expected = Some(make_date(2025, 2, 10));
        assert_eq!(parse_fixed_date("2025-02-10"), expected);
        assert_eq!(parse_fixed_date("2025/02/10"), expected);
        assert_eq!(parse_fixed_date(" 2025-02-10 "), expected);
        assert_eq!(parse_fixed_date("2025-02-10T09:00:00+09:00"), expected);
        assert_eq!(parse_fixed_date("2025-02-10 00:00:00"), expected);
    }

    #[test]
    fn test_parse_fixed_date_rejects_garbage() {
        assert_eq!(parse_fixed_date(""), None);
        assert_eq!(parse_fixed_date("未定"), None);
        assert_eq!(parse_fixed_date("2025-13-40"), None);
        assert_eq!(parse_fixed_date("NaT"), None);
    }

    #[test]
    fn test_from_raw_coerces() {
        let m = Milestone::from_raw("調査実施", Some("not a date"), Some(0));
        assert_eq!(m.fixed_date, None);
        assert_eq!(m.duration_days, 1);

        let m = Milestone::from_raw("調査実施", None, Some(-4));
        assert_eq!(m.duration_days, 1);

        let m = Milestone::from_raw("調査実施", Some("2025-03-03"), Some(5));
        assert_eq!(m.fixed_date, Some(make_date(2025, 3, 3)));
        assert_eq!(m.duration_days, 5);
    }

    #[test]
    fn test_coerce_duration_missing() {
        assert_eq!(coerce_duration(None), 1);
        assert_eq!(coerce_duration(Some(1)), 1);
        assert_eq!(coerce_duration(Some(12)), 12);
    }

    #[test]
    fn test_cost_input_blank() {
        let mut input = CostInput::new(0.0, 0.0, 0.0, 0.0, None, None);
        // defaults carry non-zero survey specs
        assert!(!input.is_blank());

        input.screening = SurveySpec::new(0, 0);
        input.main = SurveySpec::new(0, 0);
        assert!(input.is_blank());

        input.hours_analysis = 0.5;
        assert!(!input.is_blank());
    }
}
