//! Rust implementation of the deckplan schedule and estimate engines.
//!
//! This module provides the business-day scheduler, the calendar expansion used
//! by the schedule slide and the five-pattern cost estimate, plus Python bindings
//! for the authoring UI.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{FixedOffset, NaiveDate, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod business_days;
pub mod calendar;
mod config;
pub mod draft;
pub mod estimate;
pub mod holidays;
pub mod logging;
mod models;
pub mod schedule;
pub mod session;

pub use business_days::BusinessCalendar;
pub use calendar::{make_calendar, schedule_placeholder, split_calendar_blocks};
pub use config::{EstimateConfig, ScheduleConfig};
pub use draft::{parse_milestone_draft, DraftError};
pub use estimate::{
    estimate_patterns, estimate_placeholder, lookup_price, EstimateError, PatternKind, PriceTable,
};
pub use holidays::{get_holidays, HolidaySet, HolidaySource, JapaneseHolidays};
pub use models::{
    CalendarRow, CostInput, EstimatePattern, Milestone, ScheduledPhase, SurveySpec,
};
pub use schedule::{compute_schedule, default_milestones, ScheduleError};
pub use session::{ProposalSession, Screen, ScreenError};

/// Today's date in Japan, the default base date of a schedule.
pub fn today_jst() -> NaiveDate {
    match FixedOffset::east_opt(9 * 3600) {
        Some(jst) => Utc::now().with_timezone(&jst).date_naive(),
        None => Utc::now().date_naive(),
    }
}

/// Holidays and year-end closure days from `base_date` to `years` later.
///
/// # Arguments
/// * `base_date` - First day of the range
/// * `years` - Horizon in years (at least 1)
///
/// # Returns
/// * Sorted list of non-working dates other than weekends
#[pyfunction]
#[pyo3(name = "get_holidays", signature = (base_date, years=1))]
fn py_get_holidays(base_date: NaiveDate, years: u32) -> Vec<NaiveDate> {
    get_holidays(base_date, years.max(1)).dates().to_vec()
}

/// Sequence milestones into business-day phases.
///
/// # Arguments
/// * `milestones` - Milestones in the order they should run
/// * `base_date` - Start of the first unpinned phase (defaults to today in JST)
/// * `config` - Schedule configuration
///
/// # Returns
/// * List of ScheduledPhase in input order
///
/// # Raises
/// * ValueError if date arithmetic leaves the supported range
#[pyfunction]
#[pyo3(name = "compute_schedule", signature = (milestones, base_date=None, config=None))]
fn py_compute_schedule(
    milestones: Vec<Milestone>,
    base_date: Option<NaiveDate>,
    config: Option<ScheduleConfig>,
) -> PyResult<Vec<ScheduledPhase>> {
    let config = config.unwrap_or_default();
    let base_date = base_date.unwrap_or_else(today_jst);
    compute_schedule(&milestones, base_date, &config)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Expand a schedule into calendar rows (at most `config.max_calendar_rows`).
#[pyfunction]
#[pyo3(name = "make_calendar", signature = (schedule, config=None))]
fn py_make_calendar(
    schedule: Vec<ScheduledPhase>,
    config: Option<ScheduleConfig>,
) -> Vec<CalendarRow> {
    make_calendar(&schedule, &config.unwrap_or_default())
}

/// Split calendar rows across the slide's table placeholders.
///
/// # Returns
/// * List of (placeholder name, rows) pairs
#[pyfunction]
#[pyo3(name = "split_calendar_blocks", signature = (rows, blocks=calendar::SCHEDULE_BLOCKS))]
fn py_split_calendar_blocks(
    rows: Vec<CalendarRow>,
    blocks: usize,
) -> Vec<(String, Vec<CalendarRow>)> {
    split_calendar_blocks(&rows, blocks)
        .into_iter()
        .enumerate()
        .map(|(i, block)| (schedule_placeholder(i), block))
        .collect()
}

/// Phase template used when no milestone draft exists.
#[pyfunction]
#[pyo3(name = "default_milestones")]
fn py_default_milestones() -> Vec<Milestone> {
    default_milestones()
}

/// Parse the model's JSON milestone list.
///
/// # Raises
/// * ValueError if the text is not a JSON array of named milestones
#[pyfunction]
#[pyo3(name = "parse_milestone_draft")]
fn py_parse_milestone_draft(text: &str) -> PyResult<Vec<Milestone>> {
    parse_milestone_draft(text).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Price of the table key nearest to (questions, sample_size); 0 for an empty table.
#[pyfunction]
#[pyo3(name = "lookup_price")]
fn py_lookup_price(table: PriceTable, questions: u32, sample_size: u32) -> i64 {
    lookup_price(&table, questions, sample_size)
}

/// Compute the five estimate patterns.
///
/// # Arguments
/// * `input` - Hours and survey specs
/// * `config` - Estimate configuration (hourly rate, display unit)
/// * `main_table` - Main-survey prices (defaults to the built-in table)
/// * `screening_table` - Screening prices (defaults to the built-in table)
///
/// # Returns
/// * Five EstimatePattern, index 1 to 5
///
/// # Raises
/// * ValueError if any hour quantity is negative or not finite
#[pyfunction]
#[pyo3(
    name = "estimate_patterns",
    signature = (input, config=None, main_table=None, screening_table=None)
)]
fn py_estimate_patterns(
    input: CostInput,
    config: Option<EstimateConfig>,
    main_table: Option<PriceTable>,
    screening_table: Option<PriceTable>,
) -> PyResult<Vec<EstimatePattern>> {
    let config = config.unwrap_or_default();
    let main_table = main_table.unwrap_or_else(PriceTable::main_survey);
    let screening_table = screening_table.unwrap_or_else(PriceTable::screening);
    estimate_patterns(&input, &main_table, &screening_table, &config)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Shape name receiving the summary of estimate pattern `index` (1-based).
#[pyfunction]
#[pyo3(name = "estimate_placeholder")]
fn py_estimate_placeholder(index: usize) -> String {
    estimate_placeholder(index)
}

/// The deckplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Milestone>()?;
    m.add_class::<ScheduledPhase>()?;
    m.add_class::<CalendarRow>()?;
    m.add_class::<SurveySpec>()?;
    m.add_class::<CostInput>()?;
    m.add_class::<EstimatePattern>()?;
    m.add_class::<PriceTable>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;
    m.add_class::<EstimateConfig>()?;

    // Schedule engine
    m.add_function(wrap_pyfunction!(py_get_holidays, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_make_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(py_split_calendar_blocks, m)?)?;
    m.add_function(wrap_pyfunction!(py_default_milestones, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_milestone_draft, m)?)?;

    // Estimate engine
    m.add_function(wrap_pyfunction!(py_lookup_price, m)?)?;
    m.add_function(wrap_pyfunction!(py_estimate_patterns, m)?)?;
    m.add_function(wrap_pyfunction!(py_estimate_placeholder, m)?)?;

    Ok(())
}
