//! Day-by-day calendar table for the schedule slide.

use chrono::{Datelike, NaiveDate, Weekday};
use rustc_hash::FxHashMap;

use crate::business_days::BusinessCalendar;
use crate::config::ScheduleConfig;
use crate::models::{CalendarRow, ScheduledPhase};
use crate::log_debug;

/// Number of table placeholders on the schedule slide.
pub const SCHEDULE_BLOCKS: usize = 3;

/// Single-character Japanese weekday label.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

/// Expand a schedule into one row per calendar day.
///
/// Rows run from the earliest phase start to the latest phase end and are cut
/// to `config.max_calendar_rows`. A row carries the name of the phase starting
/// on it; when several phases start the same day the last one wins. Holidays
/// are taken over the calendar's own span, the same days `compute_schedule`
/// skips for those phases.
pub fn make_calendar(schedule: &[ScheduledPhase], config: &ScheduleConfig) -> Vec<CalendarRow> {
    let (Some(start), Some(end)) = (
        schedule.iter().map(|p| p.start_date).min(),
        schedule.iter().map(|p| p.end_date).max(),
    ) else {
        return Vec::new();
    };

    let business = BusinessCalendar::for_span(start, end, config.year_end_block);
    log_debug!(
        config.verbosity,
        "Calendar {} .. {}: {} holidays",
        start,
        end,
        business.holidays().len()
    );

    let mut labels: FxHashMap<NaiveDate, &str> = FxHashMap::default();
    for phase in schedule {
        labels.insert(phase.start_date, phase.name.as_str());
    }

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .take(config.max_calendar_rows)
        .map(|date| CalendarRow {
            date,
            date_label: date.format("%m/%d").to_string(),
            weekday: weekday_label(date.weekday()).to_string(),
            milestone: labels.get(&date).map(|s| s.to_string()).unwrap_or_default(),
            is_non_business: !business.is_business_day(date),
        })
        .collect()
}

/// Split rows into at most `blocks` consecutive chunks of `ceil(len / blocks)`.
///
/// Trailing chunks that would be empty are omitted.
pub fn split_calendar_blocks(rows: &[CalendarRow], blocks: usize) -> Vec<Vec<CalendarRow>> {
    if rows.is_empty() || blocks == 0 {
        return Vec::new();
    }
    let per_block = rows.len().div_ceil(blocks);
    rows.chunks(per_block).map(|chunk| chunk.to_vec()).collect()
}

/// Shape name of the table placeholder for block `index` (0-based).
pub fn schedule_placeholder(index: usize) -> String {
    format!("schedule{}", index + 1)
}
