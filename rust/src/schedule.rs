//! Sequencing of milestones into non-overlapping business-day phases.

use chrono::NaiveDate;
use thiserror::Error;

use crate::business_days::BusinessCalendar;
use crate::config::ScheduleConfig;
use crate::holidays::horizon_end;
use crate::models::{Milestone, ScheduledPhase};
use crate::{log_changes, log_checks, log_debug};

/// Errors that can occur while sequencing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Business-day arithmetic ran past the supported date range from {0}")]
    DateOutOfRange(NaiveDate),
}

/// Place milestones on business days, in input order.
///
/// Each phase starts on its fixed date when it has one, otherwise on the
/// business day after the previous phase ends (the first one on `base_date`).
/// A phase of N days ends N-1 business days after its start. Fixed dates are
/// honoured even when they land before the previous phase ends; the result is
/// never re-sorted.
///
/// Holidays cover `base_date` to `config.horizon_years` later, widened back to
/// the earliest fixed date and forward to the last phase end, so they match
/// what `make_calendar` shows for the same phases.
pub fn compute_schedule(
    milestones: &[Milestone],
    base_date: NaiveDate,
    config: &ScheduleConfig,
) -> Result<Vec<ScheduledPhase>, ScheduleError> {
    let verbosity = config.verbosity;
    let from = milestones
        .iter()
        .filter_map(|m| m.fixed_date)
        .fold(base_date, NaiveDate::min);
    let mut to = horizon_end(base_date, config.horizon_years);

    loop {
        let calendar = BusinessCalendar::for_span(from, to, config.year_end_block);
        log_debug!(
            verbosity,
            "Holidays {} .. {}: {} dates",
            from,
            to,
            calendar.holidays().len()
        );
        let phases = sequence(milestones, base_date, &calendar, verbosity)?;

        match phases.iter().map(|p| p.end_date).max() {
            Some(last) if last > to => {
                log_checks!(verbosity, "  Schedule runs to {}, past holidays ending {}", last, to);
                to = last;
            }
            _ => {
                for phase in &phases {
                    log_changes!(
                        verbosity,
                        "Phase {:?}: {} .. {}",
                        phase.name,
                        phase.start_date,
                        phase.end_date
                    );
                }
                return Ok(phases);
            }
        }
    }
}

fn sequence(
    milestones: &[Milestone],
    base_date: NaiveDate,
    calendar: &BusinessCalendar,
    verbosity: u8,
) -> Result<Vec<ScheduledPhase>, ScheduleError> {
    let mut phases = Vec::with_capacity(milestones.len());
    let mut cursor = base_date;

    for milestone in milestones {
        let start = match milestone.fixed_date {
            Some(fixed) => {
                if fixed < cursor {
                    log_checks!(
                        verbosity,
                        "  {}: fixed date {} precedes next free day {}",
                        milestone.name,
                        fixed,
                        cursor
                    );
                }
                fixed
            }
            None => cursor.max(base_date),
        };

        let duration = milestone.duration_days.max(1);
        let end = calendar.add_business_days(start, duration - 1)?;

        phases.push(ScheduledPhase {
            name: milestone.name.clone(),
            start_date: start,
            end_date: end,
            fixed_date: milestone.fixed_date,
        });
        cursor = calendar.next_business_day(end)?;
    }

    Ok(phases)
}

/// Phase template used when no milestone draft has been extracted.
pub fn default_milestones() -> Vec<Milestone> {
    [
        ("企画ご提案", 2),
        ("調査票案ご提示", 3),
        ("調査実施", 5),
        ("集計データアップ", 2),
        ("報告書提出", 3),
    ]
    .into_iter()
    .map(|(name, duration_days)| Milestone {
        name: name.to_string(),
        fixed_date: None,
        duration_days,
    })
    .collect()
}
