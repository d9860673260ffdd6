//! Cost estimate: labour from hours, fieldwork from price tables, five scenarios.

mod format;
mod patterns;
mod price_table;

pub use format::{format_count, format_grouped};
pub use patterns::PatternKind;
pub use price_table::{lookup_price, PriceEntry, PriceTable};

use thiserror::Error;

use crate::config::EstimateConfig;
use crate::models::{CostInput, EstimatePattern, SurveySpec};
use crate::{log_changes, log_checks};

/// Errors that can occur during estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("Invalid {activity} hours: {value} (must be a finite, non-negative number)")]
    InvalidHours { activity: &'static str, value: f64 },
}

/// Labour cost of the four activities, in yen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanningCost {
    pub planning: f64,
    pub fieldwork: f64,
    pub tabulation: f64,
    pub analysis: f64,
}

impl PlanningCost {
    pub fn from_hours(input: &CostInput, hourly_rate: f64) -> Self {
        Self {
            planning: input.hours_planning * hourly_rate,
            fieldwork: input.hours_fieldwork * hourly_rate,
            tabulation: input.hours_tabulation * hourly_rate,
            analysis: input.hours_analysis * hourly_rate,
        }
    }

    pub fn total(&self) -> f64 {
        self.planning + self.fieldwork + self.tabulation + self.analysis
    }
}

impl CostInput {
    /// Reject hour quantities the engine cannot price.
    pub fn validate(&self) -> Result<(), EstimateError> {
        for (activity, value) in self.activities() {
            if !value.is_finite() || value < 0.0 {
                return Err(EstimateError::InvalidHours { activity, value });
            }
        }
        Ok(())
    }
}

/// Shape name receiving the summary of pattern `index` (1-based).
pub fn estimate_placeholder(index: usize) -> String {
    format!("EDIT_amount{}", index)
}

/// Compute the five estimate patterns.
///
/// Planning and screening costs are shared by every pattern; only the
/// main-survey lookup changes with the derived spec.
pub fn estimate_patterns(
    input: &CostInput,
    main_table: &PriceTable,
    screening_table: &PriceTable,
    config: &EstimateConfig,
) -> Result<Vec<EstimatePattern>, EstimateError> {
    input.validate()?;
    let verbosity = config.verbosity;

    let planning = PlanningCost::from_hours(input, config.hourly_rate);
    let planning_total = planning.total();
    let screening_cost = priced(screening_table, input.screening, "screening", verbosity);

    let patterns = PatternKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let main = kind.derive(input.main);
            let main_cost = priced(main_table, main, "main", verbosity);
            let survey_total = screening_cost + main_cost;
            let total_cost = planning_total + survey_total as f64;
            log_changes!(
                verbosity,
                "Pattern {} ({}x{}): total {}",
                i + 1,
                main.questions,
                main.sample_size,
                total_cost
            );

            let mut pattern = EstimatePattern {
                index: i + 1,
                label: kind.label().to_string(),
                main,
                planning_total,
                screening_cost,
                main_cost,
                survey_total,
                total_cost,
                summary: String::new(),
            };
            pattern.summary = render_summary(&pattern, input, &planning, config.display_divisor);
            pattern
        })
        .collect();

    Ok(patterns)
}

fn priced(table: &PriceTable, spec: SurveySpec, which: &str, verbosity: u8) -> i64 {
    match table.nearest(spec.questions, spec.sample_size, verbosity) {
        Some(entry) => {
            log_checks!(
                verbosity,
                "  {} {}x{} -> key {}x{} = {}",
                which,
                spec.questions,
                spec.sample_size,
                entry.spec.questions,
                entry.spec.sample_size,
                entry.price
            );
            entry.price
        }
        None => {
            log_checks!(verbosity, "  {} table is empty, pricing at 0", which);
            0
        }
    }
}

/// Multi-line slide text of one pattern, money in the display unit (万円).
pub fn render_summary(
    pattern: &EstimatePattern,
    input: &CostInput,
    planning: &PlanningCost,
    display_divisor: f64,
) -> String {
    let man = |yen: f64| format_grouped(yen / display_divisor, 1);
    let scr = input.screening;

    [
        format!("■{}", pattern.label),
        String::new(),
        "【企画費用（人件費）】".to_string(),
        format!(
            "・調査企画：{:.1}人時 ＝ {} 万円",
            input.hours_planning,
            man(planning.planning)
        ),
        format!(
            "・調査実査：{:.1}人時 ＝ {} 万円",
            input.hours_fieldwork,
            man(planning.fieldwork)
        ),
        format!(
            "・集計：{:.1}人時 ＝ {} 万円",
            input.hours_tabulation,
            man(planning.tabulation)
        ),
        format!(
            "・分析・報告：{:.1}人時 ＝ {} 万円",
            input.hours_analysis,
            man(planning.analysis)
        ),
        format!("▶ 企画費用 小計：{} 万円", man(pattern.planning_total)),
        String::new(),
        "【実査費用】".to_string(),
        format!(
            "・スクリーニング：{}問 × {}ss ＝ {} 万円",
            scr.questions,
            format_count(scr.sample_size),
            man(pattern.screening_cost as f64)
        ),
        format!(
            "・本調査：{}問 × {}ss ＝ {} 万円",
            pattern.main.questions,
            format_count(pattern.main.sample_size),
            man(pattern.main_cost as f64)
        ),
        format!("▶ 実査費用 小計：{} 万円", man(pattern.survey_total as f64)),
        String::new(),
        format!("■概算合計：{} 万円（税別）", man(pattern.total_cost)),
    ]
    .join("\n")
}
