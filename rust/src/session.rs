//! Typed state of one proposal-authoring session.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::{make_calendar, schedule_placeholder, split_calendar_blocks, SCHEDULE_BLOCKS};
use crate::config::ScheduleConfig;
use crate::estimate::estimate_placeholder;
use crate::models::{CalendarRow, CostInput, EstimatePattern, Milestone};
use crate::schedule::{compute_schedule, default_milestones, ScheduleError};

/// Errors that can occur while resolving a screen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Unknown screen: {0}")]
    Unknown(String),
}

/// Workflow screens of the authoring tool, in navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    BriefSummary,
    BrandDiagnosis,
    Cover,
    KickoffNote,
    QuestionDecomposition,
    AnalysisApproach,
    TargetRespondents,
    SurveyItems,
    SurveySpec,
    Schedule,
    Estimate,
    Export,
}

impl Screen {
    pub const ALL: [Screen; 12] = [
        Screen::BriefSummary,
        Screen::BrandDiagnosis,
        Screen::Cover,
        Screen::KickoffNote,
        Screen::QuestionDecomposition,
        Screen::AnalysisApproach,
        Screen::TargetRespondents,
        Screen::SurveyItems,
        Screen::SurveySpec,
        Screen::Schedule,
        Screen::Estimate,
        Screen::Export,
    ];

    /// Button label shown in the navigation pane.
    pub fn label(self) -> &'static str {
        match self {
            Self::BriefSummary => "オリエン内容の整理",
            Self::BrandDiagnosis => "ブランド診断",
            Self::Cover => "表紙",
            Self::KickoffNote => "キックオフノート",
            Self::QuestionDecomposition => "問いの分解",
            Self::AnalysisApproach => "分析アプローチ",
            Self::TargetRespondents => "対象者条件を検討",
            Self::SurveyItems => "調査項目案",
            Self::SurveySpec => "調査仕様案",
            Self::Schedule => "スケジュール案",
            Self::Estimate => "概算見積",
            Self::Export => "パワーポイントを出力",
        }
    }
}

impl FromStr for Screen {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // older sessions stored the brand screen under its internal key
        if s == "brand_diagnosis" {
            return Ok(Self::BrandDiagnosis);
        }
        Self::ALL
            .into_iter()
            .find(|screen| screen.label() == s)
            .ok_or_else(|| ScreenError::Unknown(s.to_string()))
    }
}

/// Artifacts accumulated while a consultant works through the screens.
#[derive(Clone, Debug, Default)]
pub struct ProposalSession {
    pub selected: Option<Screen>,
    /// Output of the brief summary step, source of the milestone draft
    pub brief_outline: String,
    pub milestone_draft: Vec<Milestone>,
    pub calendar: Vec<CalendarRow>,
    pub cost_input: CostInput,
    /// Text written to the deck, keyed by shape name
    pub placeholder_texts: BTreeMap<String, String>,
}

impl ProposalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, screen: Screen) {
        self.selected = Some(screen);
    }

    /// Milestones to schedule: the extracted draft, or the default template.
    pub fn milestones(&self) -> Vec<Milestone> {
        if self.milestone_draft.is_empty() {
            default_milestones()
        } else {
            self.milestone_draft.clone()
        }
    }

    /// Sequence the current milestones and keep the expanded calendar.
    pub fn generate_schedule(
        &mut self,
        base_date: NaiveDate,
        config: &ScheduleConfig,
    ) -> Result<&[CalendarRow], ScheduleError> {
        let phases = compute_schedule(&self.milestones(), base_date, config)?;
        self.calendar = make_calendar(&phases, config);
        Ok(&self.calendar)
    }

    /// Calendar rows grouped under the slide's `schedule1..3` placeholders.
    pub fn schedule_blocks(&self) -> Vec<(String, Vec<CalendarRow>)> {
        split_calendar_blocks(&self.calendar, SCHEDULE_BLOCKS)
            .into_iter()
            .enumerate()
            .map(|(i, rows)| (schedule_placeholder(i), rows))
            .collect()
    }

    /// Store each pattern summary under `EDIT_amount{index}`; returns how many were applied.
    pub fn apply_estimates(&mut self, patterns: &[EstimatePattern]) -> usize {
        let mut applied = 0;
        for pattern in patterns {
            if pattern.summary.is_empty() {
                continue;
            }
            self.placeholder_texts
                .insert(estimate_placeholder(pattern.index), pattern.summary.clone());
            applied += 1;
        }
        applied
    }
}
