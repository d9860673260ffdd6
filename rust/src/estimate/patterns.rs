//! The five comparison scenarios derived from the base main-survey spec.

use crate::models::SurveySpec;

/// How a pattern varies the main survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Base,
    SampleHalved,
    SampleDoubled,
    QuestionsMinusFive,
    QuestionsPlusFive,
}

impl PatternKind {
    /// All patterns in presentation order (index 1 to 5).
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Base,
        PatternKind::SampleHalved,
        PatternKind::SampleDoubled,
        PatternKind::QuestionsMinusFive,
        PatternKind::QuestionsPlusFive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Base => "ベース仕様（入力どおり）",
            Self::SampleHalved => "本調査サンプルサイズを半分にした場合",
            Self::SampleDoubled => "本調査サンプルサイズを2倍にした場合",
            Self::QuestionsMinusFive => "本調査質問数を5問減らした場合",
            Self::QuestionsPlusFive => "本調査質問数を5問増やした場合",
        }
    }

    /// Main-survey spec of this pattern. Derived counts never drop below 1.
    pub fn derive(self, base: SurveySpec) -> SurveySpec {
        let SurveySpec {
            questions: q,
            sample_size: n,
        } = base;
        match self {
            Self::Base => base,
            Self::SampleHalved => SurveySpec::new(q, (n / 2).max(1)),
            Self::SampleDoubled => SurveySpec::new(q, n.saturating_mul(2).max(1)),
            Self::QuestionsMinusFive => SurveySpec::new(q.saturating_sub(5).max(1), n),
            Self::QuestionsPlusFive => SurveySpec::new(q.saturating_add(5).max(1), n),
        }
    }
}
