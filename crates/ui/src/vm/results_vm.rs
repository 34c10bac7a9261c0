use quiz_core::report::{FeedbackTier, QuizReport, ReportItem};

use crate::vm::sentence_vm::{SentenceSegment, map_sentence_parts};
use crate::vm::time_fmt::format_duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultStatus {
    Correct,
    Incorrect,
    TimedOut,
}

impl ResultStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::TimedOut => "Time's up",
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    pub title: String,
    pub status: ResultStatus,
    pub user_sentence: Vec<SentenceSegment>,
    /// Only present for answers that were not correct.
    pub correct_sentence: Option<Vec<SentenceSegment>>,
}

impl From<&ReportItem> for ResultItemVm {
    fn from(item: &ReportItem) -> Self {
        let status = if item.is_correct {
            ResultStatus::Correct
        } else if item.timed_out {
            ResultStatus::TimedOut
        } else {
            ResultStatus::Incorrect
        };
        Self {
            title: format!("Question {}", item.position),
            status,
            user_sentence: map_sentence_parts(&item.user_parts()),
            correct_sentence: (!item.is_correct)
                .then(|| map_sentence_parts(&item.correct_parts())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub tier: FeedbackTier,
    pub message: &'static str,
    pub correct: usize,
    pub incorrect: usize,
    pub timed_out: usize,
    pub duration_label: Option<String>,
    pub items: Vec<ResultItemVm>,
}

impl From<&QuizReport> for ResultsVm {
    fn from(report: &QuizReport) -> Self {
        Self {
            score_label: format!("{:.1}/10", report.score()),
            tier: report.tier(),
            message: report.tier().message(),
            correct: report.correct(),
            incorrect: report.incorrect(),
            timed_out: report.timed_out_count(),
            duration_label: report.duration().map(format_duration),
            items: report.items().iter().map(ResultItemVm::from).collect(),
        }
    }
}
