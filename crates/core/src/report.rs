use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    BlankTemplate, QuestionId, QuestionSet, SentencePart, TestId, Verdict,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    /// A verdict names a question outside the set it was collected from.
    #[error("verdict references unknown question {0}")]
    UnknownQuestion(QuestionId),
}

//
// ─── FEEDBACK TIER ─────────────────────────────────────────────────────────────
//

/// Qualitative bucket for a score; lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    /// 90% and above.
    Excellent,
    /// 70% up to 90%.
    Good,
    /// 50% up to 70%.
    Fair,
    /// Below 50%.
    NeedsPractice,
}

impl FeedbackTier {
    /// Tier for `correct` out of `total`, using exact integer comparison.
    ///
    /// An empty quiz is treated as 0%.
    #[must_use]
    pub fn from_counts(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self::NeedsPractice;
        }
        let scaled = correct.saturating_mul(100);
        if scaled >= total * 90 {
            Self::Excellent
        } else if scaled >= total * 70 {
            Self::Good
        } else if scaled >= total * 50 {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! You have a strong command of sentence construction.",
            Self::Good => "Good job! You have a solid understanding of sentence construction.",
            Self::Fair => {
                "Not bad! With a bit more practice, you'll improve your sentence construction skills."
            }
            Self::NeedsPractice => "Keep practicing! Sentence construction takes time to master.",
        }
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Per-question line of a report, carrying both renderings of the sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    pub position: usize,
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub timed_out: bool,
    pub elapsed_secs: u32,
    template: BlankTemplate,
    user_answer: Vec<Option<String>>,
    correct_answer: Vec<String>,
}

impl ReportItem {
    #[must_use]
    pub fn user_answer(&self) -> &[Option<String>] {
        &self.user_answer
    }

    #[must_use]
    pub fn correct_answer(&self) -> &[String] {
        &self.correct_answer
    }

    #[must_use]
    pub fn user_sentence(&self) -> String {
        self.template.render(&self.user_answer)
    }

    #[must_use]
    pub fn correct_sentence(&self) -> String {
        self.template.render_filled(&self.correct_answer)
    }

    #[must_use]
    pub fn user_parts(&self) -> Vec<SentencePart<'_>> {
        self.template.parts(&self.user_answer)
    }

    #[must_use]
    pub fn correct_parts(&self) -> Vec<SentencePart<'_>> {
        let mut parts = self.template.parts::<&str>(&[]);
        for part in &mut parts {
            if let SentencePart::Blank { index, value } = part {
                *value = self.correct_answer.get(*index).map(String::as_str);
            }
        }
        parts
    }
}

/// Aggregate outcome of a finished quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    test_id: TestId,
    total: usize,
    correct: usize,
    score: f64,
    percentage: f64,
    tier: FeedbackTier,
    items: Vec<ReportItem>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizReport {
    /// Build a report from the verdicts collected over `questions`.
    ///
    /// The total is the number of questions in the set, so a report over a
    /// partial run counts unanswered questions as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnknownQuestion` if a verdict has no matching question.
    pub fn build(questions: &QuestionSet, verdicts: &[Verdict]) -> Result<Self, ReportError> {
        let items = verdicts
            .iter()
            .enumerate()
            .map(|(index, verdict)| {
                let question = questions
                    .find(verdict.question_id())
                    .ok_or_else(|| ReportError::UnknownQuestion(verdict.question_id().clone()))?;
                Ok(ReportItem {
                    position: index + 1,
                    question_id: question.id().clone(),
                    is_correct: verdict.is_correct(),
                    timed_out: verdict.timed_out(),
                    elapsed_secs: verdict.elapsed_secs(),
                    template: question.template().clone(),
                    user_answer: verdict.user_answer().to_vec(),
                    correct_answer: question.correct_answer().to_vec(),
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let total = questions.len();
        let correct = items.iter().filter(|item| item.is_correct).count();

        Ok(Self {
            test_id: questions.test_id().clone(),
            total,
            correct,
            score: score_out_of_ten(correct, total),
            percentage: percentage(correct, total),
            tier: FeedbackTier::from_counts(correct, total),
            items,
            started_at: None,
            completed_at: None,
        })
    }

    /// Attach the wall-clock span of the run.
    #[must_use]
    pub fn with_timing(
        mut self,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.started_at = Some(started_at);
        self.completed_at = completed_at;
        self
    }

    #[must_use]
    pub fn test_id(&self) -> &TestId {
        &self.test_id
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.total.saturating_sub(self.correct)
    }

    /// Score out of ten, rounded to one decimal.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn tier(&self) -> FeedbackTier {
        self.tier
    }

    #[must_use]
    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    #[must_use]
    pub fn timed_out_count(&self) -> usize {
        self.items.iter().filter(|item| item.timed_out).count()
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn score_out_of_ten(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    // round(10 * c / t, 1dp) == round(100 * c / t) / 10
    (correct as f64 * 100.0 / total as f64).round() / 10.0
}

#[allow(clippy::cast_precision_loss)]
fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 * 100.0 / total as f64
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
