use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Immutable outcome of one answered or timed-out question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    question_id: QuestionId,
    user_answer: Vec<Option<String>>,
    is_correct: bool,
    elapsed_secs: u32,
    timed_out: bool,
}

impl Verdict {
    /// Score `user_answer` against `question` and freeze the result.
    #[must_use]
    pub fn evaluate(
        question: &Question,
        user_answer: Vec<Option<String>>,
        elapsed_secs: u32,
        timed_out: bool,
    ) -> Self {
        let is_correct = question.is_correct(&user_answer);
        Self {
            question_id: question.id().clone(),
            user_answer,
            is_correct,
            elapsed_secs,
            timed_out,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn user_answer(&self) -> &[Option<String>] {
        &self.user_answer
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// Seconds spent on the question before the verdict was produced.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}
