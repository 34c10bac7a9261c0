use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, TestId};
use crate::model::template::BlankTemplate;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has no blanks")]
    NoBlanks { id: QuestionId },

    #[error("question {id} has {blanks} blanks but {options} options")]
    BlankCountMismatch {
        id: QuestionId,
        blanks: usize,
        options: usize,
    },

    #[error("question {id} has {answers} answers but {options} options")]
    AnswerLengthMismatch {
        id: QuestionId,
        answers: usize,
        options: usize,
    },

    #[error("correct answer of question {id} is not a rearrangement of its options")]
    NotPermutation { id: QuestionId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("duplicate question id {0}")]
    DuplicateQuestionId(QuestionId),
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A fill-in-the-blank sentence with its word options.
///
/// Validated on construction: one option per blank, and the correct answer
/// uses exactly the same words as the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    template: BlankTemplate,
    options: Vec<String>,
    correct_answer: Vec<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` when the blank count, option count and answer
    /// length disagree, or when the answer is not a permutation of the options.
    pub fn new(
        id: QuestionId,
        template: BlankTemplate,
        options: Vec<String>,
        correct_answer: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let blanks = template.blank_count();
        if blanks == 0 {
            return Err(QuestionError::NoBlanks { id });
        }
        if blanks != options.len() {
            return Err(QuestionError::BlankCountMismatch {
                id,
                blanks,
                options: options.len(),
            });
        }
        if correct_answer.len() != options.len() {
            return Err(QuestionError::AnswerLengthMismatch {
                id,
                answers: correct_answer.len(),
                options: options.len(),
            });
        }
        if word_counts(&options) != word_counts(&correct_answer) {
            return Err(QuestionError::NotPermutation { id });
        }

        Ok(Self {
            id,
            template,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn template(&self) -> &BlankTemplate {
        &self.template
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &[String] {
        &self.correct_answer
    }

    /// Number of blanks, equal to the number of options.
    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.options.len()
    }

    /// Positional comparison against the correct answer; empty slots never match.
    #[must_use]
    pub fn is_correct<S: AsRef<str>>(&self, answer: &[Option<S>]) -> bool {
        answer.len() == self.correct_answer.len()
            && answer
                .iter()
                .zip(&self.correct_answer)
                .all(|(given, expected)| {
                    given
                        .as_ref()
                        .is_some_and(|word| word.as_ref() == expected.as_str())
                })
    }
}

pub(crate) fn word_counts<S: AsRef<str>>(words: &[S]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Wire shape of a question (camelCase JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    question_id: QuestionId,
    question: String,
    options: Vec<String>,
    correct_answer: Vec<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.question_id,
            BlankTemplate::parse(record.question),
            record.options,
            record.correct_answer,
        )
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        Self {
            question_id: question.id,
            question: question.template.into(),
            options: question.options,
            correct_answer: question.correct_answer,
        }
    }
}

//
// ─── QUESTION SET ─────────────────────────────────────────────────────────────
//

/// Ordered questions of one test, as produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionSetRecord", into = "QuestionSetRecord")]
pub struct QuestionSet {
    test_id: TestId,
    questions: Vec<Question>,
}

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionSetError::DuplicateQuestionId` if two questions share an id.
    pub fn new(test_id: TestId, questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionSetError::DuplicateQuestionId(question.id().clone()));
            }
        }
        Ok(Self { test_id, questions })
    }

    #[must_use]
    pub fn test_id(&self) -> &TestId {
        &self.test_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (TestId, Vec<Question>) {
        (self.test_id, self.questions)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionSetRecord {
    test_id: TestId,
    questions: Vec<Question>,
}

impl TryFrom<QuestionSetRecord> for QuestionSet {
    type Error = QuestionSetError;

    fn try_from(record: QuestionSetRecord) -> Result<Self, Self::Error> {
        Self::new(record.test_id, record.questions)
    }
}

impl From<QuestionSet> for QuestionSetRecord {
    fn from(set: QuestionSet) -> Self {
        Self {
            test_id: set.test_id,
            questions: set.questions,
        }
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
