use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{EngineError, QuestionEngine, TickOutcome};
use crate::model::ids::QuestionId;
use crate::model::interaction::InteractionState;
use crate::model::question::{Question, QuestionSet};
use crate::model::verdict::Verdict;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("session has not started")]
    NotStarted,

    #[error("session already started")]
    AlreadyStarted,

    #[error("session already completed")]
    Completed,

    #[error("verdict for question {got} does not match current question {expected}")]
    VerdictMismatch { expected: QuestionId, got: QuestionId },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// Everything a quiz run needs, as one serializable value.
///
/// While in progress `verdicts.len() == current_index`; once completed every
/// question has exactly one verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    questions: QuestionSet,
    current_index: usize,
    verdicts: Vec<Verdict>,
    phase: SessionPhase,
    interaction: InteractionState,
    time_limit: u32,
}

impl SessionState {
    #[must_use]
    pub fn new(questions: QuestionSet, time_limit: u32) -> Self {
        Self {
            questions,
            current_index: 0,
            verdicts: Vec::new(),
            phase: SessionPhase::NotStarted,
            interaction: InteractionState::default(),
            time_limit,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// The question on screen, if the session is in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::InProgress => self.questions.get(self.current_index),
            SessionPhase::NotStarted | SessionPhase::Completed => None,
        }
    }

    /// Engine bound to the current question and its interaction state.
    pub fn engine(&mut self) -> Option<QuestionEngine<'_>> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        let question = self.questions.get(self.current_index)?;
        Some(QuestionEngine::new(question, &mut self.interaction))
    }

    /// Present the first question. An empty question set completes at once.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::AlreadyStarted` unless the session is fresh.
    pub fn start(&mut self) -> Result<(), SessionStateError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(SessionStateError::AlreadyStarted);
        }
        self.begin();
        Ok(())
    }

    /// Discard all verdicts and present the first question again.
    pub fn restart(&mut self) {
        self.begin();
    }

    fn begin(&mut self) {
        self.current_index = 0;
        self.verdicts.clear();
        self.interaction = InteractionState::default();
        if self.questions.is_empty() {
            self.phase = SessionPhase::Completed;
            return;
        }
        self.phase = SessionPhase::InProgress;
        self.present_current();
    }

    fn present_current(&mut self) {
        if let Some(question) = self.questions.get(self.current_index) {
            QuestionEngine::new(question, &mut self.interaction).initialize(self.time_limit);
        }
    }

    /// Accept the verdict for the current question and advance.
    ///
    /// Returns the phase after the verdict was recorded.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` when the session is not in progress or the
    /// verdict belongs to another question.
    pub fn record_verdict(&mut self, verdict: Verdict) -> Result<SessionPhase, SessionStateError> {
        let expected = match self.phase {
            SessionPhase::NotStarted => return Err(SessionStateError::NotStarted),
            SessionPhase::Completed => return Err(SessionStateError::Completed),
            SessionPhase::InProgress => self
                .questions
                .get(self.current_index)
                .map(Question::id)
                .ok_or(SessionStateError::Completed)?,
        };
        if expected != verdict.question_id() {
            return Err(SessionStateError::VerdictMismatch {
                expected: expected.clone(),
                got: verdict.question_id().clone(),
            });
        }

        self.verdicts.push(verdict);
        if self.current_index + 1 >= self.questions.len() {
            self.phase = SessionPhase::Completed;
        } else {
            self.current_index += 1;
            self.present_current();
        }
        Ok(self.phase)
    }

    /// Place `word` into the current question. No-op outside a running question.
    pub fn assign(&mut self, word: &str) -> bool {
        self.engine().is_some_and(|mut engine| engine.assign(word))
    }

    /// Clear `slot` of the current question. No-op outside a running question.
    pub fn unassign(&mut self, slot: usize) -> bool {
        self.engine().is_some_and(|mut engine| engine.unassign(slot))
    }

    /// Submit the current question as it stands and advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` when no question is in progress.
    pub fn submit_current(&mut self) -> Result<Verdict, SessionStateError> {
        let verdict = match self.engine() {
            Some(mut engine) => engine.submit()?,
            None => return Err(self.inactive_error()),
        };
        self.record_verdict(verdict.clone())?;
        Ok(verdict)
    }

    /// Advance the current question's countdown; a timeout is recorded like a submit.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` if recording the timeout verdict fails.
    pub fn tick(&mut self) -> Result<TickOutcome, SessionStateError> {
        let outcome = match self.engine() {
            Some(mut engine) => engine.tick(),
            None => return Ok(TickOutcome::Ignored),
        };
        if let TickOutcome::TimedOut(verdict) = &outcome {
            self.record_verdict(verdict.clone())?;
        }
        Ok(outcome)
    }

    fn inactive_error(&self) -> SessionStateError {
        match self.phase {
            SessionPhase::NotStarted => SessionStateError::NotStarted,
            SessionPhase::InProgress | SessionPhase::Completed => SessionStateError::Completed,
        }
    }
}
