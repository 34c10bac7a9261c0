use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use quiz_core::engine::TickOutcome;
use quiz_core::model::{
    InteractionState, Question, QuestionSet, SessionPhase, SessionState, Verdict,
};
use quiz_core::report::QuizReport;

use super::progress::QuizProgress;
use crate::Clock;
use crate::error::QuizError;

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Outcome of closing one question, by submit or by timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswerResult {
    pub verdict: Verdict,
    pub is_complete: bool,
}

/// Result of a one-second countdown step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizTick {
    Running { remaining: u32 },
    TimedOut(QuizAnswerResult),
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a question set.
///
/// Wraps the core `SessionState` with wall-clock bookkeeping and the
/// submit rule that every blank must be filled before an explicit submit.
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: SessionState,
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: QuestionSet, time_limit: u32, clock: Clock) -> Self {
        Self {
            state: SessionState::new(questions, time_limit),
            clock,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_completed()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question()
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        self.state.interaction()
    }

    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        self.state.verdicts()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.state.questions().len();
        let answered = self.state.verdicts().len();
        let is_complete = self.is_complete();
        let position = if is_complete {
            total
        } else {
            (self.state.current_index() + 1).min(total)
        };
        QuizProgress {
            position,
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete,
        }
    }

    /// Present the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::State` if the session was already started.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.state.start()?;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        info!(
            test_id = %self.state.questions().test_id(),
            questions = self.state.questions().len(),
            time_limit = self.state.time_limit(),
            "quiz started"
        );
        self.mark_completed_if_done();
        Ok(())
    }

    /// Throw away every verdict and present the first question again.
    pub fn restart(&mut self) {
        self.state.restart();
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        info!(test_id = %self.state.questions().test_id(), "quiz restarted");
        self.mark_completed_if_done();
    }

    /// Move `word` from the pool into the leftmost empty blank.
    pub fn pick(&mut self, word: &str) -> bool {
        let placed = self.state.assign(word);
        debug!(word, placed, "pick word");
        placed
    }

    /// Return the word in `slot` to the pool.
    pub fn clear(&mut self, slot: usize) -> bool {
        let cleared = self.state.unassign(slot);
        debug!(slot, cleared, "clear blank");
        cleared
    }

    /// Whether an explicit submit is currently allowed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let interaction = self.state.interaction();
        interaction.is_active() && interaction.all_filled()
    }

    /// Submit the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::IncompleteAnswer` while any blank is empty, or
    /// `QuizError::State` when no question is in progress.
    pub fn submit_current(&mut self) -> Result<QuizAnswerResult, QuizError> {
        let interaction = self.state.interaction();
        if interaction.is_active() && !interaction.all_filled() {
            return Err(QuizError::IncompleteAnswer {
                filled: interaction.filled_count(),
                total: interaction.slots().len(),
            });
        }
        let verdict = self.state.submit_current()?;
        Ok(self.after_verdict(verdict))
    }

    /// Advance the countdown by one second; at zero the question is submitted as-is.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::State` if recording the timeout verdict fails.
    pub fn tick(&mut self) -> Result<QuizTick, QuizError> {
        Ok(match self.state.tick()? {
            TickOutcome::Running { remaining } => QuizTick::Running { remaining },
            TickOutcome::TimedOut(verdict) => QuizTick::TimedOut(self.after_verdict(verdict)),
            TickOutcome::Ignored => QuizTick::Ignored,
        })
    }

    /// Score the verdicts collected so far.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Report` if a verdict refers to a question that is
    /// not part of the set.
    pub fn report(&self) -> Result<QuizReport, QuizError> {
        let report = QuizReport::build(self.state.questions(), self.state.verdicts())
            .inspect_err(|err| error!(error = %err, "failed to build quiz report"))?;
        Ok(match self.started_at {
            Some(started_at) => report.with_timing(started_at, self.completed_at),
            None => report,
        })
    }

    fn after_verdict(&mut self, verdict: Verdict) -> QuizAnswerResult {
        info!(
            question_id = %verdict.question_id(),
            correct = verdict.is_correct(),
            timed_out = verdict.timed_out(),
            elapsed_secs = verdict.elapsed_secs(),
            "question answered"
        );
        self.mark_completed_if_done();
        QuizAnswerResult {
            verdict,
            is_complete: self.is_complete(),
        }
    }

    fn mark_completed_if_done(&mut self) {
        if self.state.is_completed() && self.completed_at.is_none() {
            self.completed_at = Some(self.clock.now());
            let progress = self.progress();
            let correct = self.state.verdicts().iter().filter(|v| v.is_correct()).count();
            info!(total = progress.total, correct, "quiz completed");
        }
    }
}
