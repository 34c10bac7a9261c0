use thiserror::Error;

use crate::model::{InteractionPhase, InteractionState, Question, Verdict};

/// Seconds allotted to each question unless configured otherwise.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("question is not active (phase: {0:?})")]
    NotActive(InteractionPhase),
}

//
// ─── TICK OUTCOME ──────────────────────────────────────────────────────────────
//

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The question is still open.
    Running { remaining: u32 },
    /// Time ran out; the question was submitted as-is.
    TimedOut(Verdict),
    /// The question was not active, nothing changed.
    Ignored,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Drives one question from presentation to verdict.
///
/// The engine owns no state of its own; it borrows the question and the
/// interaction state it mutates, so callers can keep both inside a larger
/// serializable session value.
///
/// # Examples
///
/// ```
/// # use quiz_core::engine::QuestionEngine;
/// # use quiz_core::model::{BlankTemplate, InteractionState, Question, QuestionId, BLANK_MARKER};
/// let question = Question::new(
///     QuestionId::new("q1")?,
///     BlankTemplate::parse(format!("{BLANK_MARKER} and {BLANK_MARKER}")),
///     vec!["X".into(), "Y".into()],
///     vec!["Y".into(), "X".into()],
/// )?;
/// let mut state = InteractionState::default();
/// let mut engine = QuestionEngine::new(&question, &mut state);
/// engine.initialize(30);
/// engine.assign("Y");
/// engine.assign("X");
/// let verdict = engine.submit()?;
/// assert!(verdict.is_correct());
/// # Ok::<(), quiz_core::Error>(())
/// ```
#[derive(Debug)]
pub struct QuestionEngine<'a> {
    question: &'a Question,
    state: &'a mut InteractionState,
}

impl<'a> QuestionEngine<'a> {
    #[must_use]
    pub fn new(question: &'a Question, state: &'a mut InteractionState) -> Self {
        Self { question, state }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        self.question
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &*self.state
    }

    /// Present the question afresh: empty slots, full pool, full clock.
    pub fn initialize(&mut self, time_limit: u32) {
        *self.state = InteractionState {
            slots: vec![None; self.question.blank_count()],
            pool: self.question.options().to_vec(),
            time_remaining: time_limit,
            time_limit,
            phase: InteractionPhase::Active,
        };
    }

    /// Move one occurrence of `word` from the pool into the leftmost empty slot.
    ///
    /// Returns `false` and leaves the state untouched when the question is not
    /// active, the word is not in the pool, or every slot is filled.
    pub fn assign(&mut self, word: &str) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(slot) = self.state.slots.iter().position(Option::is_none) else {
            return false;
        };
        let Some(at) = self.state.pool.iter().position(|w| w == word) else {
            return false;
        };
        let word = self.state.pool.remove(at);
        self.state.slots[slot] = Some(word);
        true
    }

    /// Return the word in `slot` to the end of the pool.
    ///
    /// Returns `false` for out-of-range or empty slots and inactive questions.
    pub fn unassign(&mut self, slot: usize) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(word) = self.state.slots.get_mut(slot).and_then(Option::take) else {
            return false;
        };
        self.state.pool.push(word);
        true
    }

    /// Advance the countdown by one second, submitting when it reaches zero.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_active() {
            return TickOutcome::Ignored;
        }
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining > 0 {
            return TickOutcome::Running {
                remaining: self.state.time_remaining,
            };
        }
        TickOutcome::TimedOut(self.finish(true))
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state.is_active() && self.state.all_filled()
    }

    /// Close the question and score the current slots.
    ///
    /// Partially filled slots are allowed; they can never be correct.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotActive` if the question is idle or already submitted.
    pub fn submit(&mut self) -> Result<Verdict, EngineError> {
        if !self.state.is_active() {
            return Err(EngineError::NotActive(self.state.phase));
        }
        Ok(self.finish(false))
    }

    fn finish(&mut self, timed_out: bool) -> Verdict {
        self.state.phase = InteractionPhase::Submitted;
        let elapsed = self
            .state
            .time_limit
            .saturating_sub(self.state.time_remaining);
        Verdict::evaluate(self.question, self.state.slots.clone(), elapsed, timed_out)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BLANK_MARKER, BlankTemplate, QuestionId, word_counts};

    fn question(options: &[&str], answer: &[&str]) -> Question {
        let template = vec![BLANK_MARKER; options.len()].join(" ~ ");
        Question::new(
            QuestionId::new("q").unwrap(),
            BlankTemplate::parse(template),
            options.iter().map(|w| (*w).to_string()).collect(),
            answer.iter().map(|w| (*w).to_string()).collect(),
        )
        .unwrap()
    }

    fn assert_conserved(question: &Question, state: &InteractionState) {
        let mut held: Vec<&str> = state.slots().iter().flatten().map(String::as_str).collect();
        held.extend(state.pool().iter().map(String::as_str));
        assert_eq!(word_counts(&held), word_counts(question.options()));
    }

    #[test]
    fn initialize_resets_everything() {
        let q = question(&["A", "B", "C", "D"], &["B", "A", "C", "D"]);
        let mut state = InteractionState::default();
        assert_eq!(state.phase(), InteractionPhase::Idle);

        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(DEFAULT_TIME_LIMIT_SECS);
        engine.assign("C");
        engine.initialize(DEFAULT_TIME_LIMIT_SECS);

        assert_eq!(state.slots().len(), 4);
        assert!(state.slots().iter().all(Option::is_none));
        assert_eq!(state.pool(), ["A", "B", "C", "D"]);
        assert_eq!(state.time_remaining(), 30);
        assert!(state.is_active());
    }

    #[test]
    fn assign_fills_leftmost_empty_slot() {
        let q = question(&["A", "B", "C", "D"], &["B", "A", "C", "D"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);

        assert!(engine.assign("C"));
        assert!(engine.assign("A"));
        assert!(engine.unassign(0));
        assert!(engine.assign("D"));

        assert_eq!(
            state.slots(),
            [Some("D".to_string()), Some("A".to_string()), None, None]
        );
        assert_eq!(state.pool(), ["B", "C"]);
    }

    #[test]
    fn words_are_conserved_across_moves() {
        let q = question(&["go", "go", "went", "gone"], &["went", "go", "gone", "go"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);

        let script: [(bool, &str, usize); 8] = [
            (true, "go", 0),
            (true, "go", 0),
            (false, "", 0),
            (true, "gone", 0),
            (false, "", 3),
            (true, "went", 0),
            (true, "missing", 0),
            (false, "", 1),
        ];
        for (is_assign, word, slot) in script {
            if is_assign {
                engine.assign(word);
            } else {
                engine.unassign(slot);
            }
            assert_conserved(&q, engine.state());
        }
    }

    #[test]
    fn assign_is_noop_when_full_or_absent() {
        let q = question(&["X", "Y"], &["Y", "X"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);

        assert!(!engine.assign("Z"));
        assert!(engine.assign("X"));
        assert!(!engine.assign("X"));
        assert!(engine.assign("Y"));
        let before = engine.state().clone();
        assert!(!engine.assign("Y"));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn unassign_ignores_empty_and_out_of_range_slots() {
        let q = question(&["X", "Y"], &["Y", "X"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);

        assert!(!engine.unassign(0));
        assert!(!engine.unassign(7));
        assert_eq!(engine.state().pool(), ["X", "Y"]);
    }

    #[test]
    fn unassign_then_assign_round_trips_slots() {
        let q = question(&["A", "B", "C"], &["C", "B", "A"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);
        engine.assign("A");
        engine.assign("B");
        let slots_before = engine.state().slots().to_vec();

        assert!(engine.unassign(0));
        assert!(engine.assign("A"));

        assert_eq!(engine.state().slots(), slots_before.as_slice());
        assert_eq!(engine.state().pool(), ["C"]);
    }

    #[test]
    fn correctness_respects_order() {
        let q = question(&["A", "B", "C", "D"], &["B", "A", "C", "D"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);
        for word in ["A", "B", "C", "D"] {
            engine.assign(word);
        }
        assert!(engine.can_submit());

        let verdict = engine.submit().unwrap();
        assert!(!verdict.is_correct());
        assert!(!verdict.timed_out());
        assert_eq!(state.phase(), InteractionPhase::Submitted);
    }

    #[test]
    fn x_y_scenario_corrects_after_reordering() {
        let q = question(&["X", "Y"], &["Y", "X"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);
        engine.assign("X");
        engine.assign("Y");
        let wrong = engine.submit().unwrap();
        assert_eq!(
            wrong.user_answer(),
            [Some("X".to_string()), Some("Y".to_string())]
        );
        assert!(!wrong.is_correct());

        engine.initialize(30);
        engine.assign("X");
        engine.assign("Y");
        engine.unassign(0);
        assert_eq!(engine.state().slots(), [None, Some("Y".to_string())]);
        assert_eq!(engine.state().pool(), ["X"]);
        engine.unassign(1);
        engine.assign("Y");
        engine.assign("X");
        assert_eq!(
            engine.state().slots(),
            [Some("Y".to_string()), Some("X".to_string())]
        );
        assert!(engine.submit().unwrap().is_correct());
    }

    #[test]
    fn timeout_submits_partial_answer() {
        let q = question(&["A", "B", "C", "D"], &["B", "A", "C", "D"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);
        engine.assign("B");
        engine.assign("A");
        assert!(!engine.can_submit());

        for expected in (1..30).rev() {
            assert_eq!(engine.tick(), TickOutcome::Running { remaining: expected });
        }
        let TickOutcome::TimedOut(verdict) = engine.tick() else {
            panic!("expected timeout on the thirtieth tick");
        };

        assert!(verdict.timed_out());
        assert!(!verdict.is_correct());
        assert_eq!(verdict.elapsed_secs(), 30);
        assert_eq!(
            verdict.user_answer(),
            [Some("B".to_string()), Some("A".to_string()), None, None]
        );
        assert_eq!(state.time_remaining(), 0);
        assert_eq!(state.phase(), InteractionPhase::Submitted);
    }

    #[test]
    fn submitted_question_ignores_further_input() {
        let q = question(&["X", "Y"], &["X", "Y"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        engine.initialize(30);
        engine.assign("X");
        engine.tick();
        engine.tick();
        let verdict = engine.submit().unwrap();
        assert_eq!(verdict.elapsed_secs(), 2);

        assert_eq!(engine.tick(), TickOutcome::Ignored);
        assert!(!engine.assign("Y"));
        assert!(!engine.unassign(0));
        assert_eq!(
            engine.submit().unwrap_err(),
            EngineError::NotActive(InteractionPhase::Submitted)
        );
    }

    #[test]
    fn idle_state_rejects_submit() {
        let q = question(&["X", "Y"], &["X", "Y"]);
        let mut state = InteractionState::default();
        let mut engine = QuestionEngine::new(&q, &mut state);
        assert!(!engine.assign("X"));
        assert_eq!(
            engine.submit().unwrap_err(),
            EngineError::NotActive(InteractionPhase::Idle)
        );
    }
}
