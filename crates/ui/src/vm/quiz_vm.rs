use quiz_core::model::SessionPhase;
use services::{QuizError, QuizLoopService, QuizSession, QuizTick};
use tracing::{debug, warn};

use crate::views::ViewError;
use crate::vm::question_vm::QuestionVm;
use crate::vm::results_vm::ResultsVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Pick(String),
    Clear(usize),
    Submit,
    /// One countdown second for the question identified by the key.
    Tick(CountdownKey),
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Intro,
    Question,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Advanced,
    Completed,
}

/// Identifies one presented question instance; changes on every advance and restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownKey {
    pub run: u32,
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntroVm {
    pub question_count: usize,
    pub time_limit_secs: u32,
}

pub struct QuizVm {
    session: QuizSession,
    run: u32,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session, run: 0 }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        match self.session.phase() {
            SessionPhase::NotStarted => QuizScreen::Intro,
            SessionPhase::InProgress => QuizScreen::Question,
            SessionPhase::Completed => QuizScreen::Results,
        }
    }

    #[must_use]
    pub fn intro(&self) -> IntroVm {
        IntroVm {
            question_count: self.session.progress().total,
            time_limit_secs: self.session.state().time_limit(),
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        QuestionVm::from_session(&self.session)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the report cannot be built.
    pub fn results(&self) -> Result<Option<ResultsVm>, ViewError> {
        if self.screen() != QuizScreen::Results {
            return Ok(None);
        }
        let report = self.session.report().map_err(|_| ViewError::Unknown)?;
        Ok(Some(ResultsVm::from(&report)))
    }

    /// Key for the countdown that should be running, if any.
    #[must_use]
    pub fn countdown_key(&self) -> Option<CountdownKey> {
        (self.screen() == QuizScreen::Question).then(|| CountdownKey {
            run: self.run,
            position: self.session.progress().position,
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the session rejects the intent.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<QuizOutcome, ViewError> {
        let result = match intent {
            QuizIntent::Start => {
                self.run = self.run.wrapping_add(1);
                self.session.start().map(|()| self.outcome_after_start())
            }
            QuizIntent::Pick(word) => {
                self.session.pick(&word);
                Ok(QuizOutcome::Continue)
            }
            QuizIntent::Clear(slot) => {
                self.session.clear(slot);
                Ok(QuizOutcome::Continue)
            }
            QuizIntent::Submit => self
                .session
                .submit_current()
                .map(|result| advance_outcome(result.is_complete)),
            QuizIntent::Tick(key) if self.countdown_key() != Some(key) => {
                debug!(?key, "stale countdown tick dropped");
                Ok(QuizOutcome::Continue)
            }
            QuizIntent::Tick(_) => self.session.tick().map(|tick| match tick {
                QuizTick::TimedOut(result) => advance_outcome(result.is_complete),
                QuizTick::Running { .. } | QuizTick::Ignored => QuizOutcome::Continue,
            }),
            QuizIntent::Restart => {
                self.run = self.run.wrapping_add(1);
                self.session.restart();
                Ok(self.outcome_after_start())
            }
        };

        match result {
            Ok(outcome) => Ok(outcome),
            Err(QuizError::IncompleteAnswer { filled, total }) => {
                debug!(filled, total, "submit ignored until every blank is filled");
                Ok(QuizOutcome::Continue)
            }
            Err(err) => {
                warn!(error = %err, "quiz intent rejected");
                Err(ViewError::Unknown)
            }
        }
    }

    fn outcome_after_start(&self) -> QuizOutcome {
        if self.session.is_complete() {
            QuizOutcome::Completed
        } else {
            QuizOutcome::Advanced
        }
    }
}

fn advance_outcome(is_complete: bool) -> QuizOutcome {
    if is_complete {
        QuizOutcome::Completed
    } else {
        QuizOutcome::Advanced
    }
}

/// # Errors
///
/// Returns `ViewError::LoadFailed` when the questions cannot be loaded.
pub async fn load_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let session = quiz_loop
        .load_session()
        .await
        .map_err(|_| ViewError::LoadFailed)?;
    let mut vm = QuizVm::new(session);
    // Nothing to ask: go straight to an empty results screen.
    if vm.session.progress().total == 0 {
        vm.apply(QuizIntent::Start)?;
    }
    Ok(vm)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use quiz_core::model::{QuestionSet, TestId};
    use quiz_core::time::fixed_clock;
    use services::{BuiltinQuestionProvider, ProviderError, QuestionProvider};

    use super::*;

    struct StaticProvider(QuestionSet);

    #[async_trait]
    impl QuestionProvider for StaticProvider {
        async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    async fn loaded() -> QuizVm {
        let service = QuizLoopService::new(fixed_clock(), Arc::new(BuiltinQuestionProvider::new()));
        load_quiz(&service).await.unwrap()
    }

    fn answer_current(vm: &mut QuizVm) -> QuizOutcome {
        let words = vm
            .session()
            .current_question()
            .unwrap()
            .correct_answer()
            .to_vec();
        for word in words {
            vm.apply(QuizIntent::Pick(word)).unwrap();
        }
        vm.apply(QuizIntent::Submit).unwrap()
    }

    #[tokio::test]
    async fn walks_intro_question_results() {
        let mut vm = loaded().await;
        assert_eq!(vm.screen(), QuizScreen::Intro);
        assert_eq!(vm.intro(), IntroVm { question_count: 10, time_limit_secs: 30 });
        assert!(vm.countdown_key().is_none());

        assert_eq!(vm.apply(QuizIntent::Start).unwrap(), QuizOutcome::Advanced);
        assert_eq!(vm.screen(), QuizScreen::Question);
        let first_key = vm.countdown_key().unwrap();

        for _ in 0..9 {
            assert_eq!(answer_current(&mut vm), QuizOutcome::Advanced);
        }
        assert_ne!(vm.countdown_key().unwrap(), first_key);
        assert_eq!(answer_current(&mut vm), QuizOutcome::Completed);

        let results = vm.results().unwrap().unwrap();
        assert_eq!(results.score_label, "10.0/10");
        assert!(vm.countdown_key().is_none());
    }

    #[tokio::test]
    async fn incomplete_submit_is_ignored() {
        let mut vm = loaded().await;
        vm.apply(QuizIntent::Start).unwrap();
        assert_eq!(vm.apply(QuizIntent::Submit).unwrap(), QuizOutcome::Continue);
        assert_eq!(vm.session().progress().position, 1);
    }

    #[tokio::test]
    async fn restart_changes_countdown_key() {
        let mut vm = loaded().await;
        vm.apply(QuizIntent::Start).unwrap();
        let before = vm.countdown_key().unwrap();

        vm.apply(QuizIntent::Restart).unwrap();
        let after = vm.countdown_key().unwrap();
        assert_eq!(after.position, before.position);
        assert_ne!(after, before);
    }

    #[tokio::test]
    async fn stale_tick_does_not_touch_next_question() {
        let mut vm = loaded().await;
        vm.apply(QuizIntent::Start).unwrap();
        let first = vm.countdown_key().unwrap();
        answer_current(&mut vm);

        vm.apply(QuizIntent::Tick(first)).unwrap();
        assert_eq!(vm.session().interaction().time_remaining(), 30);

        let second = vm.countdown_key().unwrap();
        vm.apply(QuizIntent::Tick(second)).unwrap();
        assert_eq!(vm.session().interaction().time_remaining(), 29);
    }

    #[tokio::test]
    async fn timeout_tick_advances() {
        let mut vm = loaded().await;
        vm.apply(QuizIntent::Start).unwrap();
        let key = vm.countdown_key().unwrap();
        for _ in 0..29 {
            assert_eq!(vm.apply(QuizIntent::Tick(key)).unwrap(), QuizOutcome::Continue);
        }
        assert_eq!(vm.apply(QuizIntent::Tick(key)).unwrap(), QuizOutcome::Advanced);
        assert_eq!(vm.session().progress().position, 2);
    }

    #[tokio::test]
    async fn empty_question_set_loads_completed() {
        let empty = QuestionSet::new(TestId::new("empty").unwrap(), Vec::new()).unwrap();
        let service = QuizLoopService::new(fixed_clock(), Arc::new(StaticProvider(empty)));
        let vm = load_quiz(&service).await.unwrap();

        assert_eq!(vm.screen(), QuizScreen::Results);
        assert!(vm.countdown_key().is_none());
        let results = vm.results().unwrap().unwrap();
        assert_eq!(results.score_label, "0.0/10");
        assert!(results.items.is_empty());
    }

    #[tokio::test]
    async fn starting_twice_is_an_error() {
        let mut vm = loaded().await;
        vm.apply(QuizIntent::Start).unwrap();
        assert_eq!(vm.apply(QuizIntent::Start).unwrap_err(), ViewError::Unknown);
    }
}
