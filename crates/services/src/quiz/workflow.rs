use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use quiz_core::engine::DEFAULT_TIME_LIMIT_SECS;
use quiz_core::model::QuestionSet;

use super::session::QuizSession;
use crate::Clock;
use crate::error::QuizError;
use crate::provider::QuestionProvider;

/// Loads question sets and hands out fresh quiz sessions.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    provider: Arc<dyn QuestionProvider>,
    time_limit: u32,
    shuffle_questions: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, provider: Arc<dyn QuestionProvider>) -> Self {
        Self {
            clock,
            provider,
            time_limit: DEFAULT_TIME_LIMIT_SECS,
            shuffle_questions: false,
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: u32) -> Self {
        self.time_limit = time_limit;
        self
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle_questions: bool) -> Self {
        self.shuffle_questions = shuffle_questions;
        self
    }

    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    #[must_use]
    pub fn source_name(&self) -> String {
        self.provider.describe()
    }

    /// Fetch the question set and build an unstarted session over it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Provider` when the question source fails.
    pub async fn load_session(&self) -> Result<QuizSession, QuizError> {
        let source = self.provider.describe();
        let questions = self
            .provider
            .fetch_questions()
            .await
            .inspect_err(|err| warn!(%source, error = %err, "failed to load questions"))?;
        let questions = if self.shuffle_questions {
            shuffled(questions)?
        } else {
            questions
        };
        info!(
            %source,
            test_id = %questions.test_id(),
            count = questions.len(),
            shuffled = self.shuffle_questions,
            "questions loaded"
        );
        Ok(QuizSession::new(questions, self.time_limit, self.clock))
    }

    /// Load a session and present its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when loading or starting fails.
    pub async fn start_session(&self) -> Result<QuizSession, QuizError> {
        let mut session = self.load_session().await?;
        session.start()?;
        Ok(session)
    }
}

fn shuffled(questions: QuestionSet) -> Result<QuestionSet, QuizError> {
    let (test_id, mut items) = questions.into_parts();
    items.shuffle(&mut rand::rng());
    let questions = QuestionSet::new(test_id, items).map_err(crate::error::ProviderError::from)?;
    Ok(questions)
}
