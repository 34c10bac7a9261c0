#![forbid(unsafe_code)]

pub mod config;
pub mod countdown;
pub mod error;
pub mod provider;
pub mod quiz;

pub use quiz_core::Clock;

pub use config::{QuestionSource, QuizConfig};
pub use countdown::Countdown;
pub use error::{ConfigError, ProviderError, QuizError};
pub use provider::{
    BuiltinQuestionProvider, FileQuestionProvider, HttpQuestionProvider, QuestionProvider,
};
pub use quiz::{QuizAnswerResult, QuizLoopService, QuizProgress, QuizSession, QuizTick};
