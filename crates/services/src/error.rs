//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{QuestionSetError, SessionStateError};
use quiz_core::report::ReportError;

/// Errors emitted by question providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("question source rejected the request ({status}): {message}")]
    Rejected { status: String, message: String },
    #[error("question source returned no data")]
    MissingData,
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed question payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidQuestions(#[from] QuestionSetError),
}

/// Errors emitted by quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("all {total} blanks must be filled before submitting ({filled} filled)")]
    IncompleteAnswer { filled: usize, total: usize },
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors raised while reading quiz configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("time limit must be between {min} and {max} seconds, got {raw}")]
    InvalidTimeLimit { raw: String, min: u32, max: u32 },
    #[error("invalid boolean value: {0}")]
    InvalidFlag(String),
    #[error("question source cannot be empty")]
    EmptySource,
}
