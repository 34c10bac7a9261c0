use thiserror::Error;

use crate::engine::EngineError;
use crate::model::{IdError, QuestionError, QuestionSetError, SessionStateError};
use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Session(#[from] SessionStateError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
