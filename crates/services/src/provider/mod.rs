//! Sources of question sets.

mod builtin;
mod envelope;
mod file;
mod http;

use async_trait::async_trait;
use quiz_core::model::QuestionSet;

use crate::error::ProviderError;

pub use builtin::BuiltinQuestionProvider;
pub use envelope::{QuestionEnvelope, STATUS_SUCCESS, decode_envelope};
pub use file::FileQuestionProvider;
pub use http::HttpQuestionProvider;

/// Produces the ordered question set for one quiz run.
///
/// Implementations resolve once per call; callers decide whether to retry.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` when the source cannot be reached or its
    /// payload does not describe a valid question set.
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError>;

    /// Short human-readable name of the source, used in logs.
    fn describe(&self) -> String;
}
