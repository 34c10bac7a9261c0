use std::path::PathBuf;

use async_trait::async_trait;
use quiz_core::model::QuestionSet;

use super::QuestionProvider;
use super::envelope::decode_envelope;
use crate::error::ProviderError;

/// Reads an envelope JSON document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileQuestionProvider {
    path: PathBuf,
}

impl FileQuestionProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionProvider for FileQuestionProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                path: self.path.clone(),
                source,
            })?;
        decode_envelope(&bytes)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
