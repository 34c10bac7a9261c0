use async_trait::async_trait;
use quiz_core::model::QuestionSet;

use super::QuestionProvider;
use super::envelope::decode_envelope;
use crate::error::ProviderError;

const SENTENCE_QUESTIONS: &str = include_str!("../../data/sentence_questions.json");

/// Ships the ten sentence-construction questions with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinQuestionProvider;

impl BuiltinQuestionProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuestionProvider for BuiltinQuestionProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        decode_envelope(SENTENCE_QUESTIONS.as_bytes())
    }

    fn describe(&self) -> String {
        "built-in sentence questions".to_string()
    }
}
