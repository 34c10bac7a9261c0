use async_trait::async_trait;
use reqwest::Client;
use quiz_core::model::QuestionSet;

use super::QuestionProvider;
use super::envelope::QuestionEnvelope;
use crate::error::ProviderError;

/// Fetches an envelope JSON document over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpQuestionProvider {
    client: Client,
    url: String,
}

impl HttpQuestionProvider {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    #[must_use]
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuestionProvider for HttpQuestionProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let envelope: QuestionEnvelope = response.json().await?;
        envelope.into_question_set()
    }

    fn describe(&self) -> String {
        format!("endpoint {}", self.url)
    }
}
