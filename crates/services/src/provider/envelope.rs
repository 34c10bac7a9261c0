use quiz_core::model::QuestionSet;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Response wrapper used by question endpoints:
/// `{"status": "SUCCESS", "data": {...}, "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<QuestionSet>,
    #[serde(default)]
    pub message: Option<String>,
}

impl QuestionEnvelope {
    /// # Errors
    ///
    /// Returns `ProviderError::Rejected` for a non-success status and
    /// `ProviderError::MissingData` when a success carries no payload.
    pub fn into_question_set(self) -> Result<QuestionSet, ProviderError> {
        if !self.status.eq_ignore_ascii_case(STATUS_SUCCESS) {
            return Err(ProviderError::Rejected {
                status: self.status,
                message: self.message.unwrap_or_default(),
            });
        }
        self.data.ok_or(ProviderError::MissingData)
    }
}

/// Decode an envelope document into its question set.
///
/// # Errors
///
/// Returns `ProviderError::Decode` for malformed JSON or invalid questions,
/// plus the envelope errors of [`QuestionEnvelope::into_question_set`].
pub fn decode_envelope(bytes: &[u8]) -> Result<QuestionSet, ProviderError> {
    let envelope: QuestionEnvelope = serde_json::from_slice(bytes)?;
    envelope.into_question_set()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_status_carries_message() {
        let body = br#"{"status": "ERROR", "message": "test expired"}"#;
        let err = decode_envelope(body).unwrap_err();
        match err {
            ProviderError::Rejected { status, message } => {
                assert_eq!(status, "ERROR");
                assert_eq!(message, "test expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_an_error() {
        let err = decode_envelope(br#"{"status": "SUCCESS"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MissingData));
    }

    #[test]
    fn invalid_question_fails_decoding() {
        let body = br#"{
            "status": "SUCCESS",
            "data": {
                "testId": "t",
                "questions": [{
                    "questionId": "q",
                    "question": "only _____________ here",
                    "options": ["a"],
                    "correctAnswer": ["b"]
                }]
            }
        }"#;
        assert!(matches!(
            decode_envelope(body).unwrap_err(),
            ProviderError::Decode(_)
        ));
    }
}
