//! Wire types for the HTTP endpoints.

use serde::{Deserialize, Serialize};

/// Generic failure message returned for every failed request.
pub const GENERIC_FAILURE_TEXT: &str = "Server error generating response.";

/// Request body for POST /api/answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Free-form visitor question. May be empty.
    pub question: String,
}

/// Response body for POST /api/answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer text, or the generic failure message.
    pub text: String,
}

impl AnswerResponse {
    /// Create a success response carrying the generated text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create the generic failure response.
    ///
    /// Every failure collapses to this one message; callers never see the
    /// error kind.
    #[must_use]
    pub fn failure() -> Self {
        Self {
            text: GENERIC_FAILURE_TEXT.to_string(),
        }
    }
}

/// Response body for GET /api/health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status, always "ok" when the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    /// Create the liveness response for the running binary.
    #[must_use]
    pub fn current() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_request_deserializes() {
        let request: AnswerRequest =
            serde_json::from_str(r#"{"question": "Do you do audits?"}"#).unwrap();
        assert_eq!(request.question, "Do you do audits?");
    }

    #[test]
    fn test_answer_request_requires_question_field() {
        let result = serde_json::from_str::<AnswerRequest>("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_answer_response_success() {
        let response = AnswerResponse::new("Here is a recommendation.");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"text":"Here is a recommendation."}"#);
    }

    #[test]
    fn test_answer_response_failure_is_generic() {
        let response = AnswerResponse::failure();
        assert_eq!(response.text, "Server error generating response.");
    }

    #[test]
    fn test_health_response_reports_ok() {
        let response = HealthResponse::current();
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }
}
