//! Inference client error types.

use std::time::Duration;
use thiserror::Error;

pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The service answered without any structured text.
    #[error("Empty response from AI")]
    EmptyResponse,

    /// The service answered with text that is not the declared shape.
    #[error("Invalid response format from AI: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("No frames to analyze")]
    NoFrames,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success HTTP status or unusable envelope.
    #[error("Inference service error: {0}")]
    Service(String),

    #[error("Inference request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InferenceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Create a malformed-response error that keeps the raw text.
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Transport or service-level failure, as opposed to a bad payload.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            InferenceError::Service(_)
                | InferenceError::Timeout(_)
                | InferenceError::Network(_)
                | InferenceError::Json(_)
        )
    }

    /// Raw service text, kept for diagnostics on malformed responses.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            InferenceError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_keeps_raw_text() {
        let err = InferenceError::malformed("expected value", "{oops");
        assert_eq!(err.raw_response(), Some("{oops"));
        assert!(!err.is_service_error());
    }

    #[test]
    fn test_service_error_category() {
        assert!(InferenceError::service("503").is_service_error());
        assert!(InferenceError::Timeout(Duration::from_secs(5)).is_service_error());
        assert!(!InferenceError::EmptyResponse.is_service_error());
    }
}
