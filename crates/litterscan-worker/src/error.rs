//! Worker error types.

use thiserror::Error;

use litterscan_inference::InferenceError;
use litterscan_media::MediaError;
use litterscan_models::RunStateError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// Sampling succeeded but produced nothing to analyze.
    #[error("Could not extract frames from the video.")]
    NoFramesExtracted,

    #[error("Video decoding failed: {0}")]
    Media(#[from] MediaError),

    /// Inference failures are shown to the user as-is.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    InvalidState(#[from] RunStateError),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerError::NoFramesExtracted => "no_frames",
            WorkerError::Media(_) => "decode",
            WorkerError::Inference(InferenceError::EmptyResponse) => "empty_response",
            WorkerError::Inference(InferenceError::MalformedResponse { .. }) => "malformed_response",
            WorkerError::Inference(_) => "inference_service",
            WorkerError::ConfigError(_) => "config",
            WorkerError::InvalidState(_) => "invalid_state",
        }
    }
}
