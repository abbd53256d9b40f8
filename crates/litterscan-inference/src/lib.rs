//! Client for the multimodal inference service.
//!
//! Sampled frames are sent to Gemini in a single `generateContent` request
//! together with a fixed task instruction and a response schema. The returned
//! text is validated strictly before it becomes an [`AnalysisResult`].
//!
//! [`AnalysisResult`]: litterscan_models::AnalysisResult

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, IncidentDetector};
pub use error::{InferenceError, InferenceResult};
pub use prompt::{build_request, response_schema, TASK_INSTRUCTION};
pub use response::parse_analysis;
