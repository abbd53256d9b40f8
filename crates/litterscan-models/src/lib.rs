//! Shared data models for LitterScan.
//!
//! This crate provides Serde-serializable types for:
//! - Sampled frames and still images
//! - Incidents and analysis results returned by the inference service
//! - Analysis run state and progress reporting
//! - Timestamp parsing for incident offsets

pub mod frame;
pub mod image;
pub mod incident;
pub mod progress;
pub mod run;
pub mod timestamp;

// Re-export common types
pub use frame::SampledFrame;
pub use image::{StillImage, JPEG_MIME_TYPE};
pub use incident::{AnalysisResult, Incident, LICENSE_PLATE_NOT_VISIBLE};
pub use progress::{AnalysisProgress, AnalysisStage};
pub use run::{AnalysisRun, AnalysisStatus, RunId, RunStateError};
pub use timestamp::{parse_timestamp, TimestampError};
