//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding application installs a recorder.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    // Sampling
    pub const FRAMES_SAMPLED_TOTAL: &str = "litterscan_frames_sampled_total";

    // Inference
    pub const INFERENCE_REQUESTS_TOTAL: &str = "litterscan_inference_requests_total";
    pub const INFERENCE_DURATION_SECONDS: &str = "litterscan_inference_duration_seconds";

    // Thumbnails
    pub const THUMBNAILS_TOTAL: &str = "litterscan_thumbnails_total";

    // Runs
    pub const RUNS_COMPLETED_TOTAL: &str = "litterscan_runs_completed_total";
    pub const RUNS_FAILED_TOTAL: &str = "litterscan_runs_failed_total";
    pub const INCIDENTS_REPORTED_TOTAL: &str = "litterscan_incidents_reported_total";
}

/// Outcome of a single thumbnail attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    Captured,
    Failed,
    /// Timestamp could not be parsed; no capture was attempted.
    Skipped,
}

impl ThumbnailOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailOutcome::Captured => "captured",
            ThumbnailOutcome::Failed => "failed",
            ThumbnailOutcome::Skipped => "skipped",
        }
    }
}

pub fn record_frames_sampled(count: usize) {
    counter!(names::FRAMES_SAMPLED_TOTAL).increment(count as u64);
}

pub fn record_inference(success: bool, duration_secs: f64) {
    let labels = [("status", if success { "success" } else { "error" }.to_string())];
    counter!(names::INFERENCE_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::INFERENCE_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_thumbnail(outcome: ThumbnailOutcome) {
    let labels = [("outcome", outcome.as_str().to_string())];
    counter!(names::THUMBNAILS_TOTAL, &labels).increment(1);
}

pub fn record_run_completed(incidents: usize) {
    counter!(names::RUNS_COMPLETED_TOTAL).increment(1);
    counter!(names::INCIDENTS_REPORTED_TOTAL).increment(incidents as u64);
}

pub fn record_run_failed(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!(names::RUNS_FAILED_TOTAL, &labels).increment(1);
}
