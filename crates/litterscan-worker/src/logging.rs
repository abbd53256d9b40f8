//! Structured run logging.
//!
//! Every log line emitted while an analysis run is in flight carries the run
//! ID and the stage name, so interleaved runs can be told apart.

use tracing::{error, info, warn, Span};

use litterscan_models::{AnalysisStage, RunId};

/// Logger bound to a single analysis run.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    file_name: String,
}

impl RunLogger {
    pub fn new(run_id: &RunId, file_name: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            file_name: file_name.to_string(),
        }
    }

    pub fn log_start(&self, size_mb: f64) {
        info!(
            run_id = %self.run_id,
            file = %self.file_name,
            "Analysis started ({:.2} MB)", size_mb
        );
    }

    pub fn log_stage(&self, stage: AnalysisStage) {
        info!(
            run_id = %self.run_id,
            stage = %stage,
            percent = stage.percent(),
            "{}", stage.message()
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(run_id = %self.run_id, "Analysis warning: {}", message);
    }

    pub fn log_error(&self, kind: &str, message: &str) {
        error!(run_id = %self.run_id, kind, "Analysis failed: {}", message);
    }

    pub fn log_completion(&self, incidents: usize, thumbnails: usize) {
        info!(
            run_id = %self.run_id,
            incidents,
            thumbnails,
            "Analysis completed"
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Span covering the whole run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("analysis", run_id = %self.run_id, file = %self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_creation() {
        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id, "street.mp4");

        assert_eq!(logger.run_id(), run_id.to_string());
        assert_eq!(logger.file_name, "street.mp4");
    }
}
