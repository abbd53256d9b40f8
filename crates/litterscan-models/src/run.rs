//! Analysis run lifecycle.
//!
//! A run moves `Idle → Processing → Success | Error`; any state may be reset
//! back to `Idle`. Only one run is expected to be in flight at a time, which
//! the `start` transition enforces by refusing to restart a `Processing` run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::incident::AnalysisResult;

/// Unique identifier for an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Analysis run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Idle => "idle",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Success => "success",
            AnalysisStatus::Error => "error",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Success | AnalysisStatus::Error)
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot {action} an analysis run in state '{from}'")]
pub struct RunStateError {
    pub from: AnalysisStatus,
    pub action: &'static str,
}

/// State of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRun {
    id: RunId,
    status: AnalysisStatus,
    result: Option<AnalysisResult>,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl AnalysisRun {
    /// Create a run in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &RunId {
        &self.id
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    /// Completed result, present only in `Success`.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Failure description, present only in `Error`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Enter `Processing`. Previous outcome is discarded.
    pub fn start(&mut self) -> Result<(), RunStateError> {
        if self.status == AnalysisStatus::Processing {
            return Err(RunStateError {
                from: self.status,
                action: "start",
            });
        }
        self.id = RunId::new();
        self.status = AnalysisStatus::Processing;
        self.result = None;
        self.error = None;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        Ok(())
    }

    /// `Processing → Success`.
    pub fn succeed(&mut self, result: AnalysisResult) -> Result<(), RunStateError> {
        self.finish("complete")?;
        self.status = AnalysisStatus::Success;
        self.result = Some(result);
        Ok(())
    }

    /// `Processing → Error`.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), RunStateError> {
        self.finish("fail")?;
        self.status = AnalysisStatus::Error;
        self.error = Some(message.into());
        Ok(())
    }

    /// Any state `→ Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn finish(&mut self, action: &'static str) -> Result<(), RunStateError> {
        if self.status != AnalysisStatus::Processing {
            return Err(RunStateError {
                from: self.status,
                action,
            });
        }
        self.finished_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut run = AnalysisRun::new();
        assert_eq!(run.status(), AnalysisStatus::Idle);

        run.start().unwrap();
        assert_eq!(run.status(), AnalysisStatus::Processing);
        assert!(run.started_at().is_some());

        run.succeed(AnalysisResult::default()).unwrap();
        assert_eq!(run.status(), AnalysisStatus::Success);
        assert!(run.result().unwrap().is_empty());
        assert!(run.error().is_none());
        assert!(run.finished_at().is_some());
    }

    #[test]
    fn test_failure_keeps_result_unset() {
        let mut run = AnalysisRun::new();
        run.start().unwrap();
        run.fail("Empty response from AI").unwrap();

        assert_eq!(run.status(), AnalysisStatus::Error);
        assert_eq!(run.error(), Some("Empty response from AI"));
        assert!(run.result().is_none());
        assert!(run.status().is_terminal());
    }

    #[test]
    fn test_cannot_start_twice() {
        let mut run = AnalysisRun::new();
        run.start().unwrap();
        let err = run.start().unwrap_err();
        assert_eq!(err.from, AnalysisStatus::Processing);
    }

    #[test]
    fn test_cannot_finish_when_idle() {
        let mut run = AnalysisRun::new();
        assert!(run.succeed(AnalysisResult::default()).is_err());
        assert!(run.fail("boom").is_err());
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut run = AnalysisRun::new();
        run.start().unwrap();
        run.fail("boom").unwrap();
        run.reset();
        assert_eq!(run.status(), AnalysisStatus::Idle);
        assert!(run.error().is_none());

        // Retry from scratch after reset
        run.start().unwrap();
        assert_eq!(run.status(), AnalysisStatus::Processing);
    }

    #[test]
    fn test_restart_after_terminal_state() {
        let mut run = AnalysisRun::new();
        run.start().unwrap();
        let first_id = run.id().clone();
        run.succeed(AnalysisResult::default()).unwrap();

        run.start().unwrap();
        assert_ne!(run.id(), &first_id);
        assert!(run.result().is_none());
    }
}
