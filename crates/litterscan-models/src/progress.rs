//! Progress reporting for an analysis run.

use serde::{Deserialize, Serialize};

/// Stage of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    ExtractingFrames,
    Analyzing,
    GeneratingThumbnails,
    Complete,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStage::ExtractingFrames => "extracting_frames",
            AnalysisStage::Analyzing => "analyzing",
            AnalysisStage::GeneratingThumbnails => "generating_thumbnails",
            AnalysisStage::Complete => "complete",
        }
    }

    /// Human-readable description shown while the stage runs.
    pub fn message(&self) -> &'static str {
        match self {
            AnalysisStage::ExtractingFrames => "Extracting key frames from video...",
            AnalysisStage::Analyzing => "AI is scanning for two-wheelers and waste disposal...",
            AnalysisStage::GeneratingThumbnails => "Capturing incident thumbnails...",
            AnalysisStage::Complete => "Analysis complete",
        }
    }

    /// Overall progress percentage when the stage starts.
    pub fn percent(&self) -> u8 {
        match self {
            AnalysisStage::ExtractingFrames => 10,
            AnalysisStage::Analyzing => 40,
            AnalysisStage::GeneratingThumbnails => 80,
            AnalysisStage::Complete => 100,
        }
    }
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A progress update emitted to the caller of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisProgress {
    pub stage: AnalysisStage,
    pub message: String,
    /// Progress percentage (0-100)
    pub percent: u8,
}

impl AnalysisProgress {
    /// Progress update at the start of `stage`.
    pub fn stage(stage: AnalysisStage) -> Self {
        Self {
            stage,
            message: stage.message().to_string(),
            percent: stage.percent(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stage == AnalysisStage::Complete
    }
}
