//! Analysis pipeline.
//!
//! One run goes: sample frames → single inference request → thumbnail
//! assembly. Progress is reported at the start of each stage and once more on
//! completion.

use std::time::Instant;

use tracing::Instrument;

use litterscan_inference::{GeminiClient, IncidentDetector};
use litterscan_media::{sample_frames, FfmpegDecoder, MediaError, VideoDecoder, VideoResource};
use litterscan_models::{AnalysisProgress, AnalysisResult, AnalysisRun, AnalysisStage, RunId};

use crate::assembler::assemble;
use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::RunLogger;
use crate::metrics;

pub struct AnalysisPipeline<D, I> {
    decoder: D,
    detector: I,
    config: WorkerConfig,
}

impl AnalysisPipeline<FfmpegDecoder, GeminiClient> {
    /// Pipeline backed by FFmpeg and Gemini, configured from the environment.
    pub fn from_env(config: WorkerConfig) -> WorkerResult<Self> {
        let decoder = config
            .decoder()
            .map_err(|e| WorkerError::config_error(e.to_string()))?;
        let detector = GeminiClient::from_env()?;
        Ok(Self::new(decoder, detector, config))
    }
}

impl<D: VideoDecoder, I: IncidentDetector> AnalysisPipeline<D, I> {
    pub fn new(decoder: D, detector: I, config: WorkerConfig) -> Self {
        Self {
            decoder,
            detector,
            config,
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Analyze `video` and return the assembled report.
    pub async fn run<F>(&self, video: &VideoResource, on_progress: F) -> WorkerResult<AnalysisResult>
    where
        F: Fn(AnalysisProgress) + Send + Sync,
    {
        let run_id = RunId::new();
        self.execute(&run_id, video, &on_progress).await
    }

    /// Analyze `video`, recording the lifecycle on `run`.
    ///
    /// `run` must not already be processing. On failure the run ends in
    /// `Error` with the failure message and no result, and the error is also
    /// returned.
    pub async fn run_tracked<F>(
        &self,
        run: &mut AnalysisRun,
        video: &VideoResource,
        on_progress: F,
    ) -> WorkerResult<()>
    where
        F: Fn(AnalysisProgress) + Send + Sync,
    {
        run.start()?;
        let run_id = run.id().clone();

        match self.execute(&run_id, video, &on_progress).await {
            Ok(result) => {
                run.succeed(result)?;
                Ok(())
            }
            Err(e) => {
                run.fail(e.to_string())?;
                Err(e)
            }
        }
    }

    async fn execute<F>(
        &self,
        run_id: &RunId,
        video: &VideoResource,
        on_progress: &F,
    ) -> WorkerResult<AnalysisResult>
    where
        F: Fn(AnalysisProgress) + Send + Sync,
    {
        let logger = RunLogger::new(run_id, video.file_name());
        let span = logger.create_span();

        let outcome = self
            .stages(&logger, video, on_progress)
            .instrument(span)
            .await;

        match &outcome {
            Ok(result) => {
                logger.log_completion(result.len(), result.thumbnail_count());
                metrics::record_run_completed(result.len());
            }
            Err(e) => {
                logger.log_error(e.kind(), &e.to_string());
                metrics::record_run_failed(e.kind());
            }
        }
        outcome
    }

    async fn stages<F>(
        &self,
        logger: &RunLogger,
        video: &VideoResource,
        on_progress: &F,
    ) -> WorkerResult<AnalysisResult>
    where
        F: Fn(AnalysisProgress) + Send + Sync,
    {
        let emit = |stage: AnalysisStage| {
            logger.log_stage(stage);
            on_progress(AnalysisProgress::stage(stage));
        };

        logger.log_start(video.size_mb());
        emit(AnalysisStage::ExtractingFrames);
        let frames = match sample_frames(
            &self.decoder,
            video,
            self.config.frame_interval_secs,
            self.config.max_frames,
        )
        .await
        {
            Ok(frames) => frames,
            Err(e) if e.is_environment_error() || matches!(e, MediaError::InvalidArgument(_)) => {
                return Err(e.into());
            }
            // an undecodable video is reported the same way as an empty one
            Err(e) => {
                logger.log_warning(&format!("Frame extraction failed: {}", e));
                Vec::new()
            }
        };
        if frames.is_empty() {
            return Err(WorkerError::NoFramesExtracted);
        }
        metrics::record_frames_sampled(frames.len());

        emit(AnalysisStage::Analyzing);
        let start = Instant::now();
        let analyzed = self.detector.analyze(&frames).await;
        metrics::record_inference(analyzed.is_ok(), start.elapsed().as_secs_f64());
        let result = analyzed?;
        drop(frames);

        if result.is_empty() {
            logger.log_warning("No incidents reported");
        }

        emit(AnalysisStage::GeneratingThumbnails);
        let report = assemble(
            &self.decoder,
            result,
            video,
            self.config.max_thumbnail_parallel,
        )
        .await;

        emit(AnalysisStage::Complete);
        Ok(report)
    }
}
