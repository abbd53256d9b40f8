//! Decode cursors over a video resource.
//!
//! A [`DecodeCursor`] is a single positioned view on a video: it can seek to
//! an offset and capture the picture shown there, one operation at a time.
//! `seek_and_capture` takes `&mut self`, so a cursor can never have two seeks
//! in flight. Independent captures open independent cursors.

use async_trait::async_trait;
use image::ImageFormat;
use std::path::PathBuf;
use tracing::debug;

use litterscan_models::StillImage;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::encoding::JpegQuality;
use crate::error::{MediaError, MediaResult};
use crate::probe::{probe_video, VideoInfo};
use crate::resource::VideoResource;

/// One open, seekable view on a video.
#[async_trait]
pub trait DecodeCursor: Send {
    /// Total duration of the video in seconds.
    fn duration(&self) -> f64;

    /// Seek to `seconds` and capture the frame visible there as a JPEG.
    async fn seek_and_capture(&mut self, seconds: f64) -> MediaResult<StillImage>;
}

/// Opens decode cursors on video resources.
#[async_trait]
pub trait VideoDecoder: Send + Sync {
    type Cursor: DecodeCursor;

    /// Load the video's metadata and return a cursor positioned at the start.
    async fn open(&self, video: &VideoResource) -> MediaResult<Self::Cursor>;
}

/// Check a seek target against a known duration.
pub fn check_seek_target(seconds: f64, duration: f64) -> MediaResult<()> {
    if !seconds.is_finite() || seconds < 0.0 || seconds > duration {
        return Err(MediaError::SeekOutOfRange { seconds, duration });
    }
    Ok(())
}

/// Decoder backed by the FFmpeg and FFprobe CLIs.
#[derive(Debug, Clone, Default)]
pub struct FfmpegDecoder {
    quality: JpegQuality,
    timeout_secs: Option<u64>,
}

impl FfmpegDecoder {
    pub fn new(quality: JpegQuality) -> Self {
        Self {
            quality,
            timeout_secs: None,
        }
    }

    /// Bound every single-frame capture by a timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn quality(&self) -> JpegQuality {
        self.quality
    }
}

#[async_trait]
impl VideoDecoder for FfmpegDecoder {
    type Cursor = FfmpegCursor;

    async fn open(&self, video: &VideoResource) -> MediaResult<FfmpegCursor> {
        let info = probe_video(video.path()).await?;
        debug!(
            "Opened {} ({}x{}, {:.3}s @ {:.2} fps, {})",
            video.file_name(),
            info.width,
            info.height,
            info.duration,
            info.fps,
            info.codec
        );

        let runner = match self.timeout_secs {
            Some(secs) => FfmpegRunner::new().with_timeout(secs),
            None => FfmpegRunner::new(),
        };

        Ok(FfmpegCursor {
            path: video.path().to_path_buf(),
            info,
            quality: self.quality,
            runner,
        })
    }
}

/// FFmpeg-backed cursor. Each capture is one `ffmpeg -ss <t> -frames:v 1`
/// invocation at native resolution.
#[derive(Debug)]
pub struct FfmpegCursor {
    path: PathBuf,
    info: VideoInfo,
    quality: JpegQuality,
    runner: FfmpegRunner,
}

impl FfmpegCursor {
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn capture_command(&self, seconds: f64) -> FfmpegCommand {
        // A seek exactly at the end decodes nothing; land on the last frame instead
        let position = seconds.min(self.info.last_frame_offset());

        FfmpegCommand::to_stdout(&self.path)
            .seek(position)
            .single_frame()
            .no_audio()
            .format("image2pipe")
            .video_codec("mjpeg")
            .quality_scale(self.quality.qscale())
            .log_level("error")
    }
}

#[async_trait]
impl DecodeCursor for FfmpegCursor {
    fn duration(&self) -> f64 {
        self.info.duration
    }

    async fn seek_and_capture(&mut self, seconds: f64) -> MediaResult<StillImage> {
        check_seek_target(seconds, self.info.duration)?;

        let cmd = self.capture_command(seconds);
        let bytes = self.runner.capture_stdout(&cmd).await?;

        if bytes.is_empty() {
            return Err(MediaError::EmptyFrame(seconds));
        }
        if image::guess_format(&bytes).ok() != Some(ImageFormat::Jpeg) {
            return Err(MediaError::invalid_video(format!(
                "FFmpeg did not produce a JPEG frame at {:.3}s",
                seconds
            )));
        }

        Ok(StillImage::jpeg(bytes))
    }
}
