//! Worker configuration.

use litterscan_media::{
    FfmpegDecoder, JpegQuality, MediaResult, DEFAULT_FRAME_INTERVAL_SECS, DEFAULT_JPEG_QUALITY,
    DEFAULT_MAX_FRAMES,
};

/// Analysis pipeline configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Seconds between sampled frames
    pub frame_interval_secs: f64,
    /// Maximum frames sent to the inference service
    pub max_frames: usize,
    /// JPEG quality for frames and thumbnails (0-1)
    pub jpeg_quality: f32,
    /// Maximum thumbnail captures running at once
    pub max_thumbnail_parallel: usize,
    /// Timeout for a single FFmpeg capture
    pub ffmpeg_timeout_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            frame_interval_secs: DEFAULT_FRAME_INTERVAL_SECS,
            max_frames: DEFAULT_MAX_FRAMES,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_thumbnail_parallel: 4,
            ffmpeg_timeout_secs: 60,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frame_interval_secs: std::env::var("LITTERSCAN_FRAME_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frame_interval_secs),
            max_frames: std::env::var("LITTERSCAN_MAX_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_frames),
            jpeg_quality: std::env::var("LITTERSCAN_JPEG_QUALITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jpeg_quality),
            max_thumbnail_parallel: std::env::var("LITTERSCAN_MAX_THUMBNAIL_PARALLEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_thumbnail_parallel),
            ffmpeg_timeout_secs: std::env::var("LITTERSCAN_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ffmpeg_timeout_secs),
        }
    }

    /// FFmpeg decoder configured with this quality and timeout.
    pub fn decoder(&self) -> MediaResult<FfmpegDecoder> {
        let quality = JpegQuality::new(self.jpeg_quality)?;
        Ok(FfmpegDecoder::new(quality).with_timeout(self.ffmpeg_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sampling() {
        let config = WorkerConfig::default();
        assert_eq!(config.frame_interval_secs, 1.5);
        assert_eq!(config.max_frames, 12);
        assert_eq!(config.jpeg_quality, 0.8);
    }

    #[test]
    fn test_decoder_rejects_bad_quality() {
        let config = WorkerConfig {
            jpeg_quality: 2.0,
            ..Default::default()
        };
        assert!(config.decoder().is_err());
        assert!(WorkerConfig::default().decoder().is_ok());
    }
}
