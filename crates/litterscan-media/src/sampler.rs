//! Deterministic frame sampling.
//!
//! Frames are captured at `0, interval, 2 * interval, ...` up to the video
//! duration or the frame cap, whichever comes first. All captures go through
//! one cursor, strictly one after another, so frames come out in increasing
//! timestamp order.

use tracing::{debug, info, warn};

use litterscan_models::SampledFrame;

use crate::decoder::{DecodeCursor, VideoDecoder};
use crate::error::{MediaError, MediaResult};
use crate::resource::VideoResource;

/// Seconds between sampled frames.
pub const DEFAULT_FRAME_INTERVAL_SECS: f64 = 1.5;

/// Maximum frames submitted for one analysis.
pub const DEFAULT_MAX_FRAMES: usize = 12;

/// Compute the sampling offsets for a video of `duration` seconds.
///
/// Returns `min(max_frames, floor(duration / interval) + 1)` offsets, strictly
/// increasing and never beyond `duration`. Offsets are computed as
/// `i * interval` so that rounding error does not accumulate.
pub fn plan_offsets(duration: f64, interval_secs: f64, max_frames: usize) -> Vec<f64> {
    if !duration.is_finite() || duration <= 0.0 || !(interval_secs > 0.0) || max_frames == 0 {
        return Vec::new();
    }

    // `as usize` saturates for huge ratios
    let in_bounds = ((duration / interval_secs).floor() as usize).saturating_add(1);
    let count = in_bounds.min(max_frames);

    (0..count)
        .map(|i| (i as f64 * interval_secs).min(duration))
        .collect()
}

fn validate_arguments(interval_secs: f64, max_frames: usize) -> MediaResult<()> {
    if !interval_secs.is_finite() || interval_secs <= 0.0 {
        return Err(MediaError::invalid_argument(format!(
            "Sampling interval must be a positive number of seconds, got {}",
            interval_secs
        )));
    }
    if max_frames == 0 {
        return Err(MediaError::invalid_argument("max_frames must be at least 1"));
    }
    Ok(())
}

/// Sample still frames from `video`.
///
/// A video with zero or unknown duration yields an empty sequence; callers
/// must treat that as a failure of its own. A resource that cannot be probed
/// or decoded fails with the underlying [`MediaError`]. If a capture fails
/// after at least one frame was taken, sampling stops there and the frames
/// captured so far are returned.
pub async fn sample_frames<D: VideoDecoder>(
    decoder: &D,
    video: &VideoResource,
    interval_secs: f64,
    max_frames: usize,
) -> MediaResult<Vec<SampledFrame>> {
    validate_arguments(interval_secs, max_frames)?;

    let mut cursor = decoder.open(video).await?;
    let duration = cursor.duration();

    let offsets = plan_offsets(duration, interval_secs, max_frames);
    if offsets.is_empty() {
        warn!(
            "Video {} has no usable duration ({}s), no frames sampled",
            video.file_name(),
            duration
        );
        return Ok(Vec::new());
    }

    info!(
        "Sampling {} frames from {} ({:.3}s, every {}s)",
        offsets.len(),
        video.file_name(),
        duration,
        interval_secs
    );

    let mut frames = Vec::with_capacity(offsets.len());
    for offset in offsets {
        match cursor.seek_and_capture(offset).await {
            Ok(image) => {
                debug!("Captured frame at {:.3}s ({} bytes)", offset, image.len());
                frames.push(SampledFrame::new(image, offset));
            }
            Err(e) if frames.is_empty() => return Err(e),
            Err(e) => {
                warn!(
                    "Capture at {:.3}s failed, keeping {} earlier frames: {}",
                    offset,
                    frames.len(),
                    e
                );
                break;
            }
        }
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use litterscan_models::StillImage;
    use std::sync::{Arc, Mutex};

    /// Decoder over a synthetic video that records every seek.
    struct ScriptedDecoder {
        duration: f64,
        fail_open: bool,
        fail_at: Option<f64>,
        seeks: Arc<Mutex<Vec<f64>>>,
    }

    impl ScriptedDecoder {
        fn new(duration: f64) -> Self {
            Self {
                duration,
                fail_open: false,
                fail_at: None,
                seeks: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    struct ScriptedCursor {
        duration: f64,
        fail_at: Option<f64>,
        seeks: Arc<Mutex<Vec<f64>>>,
    }

    #[async_trait]
    impl DecodeCursor for ScriptedCursor {
        fn duration(&self) -> f64 {
            self.duration
        }

        async fn seek_and_capture(&mut self, seconds: f64) -> MediaResult<StillImage> {
            tokio::task::yield_now().await;
            self.seeks.lock().unwrap().push(seconds);
            if self.fail_at == Some(seconds) {
                return Err(MediaError::EmptyFrame(seconds));
            }
            Ok(StillImage::jpeg(format!("frame@{}", seconds).into_bytes()))
        }
    }

    #[async_trait]
    impl VideoDecoder for ScriptedDecoder {
        type Cursor = ScriptedCursor;

        async fn open(&self, _video: &VideoResource) -> MediaResult<ScriptedCursor> {
            if self.fail_open {
                return Err(MediaError::invalid_video("corrupt header"));
            }
            Ok(ScriptedCursor {
                duration: self.duration,
                fail_at: self.fail_at,
                seeks: self.seeks.clone(),
            })
        }
    }

    async fn video() -> VideoResource {
        VideoResource::from_bytes(b"synthetic", "clip.mp4").await.unwrap()
    }

    #[test]
    fn test_plan_offsets_duration_exhausted_before_cap() {
        assert_eq!(
            plan_offsets(10.0, 1.5, 12),
            vec![0.0, 1.5, 3.0, 4.5, 6.0, 7.5, 9.0]
        );
    }

    #[test]
    fn test_plan_offsets_cap_reached_first() {
        assert_eq!(plan_offsets(60.0, 1.5, 12).len(), 12);
        assert_eq!(plan_offsets(60.0, 1.5, 12).last(), Some(&16.5));
    }

    #[test]
    fn test_plan_offsets_short_video_still_gets_first_frame() {
        assert_eq!(plan_offsets(0.4, 1.5, 12), vec![0.0]);
    }

    #[test]
    fn test_plan_offsets_degenerate_inputs() {
        assert!(plan_offsets(0.0, 1.5, 12).is_empty());
        assert!(plan_offsets(f64::NAN, 1.5, 12).is_empty());
        assert!(plan_offsets(f64::INFINITY, 1.5, 12).is_empty());
        assert!(plan_offsets(10.0, 0.0, 12).is_empty());
        assert!(plan_offsets(10.0, 1.5, 0).is_empty());
    }

    #[test]
    fn test_plan_offsets_count_and_bounds() {
        for &duration in &[0.3, 1.0, 2.999, 9.0, 10.0, 47.25, 120.0] {
            for &interval in &[0.1, 0.5, 1.0, 1.5, 3.0, 7.0] {
                for &max in &[1usize, 5, 12, 100] {
                    let offsets = plan_offsets(duration, interval, max);
                    let expected = max.min((duration / interval).floor() as usize + 1);
                    assert_eq!(offsets.len(), expected, "D={} I={} M={}", duration, interval, max);
                    assert_eq!(offsets[0], 0.0);
                    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
                    assert!(offsets.iter().all(|&t| t <= duration));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_sample_frames_in_seek_order() {
        let decoder = ScriptedDecoder::new(10.0);
        let frames = sample_frames(&decoder, &video().await, 1.5, 12).await.unwrap();

        let timestamps: Vec<f64> = frames.iter().map(|f| f.timestamp_seconds).collect();
        assert_eq!(timestamps, vec![0.0, 1.5, 3.0, 4.5, 6.0, 7.5, 9.0]);
        assert_eq!(*decoder.seeks.lock().unwrap(), timestamps);
        assert_eq!(frames[2].image.bytes(), b"frame@3");
    }

    #[tokio::test]
    async fn test_zero_duration_yields_no_frames() {
        let decoder = ScriptedDecoder::new(0.0);
        let frames = sample_frames(&decoder, &video().await, 1.5, 12).await.unwrap();
        assert!(frames.is_empty());
        assert!(decoder.seeks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_video_fails() {
        let mut decoder = ScriptedDecoder::new(10.0);
        decoder.fail_open = true;
        let err = sample_frames(&decoder, &video().await, 1.5, 12).await.unwrap_err();
        assert!(matches!(err, MediaError::InvalidVideo(_)));
    }

    #[tokio::test]
    async fn test_capture_failure_stops_sampling() {
        let mut decoder = ScriptedDecoder::new(10.0);
        decoder.fail_at = Some(0.0);
        let err = sample_frames(&decoder, &video().await, 1.5, 12).await.unwrap_err();
        assert!(matches!(err, MediaError::EmptyFrame(_)));
        assert_eq!(*decoder.seeks.lock().unwrap(), vec![0.0]);
    }

    #[tokio::test]
    async fn test_later_capture_failure_keeps_earlier_frames() {
        let mut decoder = ScriptedDecoder::new(10.0);
        decoder.fail_at = Some(3.0);
        let frames = sample_frames(&decoder, &video().await, 1.5, 12).await.unwrap();

        let timestamps: Vec<f64> = frames.iter().map(|f| f.timestamp_seconds).collect();
        assert_eq!(timestamps, vec![0.0, 1.5]);
        assert_eq!(*decoder.seeks.lock().unwrap(), vec![0.0, 1.5, 3.0]);
    }

    #[tokio::test]
    async fn test_last_capture_failure_keeps_earlier_frames() {
        let mut decoder = ScriptedDecoder::new(10.0);
        decoder.fail_at = Some(9.0);
        let frames = sample_frames(&decoder, &video().await, 1.5, 12).await.unwrap();
        assert_eq!(frames.len(), 6);
        assert_eq!(frames.last().unwrap().timestamp_seconds, 7.5);
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let decoder = ScriptedDecoder::new(10.0);
        let video = video().await;
        assert!(matches!(
            sample_frames(&decoder, &video, 0.0, 12).await,
            Err(MediaError::InvalidArgument(_))
        ));
        assert!(matches!(
            sample_frames(&decoder, &video, 1.5, 0).await,
            Err(MediaError::InvalidArgument(_))
        ));
    }
}
