//! Single-shot thumbnail capture at an arbitrary offset.

use tracing::debug;

use litterscan_models::StillImage;

use crate::decoder::{check_seek_target, DecodeCursor, VideoDecoder};
use crate::error::{MediaError, MediaResult};
use crate::resource::VideoResource;

/// Capture one still from `video` at `seconds`.
///
/// Opens a fresh cursor, so concurrent calls on the same resource never share
/// decoder state. Fails if `seconds` is not finite or lies outside
/// `[0, duration]`.
pub async fn capture_at<D: VideoDecoder>(
    decoder: &D,
    video: &VideoResource,
    seconds: f64,
) -> MediaResult<StillImage> {
    if !seconds.is_finite() {
        return Err(MediaError::invalid_argument(format!(
            "Thumbnail timestamp must be finite, got {}",
            seconds
        )));
    }

    let mut cursor = decoder.open(video).await?;
    check_seek_target(seconds, cursor.duration())?;

    let image = cursor.seek_and_capture(seconds).await?;
    debug!("Captured thumbnail at {:.3}s ({} bytes)", seconds, image.len());
    Ok(image)
}
