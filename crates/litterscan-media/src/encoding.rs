//! Still-image encoding settings.

use crate::error::{MediaError, MediaResult};

/// JPEG quality used for sampled frames and thumbnails (0-1 scale).
pub const DEFAULT_JPEG_QUALITY: f32 = 0.8;

/// Best and worst values of FFmpeg's MJPEG `-q:v` scale.
const QSCALE_BEST: f32 = 2.0;
const QSCALE_WORST: f32 = 31.0;

/// JPEG quality factor on a 0-1 scale, where 1 is best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JpegQuality(f32);

impl JpegQuality {
    /// Validate a quality factor in `(0, 1]`.
    pub fn new(quality: f32) -> MediaResult<Self> {
        if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
            return Err(MediaError::invalid_argument(format!(
                "JPEG quality must be in (0, 1], got {}",
                quality
            )));
        }
        Ok(Self(quality))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Equivalent FFmpeg MJPEG quality scale (2 = best, 31 = worst).
    pub fn qscale(&self) -> u8 {
        (QSCALE_BEST + (1.0 - self.0) * (QSCALE_WORST - QSCALE_BEST)).round() as u8
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self(DEFAULT_JPEG_QUALITY)
    }
}
