//! Sampled video frames.

use serde::{Deserialize, Serialize};

use crate::image::StillImage;

/// One still captured from a video at a known offset.
///
/// Produced by the frame sampler in strictly increasing `timestamp_seconds`
/// order; never outlives the analysis run that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledFrame {
    /// JPEG-encoded still
    pub image: StillImage,
    /// Offset from the start of the video in seconds
    pub timestamp_seconds: f64,
}

impl SampledFrame {
    pub fn new(image: StillImage, timestamp_seconds: f64) -> Self {
        Self {
            image,
            timestamp_seconds,
        }
    }
}
