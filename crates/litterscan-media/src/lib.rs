#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for video frame extraction.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Video probing via FFprobe
//! - Read-only video resources (files or spooled uploads)
//! - Decode cursors with one-seek-at-a-time semantics
//! - Deterministic interval frame sampling
//! - On-demand thumbnail capture at arbitrary offsets

pub mod command;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod probe;
pub mod resource;
pub mod sampler;
pub mod thumbnail;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use decoder::{DecodeCursor, FfmpegCursor, FfmpegDecoder, VideoDecoder};
pub use encoding::{JpegQuality, DEFAULT_JPEG_QUALITY};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_video, VideoInfo};
pub use resource::VideoResource;
pub use sampler::{plan_offsets, sample_frames, DEFAULT_FRAME_INTERVAL_SECS, DEFAULT_MAX_FRAMES};
pub use thumbnail::capture_at;
