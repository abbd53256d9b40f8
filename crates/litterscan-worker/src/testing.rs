//! In-memory decoder and detector used by the pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use litterscan_inference::{IncidentDetector, InferenceError, InferenceResult};
use litterscan_media::{DecodeCursor, MediaError, MediaResult, VideoDecoder, VideoResource};
use litterscan_models::{AnalysisResult, Incident, SampledFrame, StillImage};

#[derive(Clone, Default)]
pub struct Counters {
    pub opened: Arc<AtomicUsize>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    pub captures: Arc<Mutex<Vec<f64>>>,
}

/// Decoder over a synthetic video of fixed duration.
///
/// Captures at `fail_at` fail. Each capture sleeps for `delay_per_sec`
/// milliseconds per second of *remaining* video, so later offsets finish first.
pub struct FakeDecoder {
    pub duration: f64,
    pub fail_open: bool,
    pub fail_at: Option<f64>,
    pub delay_per_sec: u64,
    pub counters: Counters,
}

impl FakeDecoder {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            fail_open: false,
            fail_at: None,
            delay_per_sec: 0,
            counters: Counters::default(),
        }
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn captures(&self) -> Vec<f64> {
        self.counters.captures.lock().unwrap().clone()
    }
}

pub struct FakeCursor {
    duration: f64,
    fail_at: Option<f64>,
    delay_per_sec: u64,
    counters: Counters,
}

#[async_trait]
impl DecodeCursor for FakeCursor {
    fn duration(&self) -> f64 {
        self.duration
    }

    async fn seek_and_capture(&mut self, seconds: f64) -> MediaResult<StillImage> {
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let remaining = (self.duration - seconds).max(0.0);
        let delay = (remaining * self.delay_per_sec as f64) as u64;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.counters.captures.lock().unwrap().push(seconds);

        if self.fail_at == Some(seconds) {
            return Err(MediaError::EmptyFrame(seconds));
        }
        Ok(StillImage::jpeg(format!("frame@{}", seconds).into_bytes()))
    }
}

#[async_trait]
impl VideoDecoder for FakeDecoder {
    type Cursor = FakeCursor;

    async fn open(&self, _video: &VideoResource) -> MediaResult<FakeCursor> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(MediaError::invalid_video("moov atom not found"));
        }
        Ok(FakeCursor {
            duration: self.duration,
            fail_at: self.fail_at,
            delay_per_sec: self.delay_per_sec,
            counters: self.counters.clone(),
        })
    }
}

/// Scripted reply of a [`FakeDetector`].
pub enum Reply {
    Incidents(Vec<Incident>),
    Empty,
    Unavailable,
}

pub struct FakeDetector {
    reply: Reply,
    pub calls: AtomicUsize,
    pub frames_seen: Mutex<Vec<f64>>,
}

impl FakeDetector {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            frames_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IncidentDetector for FakeDetector {
    async fn analyze(&self, frames: &[SampledFrame]) -> InferenceResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.frames_seen.lock().unwrap() = frames.iter().map(|f| f.timestamp_seconds).collect();
        match &self.reply {
            Reply::Incidents(incidents) => Ok(AnalysisResult::new(incidents.clone())),
            Reply::Empty => Err(InferenceError::EmptyResponse),
            Reply::Unavailable => Err(InferenceError::service("Gemini API returned 503")),
        }
    }
}

pub fn incident(id: &str, timestamp: &str) -> Incident {
    Incident {
        id: Some(id.to_string()),
        timestamp: timestamp.to_string(),
        vehicle_description: "red scooter".to_string(),
        action_description: "dropped a bottle".to_string(),
        license_plate: String::new(),
        confidence: 0.9,
        thumbnail: None,
    }
}

pub async fn video() -> VideoResource {
    VideoResource::from_bytes(b"synthetic", "street.mp4")
        .await
        .unwrap()
}
