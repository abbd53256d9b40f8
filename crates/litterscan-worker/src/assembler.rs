//! Incident report assembly.
//!
//! Attaches a thumbnail to every incident whose timestamp can be parsed.
//! Captures run concurrently, bounded by `max_parallel`, each on its own
//! decode cursor. A failed or skipped capture leaves the incident in the
//! report without a thumbnail; assembly itself never fails.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use litterscan_media::{capture_at, VideoDecoder, VideoResource};
use litterscan_models::{AnalysisResult, Incident};

use crate::metrics::{record_thumbnail, ThumbnailOutcome};

/// Return `result` with thumbnails attached, preserving incident order.
pub async fn assemble<D: VideoDecoder>(
    decoder: &D,
    result: AnalysisResult,
    video: &VideoResource,
    max_parallel: usize,
) -> AnalysisResult {
    let incidents: Vec<Incident> = stream::iter(result.incidents.into_iter().enumerate())
        .map(|(index, incident)| attach_thumbnail(decoder, video, index, incident))
        .buffered(max_parallel.max(1))
        .collect()
        .await;

    AnalysisResult::new(incidents)
}

async fn attach_thumbnail<D: VideoDecoder>(
    decoder: &D,
    video: &VideoResource,
    index: usize,
    mut incident: Incident,
) -> Incident {
    let Some(seconds) = incident.timestamp_seconds() else {
        warn!(
            index,
            timestamp = %incident.timestamp,
            "Unparseable incident timestamp, skipping thumbnail"
        );
        record_thumbnail(ThumbnailOutcome::Skipped);
        return incident;
    };

    match capture_at(decoder, video, seconds).await {
        Ok(image) => {
            debug!(index, seconds, bytes = image.len(), "Attached thumbnail");
            incident.thumbnail = Some(image);
            record_thumbnail(ThumbnailOutcome::Captured);
        }
        Err(e) => {
            warn!(index, seconds, "Thumbnail capture failed: {}", e);
            record_thumbnail(ThumbnailOutcome::Failed);
        }
    }
    incident
}
