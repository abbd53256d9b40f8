//! Incident and analysis result models.
//!
//! Field names follow the inference contract (`camelCase`), so the same types
//! are used to decode the service response and to emit the final report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::image::StillImage;
use crate::timestamp::{parse_timestamp, TimestampError};

/// Display text for an empty license plate.
pub const LICENSE_PLATE_NOT_VISIBLE: &str = "NOT VISIBLE";

/// One detected littering incident.
///
/// Every field except `thumbnail` comes from the inference service and is
/// untrusted: `timestamp` may not parse, `confidence` may fall outside
/// `[0, 1]`, and `license_plate` may be empty or a free-text placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Identifier assigned by the service, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Offset in seconds, as reported (e.g. "5.2")
    pub timestamp: String,
    /// Vehicle color and type
    pub vehicle_description: String,
    /// What the rider or passenger did
    pub action_description: String,
    /// Plate text as read by the service
    pub license_plate: String,
    /// Service confidence, passed through unmodified
    pub confidence: f64,
    /// Still captured at `timestamp`, attached after inference
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<StillImage>,
}

impl Incident {
    /// Service-assigned id, treating an empty string as absent.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Incident offset in seconds, or `None` if the reported timestamp is
    /// malformed or not finite.
    pub fn timestamp_seconds(&self) -> Option<f64> {
        parse_timestamp(&self.timestamp).ok()
    }

    /// Position the playback widget should seek to for this incident.
    ///
    /// A negative offset seeks to the start; a malformed one gives `None`.
    pub fn seek_target(&self) -> Option<f64> {
        match parse_timestamp(&self.timestamp) {
            Ok(seconds) => Some(seconds),
            Err(TimestampError::Negative) => Some(0.0),
            Err(_) => None,
        }
    }

    /// Short human label for the incident time, e.g. `"5.2s"`.
    pub fn timestamp_label(&self) -> String {
        match self.timestamp_seconds() {
            Some(secs) => format!("{:.1}s", secs),
            None => self.timestamp.clone(),
        }
    }

    /// Plate text for display, substituting a placeholder when empty.
    pub fn license_plate_display(&self) -> &str {
        let plate = self.license_plate.trim();
        if plate.is_empty() {
            LICENSE_PLATE_NOT_VISIBLE
        } else {
            plate
        }
    }

    /// Confidence as a whole percentage, clamped to `0..=100` for display.
    ///
    /// The stored `confidence` itself is never modified.
    pub fn confidence_percent(&self) -> u8 {
        if !self.confidence.is_finite() {
            return 0;
        }
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}

/// Ordered incidents for one analysis run.
///
/// Order is the order returned by the inference service; it is not sorted by
/// timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    pub incidents: Vec<Incident>,
}

impl AnalysisResult {
    pub fn new(incidents: Vec<Incident>) -> Self {
        Self { incidents }
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// True when the service found no violation.
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    pub fn thumbnail_count(&self) -> usize {
        self.incidents.iter().filter(|i| i.has_thumbnail()).count()
    }
}
