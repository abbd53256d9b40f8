//! Validation of the structured text returned by the service.
//!
//! The schema sent with the request is only a hint to the model, so every
//! response is parsed strictly here. Wrong field types are rejected rather
//! than coerced; only `id` may be missing or null.

use serde::Deserialize;

use litterscan_models::{AnalysisResult, Incident};

use crate::error::{InferenceError, InferenceResult};

#[derive(Debug, Deserialize)]
struct IncidentsEnvelope {
    incidents: Vec<Incident>,
}

/// Parse the service's structured text into an [`AnalysisResult`].
///
/// - empty or whitespace-only text fails with [`InferenceError::EmptyResponse`]
/// - anything that is not `{ "incidents": [...] }` with correctly typed
///   fields fails with [`InferenceError::MalformedResponse`], keeping the text
/// - `{ "incidents": [] }` is a valid "nothing found" result
pub fn parse_analysis(text: &str) -> InferenceResult<AnalysisResult> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    let json = strip_code_fence(trimmed);
    let envelope: IncidentsEnvelope = serde_json::from_str(json)
        .map_err(|e| InferenceError::malformed(e.to_string(), text))?;

    Ok(AnalysisResult::new(envelope.incidents))
}

/// Remove a surrounding markdown code fence (```` ```json ... ``` ````).
fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_INCIDENT: &str = r#"{"incidents":[{"timestamp":"5.2","vehicleDescription":"red scooter","actionDescription":"threw a bag","licensePlate":"AB12CD","confidence":0.87}]}"#;

    #[test]
    fn test_empty_incidents_is_success() {
        let result = parse_analysis(r#"{"incidents":[]}"#).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_parses_incident_fields() {
        let result = parse_analysis(ONE_INCIDENT).unwrap();
        assert_eq!(result.len(), 1);

        let incident = &result.incidents[0];
        assert_eq!(incident.id, None);
        assert_eq!(incident.timestamp, "5.2");
        assert_eq!(incident.vehicle_description, "red scooter");
        assert_eq!(incident.action_description, "threw a bag");
        assert_eq!(incident.license_plate, "AB12CD");
        assert_eq!(incident.confidence, 0.87);
        assert!(incident.thumbnail.is_none());
    }

    #[test]
    fn test_preserves_service_order() {
        let text = r#"{"incidents":[
            {"id":"b","timestamp":"9","vehicleDescription":"v","actionDescription":"a","licensePlate":"","confidence":0.5},
            {"id":"a","timestamp":"1","vehicleDescription":"v","actionDescription":"a","licensePlate":"","confidence":0.5}
        ]}"#;
        let result = parse_analysis(text).unwrap();
        let ids: Vec<_> = result.incidents.iter().map(|i| i.id().unwrap()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(parse_analysis(""), Err(InferenceError::EmptyResponse)));
        assert!(matches!(parse_analysis(" \n\t"), Err(InferenceError::EmptyResponse)));
    }

    #[test]
    fn test_invalid_text_keeps_raw() {
        let err = parse_analysis("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse { .. }));
        assert_eq!(err.raw_response(), Some("Sorry, I cannot help with that."));
    }

    #[test]
    fn test_missing_incidents_field_is_malformed() {
        let err = parse_analysis(r#"{"results":[]}"#).unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse { .. }));
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let text = r#"{"incidents":[{"timestamp":"1","vehicleDescription":"v","actionDescription":"a","licensePlate":"X","confidence":"high"}]}"#;
        assert!(matches!(
            parse_analysis(text),
            Err(InferenceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let text = r#"{"incidents":[{"timestamp":"1","vehicleDescription":"v","actionDescription":"a","confidence":0.4}]}"#;
        assert!(matches!(
            parse_analysis(text),
            Err(InferenceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_out_of_range_confidence_passes_through() {
        let text = r#"{"incidents":[{"id":null,"timestamp":"1","vehicleDescription":"v","actionDescription":"a","licensePlate":"X","confidence":-3.5}]}"#;
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.incidents[0].confidence, -3.5);
        assert_eq!(result.incidents[0].id, None);
    }

    #[test]
    fn test_code_fenced_json() {
        let fenced = "```json\n{\"incidents\":[]}\n```";
        assert!(parse_analysis(fenced).unwrap().is_empty());

        let bare_fence = "```\n{\"incidents\":[]}\n```";
        assert!(parse_analysis(bare_fence).unwrap().is_empty());
    }

    #[test]
    fn test_strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence(r#"{"a":1}"#), r#"{"a":1}"#);
    }
}
