//! The extraction contract sent with every analysis request.

use serde_json::json;

use litterscan_models::SampledFrame;

use crate::types::{Blob, Content, GenerateContentRequest, GenerationConfig, Part};

/// Task instruction preceding the frame images.
pub const TASK_INSTRUCTION: &str = r#"Analyze this sequence of images from a surveillance camera.
Your objective is to identify any 'two-wheeler' (motorcycle, scooter, bike) where the rider or passenger is disposing of waste (littering).

For each incident found:
1. Identify the 'timestamp' in seconds relative to the start of the video (e.g., "5.2").
2. Provide a 'vehicleDescription' (color, type).
3. Describe the 'actionDescription' (e.g., "threw a plastic bag").
4. Extract the 'licensePlate' number from the vehicle if visible. Be as precise as possible.
5. Assign a 'confidence' score between 0 and 1.

If no incident is found, return an empty list of incidents."#;

/// Response MIME type requested from the service.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Fields every incident must carry.
pub const REQUIRED_INCIDENT_FIELDS: [&str; 5] = [
    "timestamp",
    "vehicleDescription",
    "actionDescription",
    "licensePlate",
    "confidence",
];

/// Output schema the service is asked to follow.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "incidents": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "timestamp": { "type": "STRING" },
                        "vehicleDescription": { "type": "STRING" },
                        "actionDescription": { "type": "STRING" },
                        "licensePlate": { "type": "STRING" },
                        "confidence": { "type": "NUMBER" }
                    },
                    "required": REQUIRED_INCIDENT_FIELDS
                }
            }
        },
        "required": ["incidents"]
    })
}

/// Build the single request carrying the instruction and every frame, in order.
pub fn build_request(frames: &[SampledFrame]) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(frames.len() + 1);
    parts.push(Part::Text(TASK_INSTRUCTION.to_string()));
    parts.extend(frames.iter().map(|frame| {
        Part::InlineData(Blob {
            mime_type: frame.image.mime_type().to_string(),
            data: frame.image.to_base64(),
        })
    }));

    GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            response_schema: response_schema(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litterscan_models::StillImage;

    fn frames() -> Vec<SampledFrame> {
        vec![
            SampledFrame::new(StillImage::jpeg(vec![0xFF, 0xD8, 0xFF]), 0.0),
            SampledFrame::new(StillImage::jpeg(vec![0xFF, 0xD8, 0xFE]), 1.5),
        ]
    }

    #[test]
    fn test_request_layout() {
        let request = serde_json::to_value(build_request(&frames())).unwrap();
        let parts = request["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], TASK_INSTRUCTION);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "/9j/");
        assert_eq!(parts[2]["inlineData"]["data"], "/9j+");
        assert_eq!(
            request["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_schema_contract() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["incidents"]));

        let items = &schema["properties"]["incidents"]["items"];
        assert_eq!(items["properties"]["confidence"]["type"], "NUMBER");
        assert_eq!(items["properties"]["timestamp"]["type"], "STRING");

        let required: Vec<&str> = items["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, REQUIRED_INCIDENT_FIELDS);
        assert!(!required.contains(&"id"));
    }

    #[test]
    fn test_instruction_mentions_every_field() {
        for field in REQUIRED_INCIDENT_FIELDS {
            assert!(TASK_INSTRUCTION.contains(field), "missing {}", field);
        }
    }
}
