//! Encoded still images.

use base64::{engine::general_purpose::STANDARD, Engine};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// MIME type of every still produced by the media layer.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// A single encoded still image (JPEG).
///
/// Serialized as a base64 string so that reports can be emitted as plain JSON.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StillImage {
    /// Encoded image bytes
    #[serde(serialize_with = "serialize_base64", deserialize_with = "deserialize_base64")]
    #[schemars(with = "String")]
    data: Vec<u8>,
    /// MIME type of `data`
    mime_type: String,
}

impl StillImage {
    /// Wrap JPEG-encoded bytes.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: JPEG_MIME_TYPE.to_string(),
        }
    }

    /// Raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Standard base64 encoding of the bytes (no data-URL prefix).
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// `data:` URL suitable for embedding in an `<img>` tag.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

impl std::fmt::Debug for StillImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StillImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

fn deserialize_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded).map_err(serde::de::Error::custom)
}
