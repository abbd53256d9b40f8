//! Gemini HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use litterscan_models::{AnalysisResult, SampledFrame};

use crate::error::{InferenceError, InferenceResult};
use crate::prompt::build_request;
use crate::response::parse_analysis;
use crate::types::GenerateContentResponse;

/// Default model used for frame analysis.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default Gemini API origin.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Something that can turn sampled frames into incidents.
#[async_trait]
pub trait IncidentDetector: Send + Sync {
    /// Submit `frames` for analysis. Exactly one request per call; no retries.
    async fn analyze(&self, frames: &[SampledFrame]) -> InferenceResult<AnalysisResult>;
}

/// Configuration for the Gemini client.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Model name
    pub model: String,
    /// API origin
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Config with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> InferenceResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| InferenceError::config("GEMINI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
    endpoint: Url,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> InferenceResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(InferenceError::config("Gemini API key is empty"));
        }
        if config.model.trim().is_empty() {
            return Err(InferenceError::config("Gemini model name is empty"));
        }

        let endpoint = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        ))
        .map_err(|e| InferenceError::config(format!("Invalid Gemini base URL: {}", e)))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(InferenceError::Network)?;

        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> InferenceResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send the frames and return the raw structured text.
    async fn generate(&self, frames: &[SampledFrame]) -> InferenceResult<String> {
        let request = build_request(frames);

        debug!(
            "Sending {} frames to {} (model {})",
            frames.len(),
            self.endpoint,
            self.config.model
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::service(format!(
                "Gemini API returned {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(reason) = envelope.block_reason() {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        Ok(envelope.text())
    }

    fn map_transport_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout(self.config.timeout)
        } else {
            InferenceError::Network(e)
        }
    }
}

#[async_trait]
impl IncidentDetector for GeminiClient {
    async fn analyze(&self, frames: &[SampledFrame]) -> InferenceResult<AnalysisResult> {
        if frames.is_empty() {
            return Err(InferenceError::NoFrames);
        }

        let started = Instant::now();
        let text = self.generate(frames).await?;

        let result = parse_analysis(&text).map_err(|e| {
            if let Some(raw) = e.raw_response() {
                warn!("Failed to parse AI response: {}", raw);
            }
            e
        })?;

        info!(
            "Gemini returned {} incidents for {} frames in {:?}",
            result.len(),
            frames.len(),
            started.elapsed()
        );
        Ok(result)
    }
}
