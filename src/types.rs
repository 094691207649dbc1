use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prompt used when the caller does not supply one.
pub const DEFAULT_PROMPT: &str =
    "Describe this image, highlighting any notable details (including visible text):";

/// Model used when discovery finds nothing to offer.
pub const DEFAULT_MODEL: &str = "llava:latest";

/// Description recorded when the server answers without a `response` field.
pub const NO_RESPONSE_TEXT: &str = "No response provided by API";

/// Report text for an image rejected with HTTP 400.
pub const VISION_UNSUPPORTED_MESSAGE: &str = "Error: Model doesn't support image analysis";

/// Runtime configuration shared by the client and the batch processor.
///
/// Use [`DescribeConfig::builder()`] for ergonomic construction, or
/// [`DescribeConfig::default()`] for the local-Ollama defaults.
#[derive(Debug, Clone)]
pub struct DescribeConfig {
    /// Ollama API endpoint (e.g., "http://localhost:11434")
    pub endpoint: String,
    /// Per-request timeout (default: 120s)
    pub timeout: Duration,
    /// Directory scanned when no explicit image is given (default: `data`)
    pub data_dir: PathBuf,
    /// Directory receiving the timestamped reports (default: `outputs`)
    pub outputs_dir: PathBuf,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            timeout: Duration::from_secs(120),
            data_dir: PathBuf::from("data"),
            outputs_dir: PathBuf::from("outputs"),
        }
    }
}

impl DescribeConfig {
    /// Start building a config with the builder pattern.
    pub fn builder() -> DescribeConfigBuilder {
        DescribeConfigBuilder::default()
    }
}

/// Builder for [`DescribeConfig`].
#[derive(Default)]
pub struct DescribeConfigBuilder {
    config: DescribeConfig,
}

impl DescribeConfigBuilder {
    /// Set the Ollama endpoint. A trailing slash is dropped.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the default input directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set the report output directory.
    pub fn with_outputs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.outputs_dir = dir.into();
        self
    }

    /// Build the final [`DescribeConfig`].
    pub fn build(self) -> DescribeConfig {
        self.config
    }
}

/// Body of `POST /api/generate`. Built fresh for every image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub images: Vec<String>,
}

impl GenerateRequest {
    /// Non-streaming request carrying a single base64 image.
    pub fn new(model: &str, prompt: &str, image_b64: String) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            images: vec![image_b64],
        }
    }
}

/// The part of the `/api/generate` reply we read. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl GenerateResponse {
    /// The description text, or [`NO_RESPONSE_TEXT`] when absent.
    pub fn into_description(self) -> String {
        self.response.unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())
    }
}

/// `GET /api/tags` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

/// One installed model as listed by `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub name: String,
}

/// Summary of a finished batch whose report was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub report_path: PathBuf,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}
