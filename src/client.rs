use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

use crate::error::InferenceError;
use crate::types::{DescribeConfig, GenerateRequest, GenerateResponse, TagsResponse};

/// The two calls the batch processor and model discovery need from an
/// inference server.
///
/// [`OllamaClient`] is the real implementation; tests substitute their own.
pub trait InferenceClient {
    /// Submit one non-streaming generate request and return the description.
    ///
    /// A missing `response` field yields [`crate::NO_RESPONSE_TEXT`]; an
    /// HTTP 400 yields [`InferenceError::NotVisionCapable`].
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String, InferenceError>> + Send;

    /// Names of every installed model, in server order.
    fn list_models(&self) -> impl Future<Output = Result<Vec<String>, InferenceError>> + Send;
}

/// Async client for a local Ollama server.
///
/// # Example
/// ```no_run
/// use ollama_describe::{GenerateRequest, InferenceClient, OllamaClient};
///
/// # async fn example() -> Result<(), ollama_describe::InferenceError> {
/// let client = OllamaClient::new("http://localhost:11434");
/// let request = GenerateRequest::new("llava:latest", "Describe this image", "iVBORw0...".into());
/// let description = client.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a client for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout: DescribeConfig::default().timeout,
        }
    }

    /// Create a client from a [`DescribeConfig`].
    pub fn from_config(config: &DescribeConfig) -> Self {
        Self::new(config.endpoint.clone()).with_timeout(config.timeout)
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn connection_error(&self, source: reqwest::Error) -> InferenceError {
        InferenceError::Connection {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

impl InferenceClient for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.endpoint);
        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = resp.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(InferenceError::NotVisionCapable {
                model: request.model.clone(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into_description())
    }

    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let url = format!("{}/api/tags", self.endpoint);
        let resp = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Http { status, body });
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
