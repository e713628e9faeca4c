use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, Translator};

/// Public web endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate client for the public `translate_a/single` endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Optional rate limit in requests per minute
    rate_limit: Option<u32>,
    /// Time of the last request, for client-side rate limiting
    last_request: Mutex<Option<Instant>>,
}

/// Translation request
#[derive(Debug, Clone, Serialize)]
pub struct GoogleRequest {
    /// Text to translate
    pub q: String,
    /// Source language code (`auto` for detection)
    pub sl: String,
    /// Target language code
    pub tl: String,
}

impl GoogleRequest {
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: text.into(),
            sl: source.into(),
            tl: target.into(),
        }
    }
}

/// Translation response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleResponse {
    /// Translated segments in order
    pub segments: Vec<String>,
    /// Source language reported by the service
    pub detected_source: Option<String>,
}

impl GoogleResponse {
    /// Parse the nested-array payload: `[[["translated", "source", ...], ...], null, "en", ...]`
    pub fn from_json(value: &Value) -> Result<Self, ProviderError> {
        let sentences = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

        let segments = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        let detected_source = value.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            segments,
            detected_source,
        })
    }
}

impl GoogleTranslate {
    /// Create a client for the default endpoint
    pub fn new() -> Self {
        Self::new_with_config(DEFAULT_ENDPOINT, 30, 3, 1000, None)
    }

    /// Create a client with configuration
    pub fn new_with_config(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        rate_limit: Option<u32>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
            rate_limit,
            last_request: Mutex::new(None),
        }
    }

    fn request_url(&self, request: &GoogleRequest) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("dt", "t"),
                ("sl", request.sl.as_str()),
                ("tl", request.tl.as_str()),
                ("q", request.q.as_str()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    /// Space requests according to the configured requests per minute
    async fn wait_for_rate_limit(&self) {
        let Some(rate_limit) = self.rate_limit.filter(|r| *r > 0) else {
            return;
        };
        let interval = Duration::from_millis(60_000 / rate_limit as u64);

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                tokio::time::sleep(interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleRequest;
    type Response = GoogleResponse;

    /// Send a translation request with retry logic
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = self.request_url(&request)?;

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            self.wait_for_rate_limit().await;

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let value: Value = response
                            .json()
                            .await
                            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
                        return GoogleResponse::from_json(&value);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        warn!("Google Translate rate limit hit - attempt {}/{}", attempt + 1, self.max_retries + 1);
                        last_error = Some(ProviderError::RateLimitExceeded(error_text));
                    } else if status.is_server_error() {
                        // Server error - can retry
                        error!(
                            "Google Translate error ({}): {} - attempt {}/{}",
                            status,
                            error_text,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message: error_text,
                        });
                    } else {
                        // Client error - don't retry
                        error!("Google Translate error ({}): {}", status, error_text);
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message: error_text,
                        });
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!(
                        "Google Translate network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;

            // If we have more retries left, wait with exponential backoff
            if attempt <= self.max_retries {
                let backoff = self.backoff(attempt);
                debug!("Retrying Google Translate request in {:?}", backoff);
                tokio::time::sleep(backoff).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed("Google Translate request failed after all retries".to_string())
        }))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(GoogleRequest::new("hello", "en", "fr")).await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat()
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .complete(GoogleRequest::new(text, source_language, target_language))
            .await?;
        if let Some(detected) = &response.detected_source {
            debug!("Google Translate detected source language '{}'", detected);
        }
        Ok(Self::extract_text(&response))
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        self.test_connection().await
    }
}
