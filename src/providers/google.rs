use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Default public endpoint used by the gtx web client
const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for the unauthenticated Google web-translation endpoint
#[derive(Debug)]
pub struct Google {
    /// Endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl Google {
    /// Create a new client against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a new client against a specific endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for Google {
    /// The endpoint answers a nested array; segment `i` of the translation
    /// lives at `[0][i][0]`. Segments are concatenated in order.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimitExceeded(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let segments = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProviderError::ParseError("missing segment array".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError(
                "empty translation in response".to_string(),
            ));
        }

        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
