use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Public LibreTranslate instance, used when no endpoint is configured
const DEFAULT_ENDPOINT: &str = "https://libretranslate.com";

/// Client for a LibreTranslate instance
#[derive(Debug)]
pub struct LibreTranslate {
    /// Instance base URL
    endpoint: String,
    /// Optional API key for keyed instances
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
}

/// Translate request body for the LibreTranslate API
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source locale code
    source: &'a str,
    /// Target locale code
    target: &'a str,
    /// Input format; text only, no HTML handling
    format: &'a str,
    /// API key for keyed instances
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Translate response from the LibreTranslate API
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Translated text
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslate {
    /// Create a client; empty endpoint falls back to the public instance
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        Self {
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", self.endpoint);
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
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

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(body.translated_text)
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}
