use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// MyMemory public lookup endpoint
const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Client for the MyMemory public translation endpoint
#[derive(Debug)]
pub struct MyMemory {
    /// Endpoint URL
    endpoint: String,
    /// Contact email; raises the anonymous daily quota when present
    email: Option<String>,
    /// HTTP client for making requests
    client: Client,
}

/// Response envelope from the MyMemory API
#[derive(Debug, Deserialize)]
struct LookupResponse {
    /// Numeric status; quota errors arrive here with a 200 transport status
    #[serde(rename = "responseStatus")]
    response_status: serde_json::Value,
    /// Match payload
    #[serde(rename = "responseData")]
    response_data: Option<LookupData>,
}

/// Match payload from the MyMemory API
#[derive(Debug, Deserialize)]
struct LookupData {
    /// Best-match translated text
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemory {
    /// Create a client for the public endpoint
    pub fn new(email: Option<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Provider for MyMemory {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let langpair = format!("{}|{}", source, target);
        let mut query: Vec<(&str, &str)> = vec![("q", text), ("langpair", &langpair)];
        if let Some(email) = &self.email {
            query.push(("de", email));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
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

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // The envelope status can be a number or a stringified number.
        let envelope_status = match &body.response_status {
            serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
            serde_json::Value::String(s) => s.parse::<u64>().unwrap_or(0),
            _ => 0,
        };

        let translated = body
            .response_data
            .and_then(|d| d.translated_text)
            .unwrap_or_default();

        if envelope_status != 200 {
            if envelope_status == 429 {
                return Err(ProviderError::RateLimitExceeded(translated));
            }
            return Err(ProviderError::ApiError {
                status_code: envelope_status as u16,
                message: translated,
            });
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError(
                "empty translation in response".to_string(),
            ));
        }

        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "mymemory"
    }
}
