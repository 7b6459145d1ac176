/*!
 * Resilient JSON retrieval against the upstream catalog API.
 *
 * The upstream is a single trusted host queried at low volume, so the
 * retry policy is deliberately simple: a fixed attempt ceiling with
 * linearly increasing backoff and no jitter or circuit breaking.
 */

use log::warn;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::errors::FetchError;

/// Host serving the catalog; root-relative `/api/...` paths resolve here.
pub const DEFAULT_API_ROOT: &str = "https://www.dnd5eapi.co";

/// Versioned API base; bare paths like `spells` resolve here.
pub const DEFAULT_API_BASE: &str = "https://www.dnd5eapi.co/api/2014";

/// Total attempts per request, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Backoff grows linearly: `BACKOFF_BASE_MS * attempt`.
const BACKOFF_BASE_MS: u64 = 300;

/// Run `op` up to `max_attempts` times, sleeping `backoff_base_ms * attempt`
/// between attempts. The terminal error names the target and the last
/// error seen.
pub async fn with_retry<T, E, F, Fut>(
    target: &str,
    max_attempts: u32,
    backoff_base_ms: u64,
    mut op: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = e.to_string();
                warn!(
                    "[fetch] {} failed (attempt {}/{}): {}",
                    target, attempt, max_attempts, last_error
                );
            }
        }

        if attempt < max_attempts {
            tokio::time::sleep(Duration::from_millis(backoff_base_ms * attempt as u64)).await;
        }
    }

    Err(FetchError::RetriesExhausted {
        url: target.to_string(),
        attempts: max_attempts,
        last_error,
    })
}

/// Client for the upstream catalog API
#[derive(Clone)]
pub struct ApiClient {
    /// Host root, for `/api/...`-relative paths
    api_root: String,
    /// Versioned API base, for bare relative paths
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

impl ApiClient {
    /// Create a client against the default catalog host
    pub fn new() -> Self {
        Self::with_base(DEFAULT_API_ROOT, DEFAULT_API_BASE)
    }

    /// Create a client against a specific host root and versioned base
    pub fn with_base(api_root: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_root: trim_trailing_slash(api_root.into()),
            base_url: trim_trailing_slash(base_url.into()),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Versioned API base this client resolves bare paths against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the absolute form, the host root, or the
    /// versioned base.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with("/api") {
            format!("{}{}", self.api_root, path)
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Fetch a path and decode the body as JSON, retrying per the module
    /// policy. A non-success status and a transport or decode failure are
    /// all retried; the terminal error carries the URL and last cause.
    pub async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.resolve_url(path);
        let client = self.client.clone();

        with_retry(&url, MAX_ATTEMPTS, BACKOFF_BASE_MS, || {
            let client = client.clone();
            let url = url.clone();
            async move {
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| format!("request error: {}", e))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(format!("HTTP status {}", status));
                }

                response
                    .json::<Value>()
                    .await
                    .map_err(|e| format!("decode error: {}", e))
            }
        })
        .await
    }

    /// Fetch a list endpoint and return its `results` array.
    ///
    /// List endpoints answer `{count, results: [{index, name, url}]}`; a
    /// missing or non-array `results` yields an empty list.
    pub async fn get_results(&self, path: &str) -> Result<Vec<Value>, FetchError> {
        let body = self.get_json(path).await?;
        Ok(body
            .get("results")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}
