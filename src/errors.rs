/*!
 * Error types for the srdsync pipeline.
 *
 * This module contains custom error types for different parts of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the upstream catalog API client
#[derive(Error, Debug)]
pub enum FetchError {
    /// All retry attempts against one URL were exhausted
    #[error("request to {url} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Target URL of the failed request
        url: String,
        /// Total number of attempts made
        attempts: u32,
        /// Last transport error, decode error, or HTTP status seen
        last_error: String,
    },
}

/// Errors that can occur when calling a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

/// Errors that can occur during translation.
///
/// These never abort the pipeline; the gateway degrades to the term
/// override table or to the untranslated source text.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The requested target locale is not supported
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Main pipeline error type that wraps all other errors
#[derive(Error, Debug)]
pub enum SyncError {
    /// Error from the catalog API
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error writing an output document
    #[error("Write error for {path}: {message}")]
    Write {
        /// Output file path
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),
}
