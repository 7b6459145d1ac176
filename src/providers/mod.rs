/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported machine
 * translation providers:
 * - Google: unauthenticated public `translate_a/single` endpoint
 * - LibreTranslate: self-hosted instance, API key optional
 * - MyMemory: public quota-limited endpoint, contact email optional
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably behind the gateway.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate `text` from `source` to `target` locale
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;

    /// Stable provider identifier, recorded in output document envelopes
    fn name(&self) -> &'static str;
}

pub mod google;
pub mod libretranslate;
pub mod mock;
pub mod mymemory;
