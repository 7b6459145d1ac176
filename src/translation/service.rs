/*!
 * Core translation gateway implementation.
 *
 * This module contains the main TranslationService struct, which ties the
 * pluggable provider, the global pacing gate, the memo cache, the term
 * overrides and the chunker together behind one call:
 * `translate_text(text, target)`.
 *
 * Translation failure is never fatal: a failed provider call degrades to
 * a term-override hit when one matches, and otherwise to the untranslated
 * source text.
 */

use log::{debug, warn};

use crate::app_config::{TranslationConfig, TranslationProvider as ProviderKind};
use crate::providers::Provider;
use crate::providers::google::Google;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::mymemory::MyMemory;
use crate::translation::cache::TranslationCache;
use crate::translation::glossary;
use crate::translation::segment::chunk_text;
use crate::translation::throttle::Throttle;

/// Main translation gateway
pub struct TranslationService {
    /// Provider implementation; `None` is the identity passthrough
    provider: Option<Box<dyn Provider>>,

    /// Provider identifier recorded in output envelopes
    provider_name: &'static str,

    /// Locale the catalog baseline is written in
    source_locale: String,

    /// Memo cache for storing and retrieving translations
    pub cache: TranslationCache,

    /// Global pacing gate shared by every caller of this service
    throttle: Throttle,

    /// Maximum characters per provider request
    max_chunk_len: usize,
}

impl TranslationService {
    /// Create a gateway from the translation configuration
    pub fn new(config: &TranslationConfig, source_locale: impl Into<String>) -> Self {
        let provider: Option<Box<dyn Provider>> = match config.provider {
            ProviderKind::Google => Some(Box::new(Google::new())),
            ProviderKind::LibreTranslate => Some(Box::new(LibreTranslate::new(
                config.endpoint.clone(),
                Some(config.api_key.clone()),
            ))),
            ProviderKind::MyMemory => Some(Box::new(MyMemory::new(Some(config.email.clone())))),
            ProviderKind::None => None,
        };

        let provider_name = match config.provider {
            ProviderKind::Google => "google",
            ProviderKind::LibreTranslate => "libretranslate",
            ProviderKind::MyMemory => "mymemory",
            ProviderKind::None => "none",
        };

        Self {
            provider,
            provider_name,
            source_locale: source_locale.into(),
            cache: TranslationCache::new(),
            throttle: Throttle::new(config.throttle_ms),
            max_chunk_len: config.max_chunk_len,
        }
    }

    /// Create a gateway around an explicit provider (used by tests)
    pub fn with_provider(
        provider: Box<dyn Provider>,
        source_locale: impl Into<String>,
        throttle_ms: u64,
        max_chunk_len: usize,
    ) -> Self {
        let provider_name = provider.name();
        Self {
            provider: Some(provider),
            provider_name,
            source_locale: source_locale.into(),
            cache: TranslationCache::new(),
            throttle: Throttle::new(throttle_ms),
            max_chunk_len,
        }
    }

    /// Provider identifier for output envelopes
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    /// Locale the baseline dataset is written in
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Whether translating into `target_locale` is the identity case
    pub fn is_identity(&self, target_locale: &str) -> bool {
        target_locale == self.source_locale
    }

    /// Translate one text value into `target_locale`.
    ///
    /// Order of precedence: identity short-circuit, term override, memo
    /// cache, then the provider (chunked and paced). Any provider failure
    /// degrades to the source text; this method cannot fail.
    pub async fn translate_text(&self, text: &str, target_locale: &str) -> String {
        if self.is_identity(target_locale) || text.trim().is_empty() {
            return text.to_string();
        }

        // Overrides win over provider output, so skip the call entirely.
        if let Some(pinned) = glossary::override_for(text, target_locale) {
            return pinned;
        }

        if let Some(hit) = self.cache.get(text, &self.source_locale, target_locale) {
            return hit;
        }

        let Some(provider) = self.provider.as_deref() else {
            return text.to_string();
        };

        let chunks = chunk_text(text, self.max_chunk_len);
        let mut translated_chunks = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            self.throttle.pace().await;

            match provider
                .translate(chunk, &self.source_locale, target_locale)
                .await
            {
                Ok(translated) => translated_chunks.push(translated),
                Err(e) => {
                    warn!(
                        "[translate] {} -> {} failed, keeping source text: {}",
                        self.source_locale, target_locale, e
                    );
                    return text.to_string();
                }
            }
        }

        let translated = translated_chunks.join("\n\n");
        self.cache
            .store(text, &self.source_locale, target_locale, &translated);

        debug!(
            "[translate] {} chars in {} chunk(s) ({} -> {})",
            text.chars().count(),
            chunks.len(),
            self.source_locale,
            target_locale
        );

        translated
    }
}
