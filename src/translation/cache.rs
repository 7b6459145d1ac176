/*!
 * Translation memoization.
 *
 * A process-lifetime cache keyed by exact source/target locale and raw
 * text. Class names, ability scores and other short phrases recur across
 * hundreds of records, so repeated lookups short-circuit provider calls.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key combining source locale, target locale, and raw text.
///
/// The text is matched exactly, not normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Source locale code
    source_locale: String,

    /// Target locale code
    target_locale: String,

    /// Raw source text
    text: String,
}

impl CacheKey {
    fn new(text: &str, source_locale: &str, target_locale: &str) -> Self {
        Self {
            source_locale: source_locale.to_string(),
            target_locale: target_locale.to_string(),
            text: text.to_string(),
        }
    }
}

/// Memo cache for storing and retrieving translations
#[derive(Clone, Default)]
pub struct TranslationCache {
    /// Internal cache storage; read/append only, never invalidated mid-run
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a translation from the cache
    pub fn get(&self, text: &str, source_locale: &str, target_locale: &str) -> Option<String> {
        let key = CacheKey::new(text, source_locale, target_locale);
        let hit = self.cache.read().get(&key).cloned();

        match hit {
            Some(translation) => {
                *self.hits.write() += 1;
                Some(translation)
            }
            None => {
                *self.misses.write() += 1;
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, text: &str, source_locale: &str, target_locale: &str, translation: &str) {
        let key = CacheKey::new(text, source_locale, target_locale);
        self.cache.write().insert(key, translation.to_string());

        debug!(
            "[cache] stored '{}' ({} -> {})",
            truncate_text(text, 30),
            source_locale,
            target_locale
        );
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}
