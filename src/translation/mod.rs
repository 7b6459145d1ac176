/*!
 * Rate-limited translation gateway.
 *
 * This module contains the machinery for localizing datasets through
 * third-party providers. It is split into several submodules:
 *
 * - `service`: the gateway tying provider, throttle, cache and overrides
 * - `cache`: process-lifetime memoization of translations
 * - `throttle`: global pacing gate for rate-limited providers
 * - `segment`: paragraph/sentence-aware chunking for request limits
 * - `glossary`: fixed bilingual term overrides
 * - `walk`: recursive key-aware translation of arbitrary JSON trees
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::segment::chunk_text;
pub use self::service::TranslationService;
pub use self::throttle::Throttle;
pub use self::walk::{restore_spell_names, should_translate, translate_value};

// Submodules
pub mod cache;
pub mod glossary;
pub mod segment;
pub mod service;
pub mod throttle;
pub mod walk;
