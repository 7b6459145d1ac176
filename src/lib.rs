/*!
 * # srdsync - D&D 5e SRD catalog sync pipeline
 *
 * A Rust library for pulling the D&D 5e SRD ruleset catalog from its
 * public REST API and materializing localized JSON document shards.
 *
 * ## Features
 *
 * - Bounded-concurrency retrieval of every catalog collection
 * - Retry with linear backoff against the catalog host
 * - Normalization of heterogeneous payloads into canonical entities
 * - Cross-reference resolution of features and spells into class and
 *   subclass level progressions
 * - Machine translation into target locales through pluggable providers
 *   (Google, LibreTranslate, MyMemory), throttled and memoized
 * - Deterministic per-locale, per-category output shards
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `api_client`: Resilient JSON retrieval against the catalog API
 * - `pool`: Bounded-concurrency work pool
 * - `catalog`: Canonical entities, normalization and cross-reference
 *   resolution
 * - `translation`: Rate-limited translation gateway:
 *   - `translation::service`: Gateway core
 *   - `translation::cache`: Memoization of translations
 *   - `translation::segment`: Chunking for provider request limits
 *   - `translation::walk`: Recursive translation of JSON trees
 * - `providers`: Client implementations for translation providers:
 *   - `providers::google`: Unauthenticated Google endpoint
 *   - `providers::libretranslate`: Self-hosted LibreTranslate
 *   - `providers::mymemory`: MyMemory public endpoint
 * - `materialize`: Output document writer
 * - `sync_controller`: Main pipeline controller
 * - `errors`: Custom error types for the pipeline
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod api_client;
pub mod app_config;
pub mod catalog;
pub mod errors;
pub mod materialize;
pub mod pool;
pub mod providers;
pub mod sync_controller;
pub mod translation;

// Re-export main types for easier usage
pub use api_client::ApiClient;
pub use app_config::{Config, TranslationProvider};
pub use catalog::{ReferenceDataset, RulesetBundle};
pub use errors::{FetchError, ProviderError, SyncError, TranslationError};
pub use pool::bounded_map;
pub use sync_controller::SyncController;
pub use translation::TranslationService;
