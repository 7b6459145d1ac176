/*!
 * Pipeline controller.
 *
 * Drives the linear sync pipeline: fetch the English baseline, normalize
 * it, resolve cross-references, derive translated overlays per target
 * locale, restore pinned English spell names, and materialize every
 * dataset. The optional full-catalog snapshot stage runs last.
 *
 * Failures in the foundational lookups (spell, feature and class lists)
 * terminate the run; per-item failures degrade to stubs or defaults and
 * are logged with a category/index tag.
 */

use anyhow::{Context, Result};
use log::{error, info};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;

use crate::api_client::ApiClient;
use crate::app_config::Config;
use crate::catalog::model::{
    CategorySnapshot, ClassRecord, FeatureRecord, FullApiDataset, ReferenceDataset, RulesetBundle,
    SpellRecord,
};
use crate::catalog::normalize::{self, normalize_feature, normalize_spell, sort_spells};
use crate::catalog::resolve;
use crate::errors::{FetchError, SyncError};
use crate::materialize::Materializer;
use crate::pool::bounded_map;
use crate::translation::walk::{restore_spell_names, translate_value};
use crate::translation::TranslationService;

/// Detail fetches per collection, at most this many in flight
const DETAIL_CONCURRENCY: usize = 8;

/// Class resolutions, at most this many in flight
const CLASS_CONCURRENCY: usize = 4;

/// Locale-wide full-catalog translation passes, at most this many in flight
const LOCALE_CONCURRENCY: usize = 2;

/// Main pipeline controller
pub struct SyncController {
    /// Pipeline configuration
    config: Config,

    /// Upstream catalog client
    client: ApiClient,

    /// Translation gateway shared by every stage
    translator: TranslationService,

    /// Output writer
    materializer: Materializer,
}

impl SyncController {
    /// Create a controller from a validated configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let client = ApiClient::with_base(&config.api_root, &config.api_base);
        let translator = TranslationService::new(&config.translation, &config.source_locale);
        let materializer = Materializer::new(
            &config.out_dir,
            config.api_base.clone(),
            translator.provider_name(),
        );

        Ok(Self {
            config,
            client,
            translator,
            materializer,
        })
    }

    /// Run the whole pipeline once
    pub async fn run(&self) -> Result<()> {
        let started = Instant::now();
        info!("Starting catalog sync from {}", self.config.api_base);

        // FetchBaseline + NormalizeBaseline
        let spells = self.fetch_spells().await?;
        let features = self.fetch_features().await?;

        // ResolveCrossReferences
        let classes = self.fetch_classes(&features).await?;
        let class_learning = resolve::build_class_learning(&classes.results);

        info!(
            "Baseline ready: {} spells, {} features, {} classes",
            spells.total, features.total, classes.total
        );

        // English spell names, pinned inside every translated overlay
        let english_names: HashMap<String, String> = spells
            .results
            .iter()
            .map(|s| (s.index.clone(), s.name.clone()))
            .collect();

        let bundle = RulesetBundle {
            spells,
            features,
            classes,
            class_learning,
        };
        let baseline =
            serde_json::to_value(&bundle).context("Failed to serialize baseline bundle")?;

        // MaterializeAll starts with the baseline itself
        self.materializer
            .write_locale(&self.config.source_locale, &baseline)
            .await?;

        // (TranslateOverlay)* + ApplyEnglishNameOverlay
        for locale in &self.config.target_locales {
            if self.translator.is_identity(locale) {
                continue;
            }

            info!(
                "Translating datasets to '{}' via {}",
                locale,
                self.translator.provider_name()
            );
            let mut overlay = translate_value(&self.translator, &baseline, None, locale).await;
            restore_spell_names(&mut overlay, &english_names);

            self.materializer.write_locale(locale, &overlay).await?;
        }

        // Optional full-catalog snapshot stage
        if self.config.skip_full_sync {
            info!("Full catalog snapshot disabled, skipping");
        } else {
            self.run_full_sync(&english_names).await?;
        }

        let (hits, misses, hit_rate) = self.translator.cache.stats();
        info!(
            "Sync finished in {:.1?} (cache: {} hits / {} misses, {:.0}% hit rate)",
            started.elapsed(),
            hits,
            misses,
            hit_rate * 100.0
        );

        Ok(())
    }

    /// Fetch and normalize the spell collection, sorted by (level, name).
    ///
    /// A missing list is fatal; a missing item detail degrades to a record
    /// normalized from its list entry.
    async fn fetch_spells(&self) -> Result<ReferenceDataset<SpellRecord>, SyncError> {
        let entries = self.client.get_results("spells").await?;
        info!("[spells] fetching {} details", entries.len());

        let mut records = bounded_map(entries, DETAIL_CONCURRENCY, |entry| {
            let client = self.client.clone();
            async move { normalize_spell(&fetch_detail(&client, "spells", &entry).await) }
        })
        .await;

        sort_spells(&mut records);
        Ok(ReferenceDataset::from_results(records))
    }

    /// Fetch and normalize the feature collection, sorted by index
    async fn fetch_features(&self) -> Result<ReferenceDataset<FeatureRecord>, SyncError> {
        let entries = self.client.get_results("features").await?;
        info!("[features] fetching {} details", entries.len());

        let mut records = bounded_map(entries, DETAIL_CONCURRENCY, |entry| {
            let client = self.client.clone();
            async move { normalize_feature(&fetch_detail(&client, "features", &entry).await) }
        })
        .await;

        records.sort_by(|a, b| a.index.cmp(&b.index));
        Ok(ReferenceDataset::from_results(records))
    }

    /// Fetch the class collection and resolve every progression against
    /// the feature index
    async fn fetch_classes(
        &self,
        features: &ReferenceDataset<FeatureRecord>,
    ) -> Result<ReferenceDataset<ClassRecord>, SyncError> {
        let entries = self.client.get_results("classes").await?;
        info!("[classes] resolving {} classes", entries.len());

        let records = bounded_map(entries, CLASS_CONCURRENCY, |entry| {
            let client = self.client.clone();
            async move {
                let raw = fetch_detail(&client, "classes", &entry).await;
                resolve::resolve_class(&client, &raw, features).await
            }
        })
        .await;

        let records: Result<Vec<ClassRecord>, FetchError> = records.into_iter().collect();
        Ok(ReferenceDataset::from_results(records?))
    }

    /// Snapshot every upstream category and materialize the per-locale
    /// shard tree
    async fn run_full_sync(&self, english_names: &HashMap<String, String>) -> Result<()> {
        let snapshot = self.fetch_full_catalog().await?;
        info!(
            "[full] snapshot holds {} categories",
            snapshot.category_order.len()
        );

        let snapshot_value =
            serde_json::to_value(&snapshot).context("Failed to serialize full snapshot")?;

        self.materializer
            .write_full(&self.config.source_locale, &snapshot_value)
            .await?;

        let overlay_locales: Vec<String> = self
            .config
            .target_locales
            .iter()
            .filter(|l| !self.translator.is_identity(l))
            .cloned()
            .collect();

        let writes = bounded_map(overlay_locales, LOCALE_CONCURRENCY, |locale| {
            let snapshot_value = &snapshot_value;
            async move {
                info!("[full] translating snapshot to '{}'", locale);
                let mut overlay =
                    translate_value(&self.translator, snapshot_value, None, &locale).await;
                restore_spell_names(&mut overlay, english_names);
                self.materializer.write_full(&locale, &overlay).await
            }
        })
        .await;

        for write in writes {
            write?;
        }

        Ok(())
    }

    /// Fetch the category root and every item detail of every category.
    ///
    /// A failed category list is logged and skipped; a failed item detail
    /// becomes a flagged `_syncError` stub.
    async fn fetch_full_catalog(&self) -> Result<FullApiDataset, SyncError> {
        let root = self.client.get_json(self.config.api_base.as_str()).await?;

        let Value::Object(root_map) = root else {
            return Ok(FullApiDataset::default());
        };

        let mut category_order: Vec<String> = root_map.keys().cloned().collect();
        category_order.sort();

        let mut categories = HashMap::new();

        for category in &category_order {
            let endpoint = root_map
                .get(category)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();

            let entries = match self.client.get_results(&endpoint).await {
                Ok(entries) => entries,
                Err(e) => {
                    error!("[{}] list fetch failed, skipping category: {}", category, e);
                    continue;
                }
            };

            let mut results = bounded_map(entries, DETAIL_CONCURRENCY, |entry| {
                let client = self.client.clone();
                let category = category.clone();
                async move {
                    let path = detail_path(&category, &entry);
                    match client.get_json(&path).await {
                        Ok(detail) => detail,
                        Err(e) => {
                            error!("[{}] {}: {}", category, entry_index(&entry), e);
                            normalize::sync_error_stub(&entry, &path, &e.to_string())
                        }
                    }
                }
            })
            .await;

            normalize::sort_raw_results(&mut results);
            categories.insert(
                category.clone(),
                CategorySnapshot {
                    endpoint,
                    count: results.len(),
                    results,
                },
            );
        }

        category_order.retain(|c| categories.contains_key(c));

        Ok(FullApiDataset {
            category_order,
            categories,
        })
    }
}

/// Fetch one item detail from its list entry, falling back to the entry
/// itself so the collection never drops the item
async fn fetch_detail(client: &ApiClient, category: &str, entry: &Value) -> Value {
    let path = detail_path(category, entry);
    match client.get_json(&path).await {
        Ok(detail) => detail,
        Err(e) => {
            error!("[{}] {}: {}", category, entry_index(entry), e);
            entry.clone()
        }
    }
}

fn detail_path(category: &str, entry: &Value) -> String {
    match entry.get("url").and_then(|v| v.as_str()) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!("{}/{}", category, entry_index(entry)),
    }
}

fn entry_index(entry: &Value) -> &str {
    entry.get("index").and_then(|v| v.as_str()).unwrap_or("?")
}
