/*!
 * Output materializer.
 *
 * Writes the per-locale document shards and consolidated bundles the
 * application consumes. Every document is wrapped in the same envelope
 * (`generatedAt`, `locale`, `source`, `translationProvider`); writes are
 * all-or-nothing per file (temp file plus rename) and independent files
 * are written concurrently.
 */

use chrono::Utc;
use futures::future::try_join_all;
use log::info;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

use crate::errors::SyncError;

/// Envelope for consolidated and shard documents
#[derive(Serialize)]
struct Envelope<'a> {
    /// Generation timestamp, RFC 3339
    #[serde(rename = "generatedAt")]
    generated_at: String,
    /// Locale of the wrapped data
    locale: &'a str,
    /// Catalog the data was synced from
    source: &'a str,
    /// Provider the locale was translated through
    #[serde(rename = "translationProvider")]
    translation_provider: &'a str,
    /// Wrapped dataset
    data: &'a Value,
}

/// Envelope for one full-catalog category shard
#[derive(Serialize)]
struct CategoryShard<'a> {
    #[serde(rename = "generatedAt")]
    generated_at: String,
    locale: &'a str,
    source: &'a str,
    #[serde(rename = "translationProvider")]
    translation_provider: &'a str,
    /// Upstream category key
    category: &'a str,
    /// List endpoint the category was fetched from
    endpoint: &'a str,
    /// Number of items in `results`
    count: usize,
    /// Raw item payloads
    results: &'a Value,
}

/// Writer for one output directory
pub struct Materializer {
    /// Output root
    out_dir: PathBuf,
    /// Catalog base recorded in envelopes
    source: String,
    /// Provider identifier recorded in envelopes
    provider: String,
}

impl Materializer {
    /// Create a materializer rooted at `out_dir`
    pub fn new(
        out_dir: impl Into<PathBuf>,
        source: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            out_dir: out_dir.into(),
            source: source.into(),
            provider: provider.into(),
        }
    }

    /// Write the four logical datasets of one locale: the consolidated
    /// reference and class-learning documents, plus per-category shards
    /// under `<out>/<locale>/`.
    ///
    /// `bundle` is the JSON form of a `RulesetBundle` (baseline or
    /// translated overlay): `{spells, features, classes, classLearning}`.
    pub async fn write_locale(&self, locale: &str, bundle: &Value) -> Result<(), SyncError> {
        let empty = Value::Null;
        let spells = bundle.get("spells").unwrap_or(&empty);
        let features = bundle.get("features").unwrap_or(&empty);
        let classes = bundle.get("classes").unwrap_or(&empty);
        let learning = bundle.get("classLearning").unwrap_or(&empty);

        let reference = json!({
            "spells": spells,
            "features": features,
            "classes": classes,
        });

        let locale_dir = self.out_dir.join(locale);

        let writes = vec![
            self.write_document(
                self.out_dir.join(format!("dnd-reference.{}.json", locale)),
                locale,
                &reference,
            ),
            self.write_document(
                self.out_dir.join(format!("dnd-class-learning.{}.json", locale)),
                locale,
                learning,
            ),
            self.write_document(locale_dir.join("spells.json"), locale, spells),
            self.write_document(locale_dir.join("features.json"), locale, features),
            self.write_document(locale_dir.join("classes.json"), locale, classes),
            self.write_document(locale_dir.join("class-learning.json"), locale, learning),
        ];

        try_join_all(writes).await?;

        info!("[materialize] wrote reference datasets for '{}'", locale);
        Ok(())
    }

    /// Write one file per upstream category under `<out>/full/<locale>/`.
    ///
    /// `snapshot` is the JSON form of a `FullApiDataset`:
    /// `{categoryOrder, categories}`.
    pub async fn write_full(&self, locale: &str, snapshot: &Value) -> Result<(), SyncError> {
        let order: Vec<String> = snapshot
            .get("categoryOrder")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let full_dir = self.out_dir.join("full").join(locale);
        let mut writes = Vec::with_capacity(order.len());

        for category in &order {
            let Some(entry) = snapshot
                .get("categories")
                .and_then(|c| c.get(category.as_str()))
            else {
                continue;
            };

            let empty = Value::Array(Vec::new());
            let results = entry.get("results").unwrap_or(&empty);
            let shard = CategoryShard {
                generated_at: Utc::now().to_rfc3339(),
                locale,
                source: &self.source,
                translation_provider: &self.provider,
                category,
                endpoint: entry.get("endpoint").and_then(|v| v.as_str()).unwrap_or(""),
                count: results.as_array().map(|a| a.len()).unwrap_or(0),
                results,
            };

            let path = full_dir.join(format!("{}.json", category));
            let contents = serde_json::to_string_pretty(&shard)
                .map_err(|e| write_error(&path, e.to_string()))?;
            writes.push(write_atomic(path, contents));
        }

        let count = writes.len();
        try_join_all(writes).await?;

        info!("[materialize] wrote {} category shards for '{}'", count, locale);
        Ok(())
    }

    async fn write_document(
        &self,
        path: PathBuf,
        locale: &str,
        data: &Value,
    ) -> Result<(), SyncError> {
        let envelope = Envelope {
            generated_at: Utc::now().to_rfc3339(),
            locale,
            source: &self.source,
            translation_provider: &self.provider,
            data,
        };

        let contents = serde_json::to_string_pretty(&envelope)
            .map_err(|e| write_error(&path, e.to_string()))?;
        write_atomic(path, contents).await
    }
}

/// Serialize-then-rename write; the target either holds the previous
/// content or the complete new content, never a partial file.
async fn write_atomic(path: PathBuf, contents: String) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_error(&path, e.to_string()))?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents)
        .await
        .map_err(|e| write_error(&tmp, e.to_string()))?;
    tokio::fs::rename(&tmp, &path)
        .await
        .map_err(|e| write_error(&path, e.to_string()))?;

    Ok(())
}

fn write_error(path: &Path, message: String) -> SyncError {
    SyncError::Write {
        path: path.display().to_string(),
        message,
    }
}
