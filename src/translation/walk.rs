/*!
 * Recursive translation of arbitrary JSON trees.
 *
 * Catalog categories without a bespoke normalizer are passed through as
 * raw JSON, so localization has to walk unknown shapes. The walk is
 * polymorphic over value kinds and parameterized by a key-aware skip
 * predicate: the same string may be skipped under one field key and
 * translated under another.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;

use crate::translation::service::TranslationService;

/// Structural keys whose values are never free text: identifiers, URLs,
/// timestamps, author/slug metadata, coordinate fields.
static RESERVED_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "index",
        "url",
        "id",
        "_id",
        "key",
        "slug",
        "author",
        "created_at",
        "updated_at",
        "timestamp",
        "date",
        "lat",
        "lng",
        "coordinates",
    ])
});

// kebab-case or snake_case machine tokens ("arcane-recovery", "dc_type")
static MACHINE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+([-_][a-z0-9]+)+$").unwrap());

// Purely numeric values, with optional decimal/thousands punctuation
static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+([.,][0-9]+)*$").unwrap());

/// Decide whether a string value under `key` is human text worth sending
/// to a provider.
pub fn should_translate(key: Option<&str>, text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return false;
    }

    if let Some(key) = key {
        if RESERVED_KEYS.contains(key) {
            return false;
        }
    }

    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("/api")
        || trimmed.starts_with("www.")
    {
        return false;
    }

    if NUMERIC.is_match(trimmed) {
        return false;
    }

    // Acronym-shaped tokens: STR, DEX, CHA and friends
    if trimmed.chars().count() <= 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    // Machine tokens stay verbatim unless the field is literally a name
    if MACHINE_TOKEN.is_match(trimmed) && key != Some("name") {
        return false;
    }

    true
}

/// Translate every eligible string in a JSON tree, preserving structure.
///
/// Arrays and objects are rebuilt node for node, so the output tree never
/// introduces or drops entries relative to the input. Non-string leaves
/// pass through untouched.
pub fn translate_value<'a>(
    service: &'a TranslationService,
    value: &'a Value,
    key: Option<&'a str>,
    target_locale: &'a str,
) -> Pin<Box<dyn Future<Output = Value> + Send + 'a>> {
    Box::pin(async move {
        match value {
            Value::String(text) => {
                if should_translate(key, text) {
                    Value::String(service.translate_text(text, target_locale).await)
                } else {
                    value.clone()
                }
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(translate_value(service, item, key, target_locale).await);
                }
                Value::Array(out)
            }
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(
                        k.clone(),
                        translate_value(service, v, Some(k.as_str()), target_locale).await,
                    );
                }
                Value::Object(out)
            }
            other => other.clone(),
        }
    })
}

/// Rewrite translated spell names back to their English originals.
///
/// Official spell names stay in English even inside translated datasets.
/// Any object whose `{index, url}` pair identifies it as a spell gets its
/// `name` restored from the baseline index.
pub fn restore_spell_names(value: &mut Value, english_names: &HashMap<String, String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                restore_spell_names(item, english_names);
            }
        }
        Value::Object(map) => {
            let is_spell_ref = map
                .get("url")
                .and_then(|v| v.as_str())
                .is_some_and(|url| url.contains("/spells/"));

            if is_spell_ref {
                if let Some(index) = map.get("index").and_then(|v| v.as_str()) {
                    if let Some(original) = english_names.get(index) {
                        map.insert("name".to_string(), Value::String(original.clone()));
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                restore_spell_names(v, english_names);
            }
        }
        _ => {}
    }
}
