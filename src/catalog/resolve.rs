/*!
 * Cross-reference resolver.
 *
 * Stitches the already-built feature index into class and subclass level
 * progressions, and attaches the spells each class can learn at each
 * level. The reference-resolution step itself is pure; the drivers around
 * it fetch level tables and subclass details through the API client.
 */

use log::{debug, warn};
use serde_json::Value;

use crate::api_client::ApiClient;
use crate::catalog::model::{
    ApiRef, ClassLearning, ClassLevelEntry, ClassRecord, FeatureRecord, LearnableLevel,
    ReferenceDataset, SubclassRecord,
};
use crate::catalog::normalize::{self, coerce_array};
use crate::errors::FetchError;
use crate::pool::bounded_map;

/// Subclass details fetched per class, at most this many in flight
const SUBCLASS_CONCURRENCY: usize = 3;

/// Resolve one raw level row against the feature index.
///
/// Both the unresolved reference list and the resolved records are
/// retained: the references survive translation as a cheap localizable
/// name carrier even when the full record isn't re-walked.
pub fn resolve_level(
    raw: &Value,
    features: &ReferenceDataset<FeatureRecord>,
) -> ClassLevelEntry {
    let feature_refs = normalize::get_refs(raw, "features");

    let mut resolved = Vec::with_capacity(feature_refs.len());
    for reference in &feature_refs {
        match features.get(&reference.index) {
            Some(feature) => resolved.push(feature.clone()),
            None => warn!(
                "[features] unresolved reference in level table: {}",
                reference.index
            ),
        }
    }

    ClassLevelEntry {
        level: normalize::get_i64(raw, "level"),
        ability_score_bonuses: normalize::get_i64(raw, "ability_score_bonuses"),
        prof_bonus: normalize::get_i64(raw, "prof_bonus"),
        feature_refs,
        features: resolved,
        spellcasting: normalize::get_object(raw, "spellcasting"),
        spells: Vec::new(),
    }
}

/// Resolve a whole level table, sorted by level ascending
pub fn resolve_levels(
    raw_levels: &[Value],
    features: &ReferenceDataset<FeatureRecord>,
) -> Vec<ClassLevelEntry> {
    let mut entries: Vec<ClassLevelEntry> = raw_levels
        .iter()
        .map(|raw| resolve_level(raw, features))
        .collect();
    entries.sort_by_key(|entry| entry.level);
    entries
}

/// Spells a class can learn at one level.
///
/// Failure degrades to an empty list rather than propagating; "no spells
/// learnable" is a valid state indistinguishable from "lookup failed" at
/// this layer, so the failure is only logged.
pub async fn fetch_class_level_spells(
    client: &ApiClient,
    class_index: &str,
    level: i64,
) -> Vec<ApiRef> {
    let path = format!("classes/{}/levels/{}/spells", class_index, level);

    match client.get_json(&path).await {
        Ok(body) => coerce_array(&body)
            .iter()
            .filter_map(normalize::normalize_ref)
            .collect(),
        Err(e) => {
            debug!(
                "[classes] {} level {}: spell lookup failed, keeping empty: {}",
                class_index, level, e
            );
            Vec::new()
        }
    }
}

/// Fetch and resolve one subclass, including its own level table.
///
/// Detail or level-table failures degrade to a record built from the
/// reference triple; the subclass is never dropped from its class.
pub async fn resolve_subclass(
    client: &ApiClient,
    reference: &ApiRef,
    features: &ReferenceDataset<FeatureRecord>,
) -> SubclassRecord {
    let detail_path = if reference.url.is_empty() {
        format!("subclasses/{}", reference.index)
    } else {
        reference.url.clone()
    };

    let mut subclass = match client.get_json(&detail_path).await {
        Ok(raw) => normalize::normalize_subclass(&raw),
        Err(e) => {
            warn!(
                "[subclasses] {}: detail fetch failed, keeping stub: {}",
                reference.index, e
            );
            SubclassRecord {
                index: reference.index.clone(),
                name: reference.name.clone(),
                url: reference.url.clone(),
                class: None,
                subclass_flavor: None,
                desc: Vec::new(),
                levels: Vec::new(),
            }
        }
    };

    let levels_path = format!("subclasses/{}/levels", reference.index);
    match client.get_json(&levels_path).await {
        Ok(raw_levels) => {
            subclass.levels = resolve_levels(&coerce_array(&raw_levels), features);
        }
        Err(e) => {
            warn!(
                "[subclasses] {}: level table fetch failed: {}",
                reference.index, e
            );
        }
    }

    subclass
}

/// Fetch and resolve one class: level table, per-level learnable spells,
/// and subclasses (recursively, with the same feature-resolution rule).
///
/// A missing level table is fatal to the run; resolution downstream is
/// meaningless without it.
pub async fn resolve_class(
    client: &ApiClient,
    raw_class: &Value,
    features: &ReferenceDataset<FeatureRecord>,
) -> Result<ClassRecord, FetchError> {
    let mut class = normalize::normalize_class(raw_class);

    let levels_path = format!("classes/{}/levels", class.index);
    let raw_levels = client.get_json(&levels_path).await?;
    class.levels = resolve_levels(&coerce_array(&raw_levels), features);

    for entry in &mut class.levels {
        entry.spells = fetch_class_level_spells(client, &class.index, entry.level).await;
    }

    let subclass_refs = class.subclasses.clone();
    class.subclass_records = bounded_map(subclass_refs, SUBCLASS_CONCURRENCY, |reference| {
        let client = client.clone();
        async move { resolve_subclass(&client, &reference, features).await }
    })
    .await;

    debug!(
        "[classes] {}: {} levels, {} subclasses resolved",
        class.index,
        class.levels.len(),
        class.subclass_records.len()
    );

    Ok(class)
}

/// Derive the per-class learnable-spell dataset from resolved classes
pub fn build_class_learning(classes: &[ClassRecord]) -> Vec<ClassLearning> {
    classes
        .iter()
        .map(|class| ClassLearning {
            class: ApiRef {
                index: class.index.clone(),
                name: class.name.clone(),
                url: class.url.clone(),
            },
            levels: class
                .levels
                .iter()
                .map(|entry| LearnableLevel {
                    level: entry.level,
                    spells: entry.spells.clone(),
                })
                .collect(),
        })
        .collect()
}
