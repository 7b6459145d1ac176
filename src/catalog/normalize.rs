/*!
 * Dataset normalizer.
 *
 * Converts one raw upstream JSON payload into one canonical entity,
 * defensively defaulting every optional field so downstream consumers
 * never null-check upstream API drift. Pure and synchronous; no I/O.
 *
 * Categories without a bespoke normalizer keep the raw payload verbatim,
 * augmented with an inline `_syncError` marker when detail retrieval
 * failed. One bad item becomes a flagged stub, not an aborted category.
 */

use serde_json::{Value, json};

use crate::catalog::model::{ApiRef, ClassRecord, FeatureRecord, SpellRecord, SubclassRecord};

/// Extract a string field, defaulting to empty
pub fn get_str(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Extract an optional string field
pub fn get_opt_str(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Extract an integer field, defaulting to 0
pub fn get_i64(raw: &Value, key: &str) -> i64 {
    raw.get(key).and_then(|v| v.as_i64()).unwrap_or(0)
}

/// Extract a boolean field, defaulting to false
pub fn get_bool(raw: &Value, key: &str) -> bool {
    raw.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Extract an object-valued field, defaulting to None
pub fn get_object(raw: &Value, key: &str) -> Option<Value> {
    raw.get(key).filter(|v| !v.is_null()).cloned()
}

/// Extract an array of strings, defaulting to empty
pub fn get_string_list(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Extract a reference triple, requiring at least an index
pub fn get_ref(raw: &Value, key: &str) -> Option<ApiRef> {
    raw.get(key).and_then(normalize_ref)
}

/// Extract a list of reference triples, dropping malformed entries
pub fn get_refs(raw: &Value, key: &str) -> Vec<ApiRef> {
    raw.get(key)
        .and_then(|v| v.as_array())
        .map(|items| items.iter().filter_map(normalize_ref).collect())
        .unwrap_or_default()
}

/// Normalize one `{index, name, url}` triple
pub fn normalize_ref(raw: &Value) -> Option<ApiRef> {
    let index = raw.get("index").and_then(|v| v.as_str())?;
    Some(ApiRef {
        index: index.to_string(),
        name: get_str(raw, "name"),
        url: get_str(raw, "url"),
    })
}

/// Coerce an array- or object-shaped endpoint payload to an array.
///
/// Some level endpoints answer a bare array, others wrap it in
/// `{count, results}`, and drifted shapes have appeared keyed by level.
pub fn coerce_array(raw: &Value) -> Vec<Value> {
    match raw {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            if let Some(results) = map.get("results").and_then(|v| v.as_array()) {
                results.clone()
            } else {
                map.values().cloned().collect()
            }
        }
        _ => Vec::new(),
    }
}

/// Normalize one raw spell payload
pub fn normalize_spell(raw: &Value) -> SpellRecord {
    let desc = get_string_list(raw, "desc");
    let higher_level = get_string_list(raw, "higher_level");

    let short_desc = desc.first().cloned().unwrap_or_default();

    let mut full_parts = desc.clone();
    if !higher_level.is_empty() {
        full_parts.push("At Higher Levels.".to_string());
        full_parts.extend(higher_level.iter().cloned());
    }
    let full_desc = full_parts.join("\n\n");

    SpellRecord {
        index: get_str(raw, "index"),
        name: get_str(raw, "name"),
        url: get_str(raw, "url"),
        level: get_i64(raw, "level"),
        school: get_ref(raw, "school"),
        range: get_str(raw, "range"),
        casting_time: get_str(raw, "casting_time"),
        duration: get_str(raw, "duration"),
        material: get_opt_str(raw, "material"),
        components: get_string_list(raw, "components"),
        ritual: get_bool(raw, "ritual"),
        concentration: get_bool(raw, "concentration"),
        damage: get_object(raw, "damage"),
        dc: get_object(raw, "dc"),
        classes: get_refs(raw, "classes"),
        subclasses: get_refs(raw, "subclasses"),
        desc,
        higher_level,
        short_desc,
        full_desc,
    }
}

/// Normalize one raw feature payload
pub fn normalize_feature(raw: &Value) -> FeatureRecord {
    FeatureRecord {
        index: get_str(raw, "index"),
        name: get_str(raw, "name"),
        url: get_str(raw, "url"),
        level: raw.get("level").and_then(|v| v.as_i64()),
        class: get_ref(raw, "class"),
        subclass: get_ref(raw, "subclass"),
        parent: get_ref(raw, "parent"),
        prerequisites: raw
            .get("prerequisites")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
        desc: get_string_list(raw, "desc"),
    }
}

/// Normalize one raw class payload; progressions are attached later by
/// the resolver
pub fn normalize_class(raw: &Value) -> ClassRecord {
    ClassRecord {
        index: get_str(raw, "index"),
        name: get_str(raw, "name"),
        url: get_str(raw, "url"),
        hit_die: get_i64(raw, "hit_die"),
        proficiency_choices: get_object(raw, "proficiency_choices"),
        proficiencies: get_refs(raw, "proficiencies"),
        saving_throws: get_refs(raw, "saving_throws"),
        starting_equipment: get_object(raw, "starting_equipment"),
        subclasses: get_refs(raw, "subclasses"),
        spellcasting: get_object(raw, "spellcasting"),
        levels: Vec::new(),
        subclass_records: Vec::new(),
    }
}

/// Normalize one raw subclass payload; the level progression is attached
/// later by the resolver
pub fn normalize_subclass(raw: &Value) -> SubclassRecord {
    SubclassRecord {
        index: get_str(raw, "index"),
        name: get_str(raw, "name"),
        url: get_str(raw, "url"),
        class: get_ref(raw, "class"),
        subclass_flavor: get_opt_str(raw, "subclass_flavor"),
        desc: get_string_list(raw, "desc"),
        levels: Vec::new(),
    }
}

/// Build the flagged pass-through stub for an item whose detail fetch
/// failed: the list entry survives verbatim with the failure inlined.
pub fn sync_error_stub(list_entry: &Value, url: &str, message: &str) -> Value {
    let mut stub = match list_entry {
        Value::Object(map) => Value::Object(map.clone()),
        other => other.clone(),
    };

    if let Value::Object(map) = &mut stub {
        map.insert(
            "_syncError".to_string(),
            json!({ "url": url, "message": message }),
        );
    }

    stub
}

/// Sort spells by (level, name) for stable diffs between runs
pub fn sort_spells(spells: &mut [SpellRecord]) {
    spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
}

/// Sort raw category results by (name ?? index) lexicographically
pub fn sort_raw_results(results: &mut [Value]) {
    results.sort_by(|a, b| {
        let key_a = sort_key(a);
        let key_b = sort_key(b);
        key_a.cmp(&key_b)
    });
}

fn sort_key(raw: &Value) -> String {
    raw.get("name")
        .and_then(|v| v.as_str())
        .or_else(|| raw.get("index").and_then(|v| v.as_str()))
        .unwrap_or_default()
        .to_string()
}
