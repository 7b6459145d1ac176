/*!
 * Common test utilities and fixture payloads shared across the suite
 */

use serde_json::{Value, json};

/// Raw spell payload as the upstream detail endpoint answers it
pub fn raw_spell(index: &str, name: &str, level: i64) -> Value {
    json!({
        "index": index,
        "name": name,
        "url": format!("/api/2014/spells/{}", index),
        "level": level,
        "school": { "index": "evocation", "name": "Evocation", "url": "/api/2014/magic-schools/evocation" },
        "range": "150 feet",
        "casting_time": "1 action",
        "duration": "Instantaneous",
        "components": ["V", "S", "M"],
        "material": "A tiny ball of bat guano and sulfur.",
        "ritual": false,
        "concentration": false,
        "classes": [
            { "index": "wizard", "name": "Wizard", "url": "/api/2014/classes/wizard" }
        ],
        "subclasses": [],
        "desc": [
            "A bright streak flashes from your pointing finger.",
            "Each creature in the area must make a Dexterity saving throw."
        ],
        "higher_level": [
            "The damage increases by 1d6 for each slot level above 3rd."
        ]
    })
}

/// Raw feature payload as the upstream detail endpoint answers it
pub fn raw_feature(index: &str, name: &str, level: i64) -> Value {
    json!({
        "index": index,
        "name": name,
        "url": format!("/api/2014/features/{}", index),
        "level": level,
        "class": { "index": "wizard", "name": "Wizard", "url": "/api/2014/classes/wizard" },
        "prerequisites": [],
        "desc": ["You have learned to regain some of your magical energy."]
    })
}

/// Raw class level row as the upstream level endpoint answers it
pub fn raw_level(level: i64, feature_indexes: &[&str]) -> Value {
    let features: Vec<Value> = feature_indexes
        .iter()
        .map(|index| {
            json!({
                "index": index,
                "name": index,
                "url": format!("/api/2014/features/{}", index)
            })
        })
        .collect();

    json!({
        "level": level,
        "ability_score_bonuses": 0,
        "prof_bonus": 2,
        "features": features
    })
}
