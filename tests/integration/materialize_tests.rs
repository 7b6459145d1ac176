/*!
 * Output materializer tests
 */

use serde_json::{Value, json};
use tempfile::tempdir;

use srdsync::materialize::Materializer;

fn sample_bundle() -> Value {
    json!({
        "spells": { "total": 1, "results": [{ "index": "fireball", "name": "Fireball" }] },
        "features": { "total": 0, "results": [] },
        "classes": { "total": 0, "results": [] },
        "classLearning": []
    })
}

async fn read_json(path: &std::path::Path) -> Value {
    let contents = tokio::fs::read_to_string(path).await.expect("missing file");
    serde_json::from_str(&contents).expect("invalid JSON on disk")
}

#[tokio::test]
async fn test_write_locale_shouldEmitConsolidatedDocsAndShards() {
    let dir = tempdir().unwrap();
    let materializer = Materializer::new(dir.path(), "https://host.test/api/2014", "none");

    materializer
        .write_locale("en", &sample_bundle())
        .await
        .unwrap();

    for name in [
        "dnd-reference.en.json",
        "dnd-class-learning.en.json",
        "en/spells.json",
        "en/features.json",
        "en/classes.json",
        "en/class-learning.json",
    ] {
        assert!(dir.path().join(name).is_file(), "missing {}", name);
    }
}

#[tokio::test]
async fn test_write_locale_shouldWrapDataInEnvelope() {
    let dir = tempdir().unwrap();
    let materializer = Materializer::new(dir.path(), "https://host.test/api/2014", "google");

    materializer
        .write_locale("es", &sample_bundle())
        .await
        .unwrap();

    let doc = read_json(&dir.path().join("dnd-reference.es.json")).await;
    assert_eq!(doc["locale"], "es");
    assert_eq!(doc["source"], "https://host.test/api/2014");
    assert_eq!(doc["translationProvider"], "google");
    assert!(doc["generatedAt"].as_str().unwrap().contains('T'));
    assert_eq!(doc["data"]["spells"]["results"][0]["index"], "fireball");

    let shard = read_json(&dir.path().join("es/spells.json")).await;
    assert_eq!(shard["data"]["total"], 1);
}

#[tokio::test]
async fn test_write_locale_shouldPrettyPrintDocuments() {
    let dir = tempdir().unwrap();
    let materializer = Materializer::new(dir.path(), "https://host.test/api/2014", "none");

    materializer
        .write_locale("en", &sample_bundle())
        .await
        .unwrap();

    let contents = tokio::fs::read_to_string(dir.path().join("en/spells.json"))
        .await
        .unwrap();
    assert!(contents.contains("\n  "));
}

#[tokio::test]
async fn test_write_full_shouldEmitOneShardPerCategory() {
    let dir = tempdir().unwrap();
    let materializer = Materializer::new(dir.path(), "https://host.test/api/2014", "none");

    let snapshot = json!({
        "categoryOrder": ["monsters", "spells"],
        "categories": {
            "monsters": {
                "endpoint": "/api/2014/monsters",
                "count": 1,
                "results": [{ "index": "bugbear", "name": "Bugbear" }]
            },
            "spells": {
                "endpoint": "/api/2014/spells",
                "count": 1,
                "results": [{ "index": "fireball", "name": "Fireball" }]
            }
        }
    });

    materializer.write_full("en", &snapshot).await.unwrap();

    let monsters = read_json(&dir.path().join("full/en/monsters.json")).await;
    assert_eq!(monsters["category"], "monsters");
    assert_eq!(monsters["endpoint"], "/api/2014/monsters");
    assert_eq!(monsters["count"], 1);
    assert_eq!(monsters["results"][0]["index"], "bugbear");
    assert_eq!(monsters["locale"], "en");

    assert!(dir.path().join("full/en/spells.json").is_file());
}

#[tokio::test]
async fn test_write_full_withMissingCategoryEntry_shouldSkipIt() {
    let dir = tempdir().unwrap();
    let materializer = Materializer::new(dir.path(), "https://host.test/api/2014", "none");

    let snapshot = json!({
        "categoryOrder": ["ghosts"],
        "categories": {}
    });

    materializer.write_full("en", &snapshot).await.unwrap();
    assert!(!dir.path().join("full/en/ghosts.json").exists());
}
