/*!
 * Behavior tests for the translation gateway
 */

use serde_json::json;
use std::time::{Duration, Instant};

use srdsync::providers::mock::MockProvider;
use srdsync::translation::walk::{restore_spell_names, translate_value};
use srdsync::translation::TranslationService;

fn service_with(provider: MockProvider, throttle_ms: u64) -> TranslationService {
    TranslationService::with_provider(Box::new(provider), "en", throttle_ms, 350)
}

#[tokio::test]
async fn test_translate_text_withRepeatedInput_shouldIssueOneProviderCall() {
    let provider = MockProvider::working();
    let calls = provider.call_counter();
    let service = service_with(provider, 0);

    let first = service.translate_text("A gout of flame.", "es").await;
    let second = service.translate_text("A gout of flame.", "es").await;

    assert_eq!(first, "[es] A gout of flame.");
    assert_eq!(second, first);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_translate_text_withOverrideTerm_shouldIgnoreProviderOutput() {
    let provider = MockProvider::working();
    let calls = provider.call_counter();
    let service = service_with(provider, 0);

    let translated = service.translate_text("Wizard", "es").await;

    assert_eq!(translated, "Mago");
    // The pinned term makes the provider call unnecessary.
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_translate_text_withOverrideTermAndFailingProvider_shouldStillReturnOverride() {
    let service = service_with(MockProvider::failing(), 0);

    assert_eq!(service.translate_text("Wizard", "es").await, "Mago");
    assert_eq!(service.translate_text("  Strength  ", "es").await, "Fuerza");
}

#[tokio::test]
async fn test_translate_text_withFailingProvider_shouldFallBackToSourceText() {
    let service = service_with(MockProvider::failing(), 0);

    let text = "Each creature in the area must make a saving throw.";
    assert_eq!(service.translate_text(text, "es").await, text);
}

#[tokio::test]
async fn test_translate_text_withIdentityLocale_shouldSkipProviderEntirely() {
    let provider = MockProvider::working();
    let calls = provider.call_counter();
    let service = service_with(provider, 0);

    let translated = service.translate_text("Anything at all.", "en").await;

    assert_eq!(translated, "Anything at all.");
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_translate_text_withThrottle_shouldPaceProviderCalls() {
    let service = service_with(MockProvider::working(), 40);

    let started = Instant::now();
    let _ = service.translate_text("First phrase.", "es").await;
    let _ = service.translate_text("Second phrase.", "es").await;
    let _ = service.translate_text("Third phrase.", "es").await;

    // Three distinct calls are separated by at least two intervals.
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn test_translate_text_withLongText_shouldChunkAndRejoin() {
    let provider = MockProvider::working();
    let calls = provider.call_counter();
    let service = service_with(provider, 0);

    let paragraph_a = "word ".repeat(60).trim_end().to_string();
    let paragraph_b = "mark ".repeat(60).trim_end().to_string();
    let text = format!("{}\n\n{}", paragraph_a, paragraph_b);

    let translated = service.translate_text(&text, "es").await;

    // Each ~300-char paragraph travels as its own provider request.
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    assert_eq!(
        translated,
        format!("[es] {}\n\n[es] {}", paragraph_a, paragraph_b)
    );
}

#[tokio::test]
async fn test_translate_value_withMixedTree_shouldOnlyTouchHumanText() {
    let service = service_with(MockProvider::working(), 0);

    let tree = json!({
        "index": "acid-arrow",
        "name": "Acid Arrow",
        "url": "/api/2014/spells/acid-arrow",
        "range": "90 feet",
        "desc": ["A shimmering green arrow streaks toward a target."],
        "components": ["V", "S", "M"]
    });

    let translated = translate_value(&service, &tree, None, "es").await;

    // Structural fields survive untouched.
    assert_eq!(translated["index"], "acid-arrow");
    assert_eq!(translated["url"], "/api/2014/spells/acid-arrow");
    // Component acronyms are skipped.
    assert_eq!(translated["components"], json!(["V", "S", "M"]));
    // Free text goes through the provider.
    assert_eq!(
        translated["desc"][0],
        "[es] A shimmering green arrow streaks toward a target."
    );
    assert_eq!(translated["range"], "[es] 90 feet");
}

#[tokio::test]
async fn test_translate_value_withIdentityLocale_shouldReturnEqualTreeWithoutCalls() {
    let provider = MockProvider::working();
    let calls = provider.call_counter();
    let service = service_with(provider, 0);

    let tree = json!({
        "name": "Fireball",
        "desc": ["A bright streak flashes from your pointing finger."]
    });

    let translated = translate_value(&service, &tree, None, "en").await;

    assert_eq!(translated, tree);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_restore_spell_names_afterTranslation_shouldPinEnglishNames() {
    let service = service_with(MockProvider::working(), 0);

    let tree = json!({
        "spells": [{
            "index": "acid-arrow",
            "name": "Acid Arrow",
            "url": "/api/2014/spells/acid-arrow",
            "desc": ["A shimmering green arrow streaks toward a target."]
        }],
        "features": [{
            "index": "arcane-recovery",
            "name": "Arcane Recovery",
            "url": "/api/2014/features/arcane-recovery"
        }]
    });

    let mut translated = translate_value(&service, &tree, None, "es").await;

    // The provider touched both names.
    assert_eq!(translated["spells"][0]["name"], "[es] Acid Arrow");
    assert_eq!(translated["features"][0]["name"], "[es] Arcane Recovery");

    let english_names =
        std::collections::HashMap::from([("acid-arrow".to_string(), "Acid Arrow".to_string())]);
    restore_spell_names(&mut translated, &english_names);

    // Spell names are pinned back to English; feature names stay localized.
    assert_eq!(translated["spells"][0]["name"], "Acid Arrow");
    assert_eq!(translated["features"][0]["name"], "[es] Arcane Recovery");
}
