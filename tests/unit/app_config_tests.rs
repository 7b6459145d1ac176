/*!
 * Tests for pipeline configuration
 */

use std::str::FromStr;

use srdsync::app_config::{Config, TranslationProvider};

#[test]
fn test_provider_from_str_withKnownNames_shouldParse() {
    assert_eq!(
        TranslationProvider::from_str("google").unwrap(),
        TranslationProvider::Google
    );
    assert_eq!(
        TranslationProvider::from_str("LibreTranslate").unwrap(),
        TranslationProvider::LibreTranslate
    );
    assert_eq!(
        TranslationProvider::from_str("mymemory").unwrap(),
        TranslationProvider::MyMemory
    );
    assert_eq!(
        TranslationProvider::from_str("none").unwrap(),
        TranslationProvider::None
    );
}

#[test]
fn test_provider_from_str_withUnknownName_shouldFail() {
    assert!(TranslationProvider::from_str("babelfish").is_err());
}

#[test]
fn test_provider_display_shouldRoundTripThroughFromStr() {
    for provider in [
        TranslationProvider::Google,
        TranslationProvider::LibreTranslate,
        TranslationProvider::MyMemory,
        TranslationProvider::None,
    ] {
        let parsed = TranslationProvider::from_str(&provider.to_string()).unwrap();
        assert_eq!(parsed, provider);
    }
}

#[test]
fn test_config_default_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.source_locale, "en");
    assert_eq!(config.target_locales, vec!["es".to_string()]);
    assert_eq!(config.translation.throttle_ms, 40);
    assert_eq!(config.translation.max_chunk_len, 350);
}

#[test]
fn test_config_validate_withBadLocale_shouldFail() {
    let mut config = Config::default();
    config.target_locales = vec!["zz".to_string()];
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.source_locale = "english".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withEmptyOutDir_shouldFail() {
    let mut config = Config::default();
    config.out_dir = "  ".to_string();
    assert!(config.validate().is_err());
}
