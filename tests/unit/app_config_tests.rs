/*!
 * Tests for application configuration functionality
 */

use std::fs;
use yaltwai::app_config::{Config, LogLevel, SegmentProtocol, TranslationProvider};
use yaltwai::formats::Platform;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_languages, vec!["fr".to_string()]);
    assert_eq!(config.platform, None);
    assert_eq!(config.translation.provider, TranslationProvider::DeepSeek);
    assert_eq!(config.translation.common.batch_size, 10);
    assert_eq!(config.translation.common.batch_delay_ms, 1000);
    assert_eq!(config.translation.common.segment_protocol, SegmentProtocol::Delimiter);
    assert_eq!(config.log_level, LogLevel::Info);

    let gemini = config
        .translation
        .get_provider_config(&TranslationProvider::Gemini)
        .expect("Gemini provider config should exist");
    assert_eq!(gemini.model, "gemini-1.5-flash");
    assert_eq!(gemini.endpoint, "https://generativelanguage.googleapis.com");
    assert_eq!(gemini.timeout_secs, 60);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "invalid".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    config.target_languages = vec!["fr".to_string(), "??".to_string()];
    assert!(config.validate().is_err());
    config.target_languages = vec!["fr".to_string(), "zh-Hans".to_string()];
    assert!(config.validate().is_ok());

    config.translation.common.batch_size = 0;
    assert!(config.validate().is_err());
    config.translation.common.batch_size = 5;

    config.translation.common.temperature = 3.5;
    assert!(config.validate().is_err());
}

/// A missing API key is reported by the provider, not by validation
#[test]
fn test_validate_withEmptyApiKey_shouldStillPass() {
    let config = Config::default();
    assert!(config.translation.get_api_key().is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested").join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.source_language, "en");
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"deepseek\""));
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "source_language": "zh-Hans",
            "target_languages": ["en", "ja"],
            "platform": "flutter",
            "translation": {
                "provider": "gemini",
                "available_providers": [
                    { "type": "gemini", "api_key": "g-key", "model": "gemini-pro" }
                ],
                "common": { "batch_size": 20, "segment_protocol": "json_array" }
            }
        }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.source_language, "zh-Hans");
    assert_eq!(config.platform, Some(Platform::Flutter));
    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.translation.get_api_key(), "g-key");
    assert_eq!(config.translation.get_model(), "gemini-pro");
    assert_eq!(config.translation.get_endpoint(), "https://generativelanguage.googleapis.com");
    assert_eq!(config.translation.get_timeout_secs(), 60);
    assert_eq!(config.translation.common.batch_size, 20);
    assert_eq!(config.translation.common.batch_delay_ms, 1000);
    assert_eq!(config.translation.common.segment_protocol, SegmentProtocol::JsonArray);
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json").unwrap();
    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_save_thenLoad_shouldKeepOverrides() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Gemini;
    config.set_api_key("abc");
    config.set_model("gemini-1.5-pro");
    config.save(&path).unwrap();

    let loaded = Config::load_or_create(&path).unwrap();
    assert_eq!(loaded.translation.provider, TranslationProvider::Gemini);
    assert_eq!(loaded.translation.get_api_key(), "abc");
    assert_eq!(loaded.translation.get_model(), "gemini-1.5-pro");
    // The DeepSeek entry is untouched
    let deepseek = loaded.translation.get_provider_config(&TranslationProvider::DeepSeek).unwrap();
    assert!(deepseek.api_key.is_empty());
}

#[test]
fn test_translationProvider_fromStr_shouldIgnoreCase() {
    assert_eq!("DeepSeek".parse::<TranslationProvider>().unwrap(), TranslationProvider::DeepSeek);
    assert_eq!("gemini".parse::<TranslationProvider>().unwrap(), TranslationProvider::Gemini);
    assert!("openai".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Gemini.to_string(), "gemini");
}

#[test]
fn test_logLevel_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
