/*!
 * Tests for app configuration
 */

use std::fs;

use termlock::app_config::{Config, LogLevel, ProviderConfig, SegmentationMode, TranslationProvider};

use crate::common;

#[test]
fn test_config_withInvalidConfigFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_config_saveAndLoad_shouldRoundTripCustomValues() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = common::mock_config(None);
    config.target_language = "gaa".to_string();
    config.terminology_path = Some("terms.csv".to_string());
    config.segmentation = SegmentationMode::Words;
    config.provider.rate_limit = Some(60);
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::load_or_create(&path).unwrap();
    assert_eq!(loaded.target_language, "gaa");
    assert_eq!(loaded.terminology_path.as_deref(), Some("terms.csv"));
    assert_eq!(loaded.segmentation, SegmentationMode::Words);
    assert_eq!(loaded.provider.provider_type, TranslationProvider::Mock);
    assert_eq!(loaded.provider.rate_limit, Some(60));
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

#[test]
fn test_config_save_shouldUseTypeKeyForProvider() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");
    common::mock_config(None).save(&path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["provider"]["type"], "mock");
    assert_eq!(json["segmentation"], "chunked");
}

#[test]
fn test_validate_withAliasTarget_shouldPass() {
    let config = Config {
        target_language: "twi".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withInvalidSource_shouldFail() {
    let config = Config {
        source_language: "qqq".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_googleWithoutEndpoint_shouldFail() {
    let mut config = Config::default();
    config.provider.endpoint = "  ".to_string();
    assert!(config.validate().is_err());

    config.provider.provider_type = TranslationProvider::Mock;
    assert!(config.validate().is_ok());
}

#[test]
fn test_providerConfig_defaults() {
    let provider = ProviderConfig::default();

    assert_eq!(provider.provider_type, TranslationProvider::Google);
    assert_eq!(provider.concurrent_requests, 4);
    assert_eq!(provider.timeout_secs, 30);
    assert_eq!(provider.retry_count, 3);
    assert_eq!(provider.retry_backoff_ms, 1000);
    assert!(provider.rate_limit.is_none());
}

#[test]
fn test_logLevel_toLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
