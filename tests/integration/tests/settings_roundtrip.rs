//! Settings save/load roundtrip tests.
//!
//! These verify that settings can be written to disk and loaded back with
//! identical field values, and that hand-edited JSON5 is accepted.

use alidns_core::config::LogLevel;
use alidns_core::{ConfigError, Settings};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_settings_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json5");

    let settings = Settings::default();
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json5");

    let mut settings = Settings::default();
    settings.endpoint.url = "alidns.ap-southeast-1.aliyuncs.com".to_string();
    settings.logging.level = LogLevel::Debug;
    settings.records.default_ttl = 60;
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded.endpoint.url, "alidns.ap-southeast-1.aliyuncs.com");
    assert_eq!(loaded.logging.level, LogLevel::Debug);
    assert_eq!(loaded.records.default_ttl, 60);
}

#[test]
fn test_hand_edited_json5() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json5");
    std::fs::write(
        &path,
        r#"{
            // only what differs from the defaults
            logging: { level: "warn" },
            records: { default_line: "telecom", },
        }"#,
    )
    .unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded.logging.level, LogLevel::Warn);
    assert_eq!(loaded.records.default_line, "telecom");
    assert_eq!(loaded.endpoint, Settings::default().endpoint);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_settings_load_nonexistent() {
    let result = Settings::load(Path::new("/nonexistent/settings.json5"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_settings_parse_invalid() {
    assert!(Settings::parse("not valid json5 {").is_err());
}
