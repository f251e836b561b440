//! Settings loading and persistence.

use super::Settings;
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Overrides `endpoint.url`.
pub const ENDPOINT_ENV: &str = "ALIDNS_ENDPOINT";

/// Overrides `endpoint.timeout_secs`.
pub const TIMEOUT_ENV: &str = "ALIDNS_TIMEOUT_SECS";

/// Overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "ALIDNS_LOG_LEVEL";

impl Settings {
    /// Load settings from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::settings_file()?;
        Self::load(&path)
    }

    /// Load settings from the default path, falling back to defaults when the
    /// file does not exist. Environment overrides are applied either way.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = paths::settings_file()?;
        let mut settings = match Self::load(&path) {
            Ok(settings) => settings,
            Err(ConfigError::NotFound(_)) => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Load settings from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save settings to the default path.
    pub fn save_default(&self) -> Result<(), ConfigError> {
        let path = paths::settings_file()?;
        self.save(&path)
    }

    /// Save settings to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to a JSON5-compatible string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5.
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `ALIDNS_ENDPOINT`, `ALIDNS_TIMEOUT_SECS` and `ALIDNS_LOG_LEVEL`.
    ///
    /// An unparseable log level is ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = env::get_var(ENDPOINT_ENV) {
            self.endpoint.url = url.trim().to_string();
        }
        if let Some(secs) = env::get_u64(TIMEOUT_ENV) {
            self.endpoint.timeout_secs = secs;
        }
        if let Some(level) = env::get_var(LOG_LEVEL_ENV) {
            match level.parse() {
                Ok(level) => self.logging.level = level,
                Err(e) => tracing::warn!("ignoring {LOG_LEVEL_ENV}: {e}"),
            }
        }
    }

    /// Validate the settings, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let url = self.endpoint.url.trim();
        if url.is_empty() {
            errors.push("endpoint.url must not be empty".to_string());
        } else if url.contains(char::is_whitespace) {
            errors.push(format!("endpoint.url contains whitespace: '{url}'"));
        }

        if self.endpoint.timeout_secs == 0 {
            errors.push("endpoint.timeout_secs must be greater than 0".to_string());
        }

        if self.records.default_ttl == 0 {
            errors.push("records.default_ttl must be greater than 0".to_string());
        }

        if self.records.default_line.trim().is_empty() {
            errors.push("records.default_line must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json5_with_comments() {
        let settings = Settings::parse(
            r#"{
                // regional endpoint
                endpoint: { url: "alidns.cn-shanghai.aliyuncs.com", timeout_secs: 10 },
                logging: { level: "debug" },
            }"#,
        )
        .unwrap();

        assert_eq!(settings.endpoint.url, "alidns.cn-shanghai.aliyuncs.com");
        assert_eq!(settings.endpoint.timeout_secs, 10);
        assert_eq!(settings.logging.level, LogLevel::Debug);
        // Missing section falls back to defaults.
        assert_eq!(settings.records.default_ttl, 600);
        assert_eq!(settings.records.default_line, "default");
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Settings::parse("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json5");

        let mut settings = Settings::default();
        settings.endpoint.timeout_secs = 5;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = Settings::load(&dir.path().join("absent.json5"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Settings::parse("not valid json"),
            Err(ConfigError::Json5(_))
        ));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.endpoint.url = "  ".to_string();
        settings.endpoint.timeout_secs = 0;
        settings.records.default_ttl = 0;

        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("endpoint.url"));
        assert!(err.contains("timeout_secs"));
        assert!(err.contains("default_ttl"));
    }

    #[test]
    fn test_log_level_raised() {
        assert_eq!(LogLevel::Info.raised(0), LogLevel::Info);
        assert_eq!(LogLevel::Info.raised(1), LogLevel::Debug);
        assert_eq!(LogLevel::Info.raised(9), LogLevel::Trace);
        assert_eq!(LogLevel::Error.raised(1), LogLevel::Warn);
    }
}
