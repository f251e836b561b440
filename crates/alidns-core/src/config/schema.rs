//! Settings schema definitions.

use crate::types::LineCode;
use serde::{Deserialize, Serialize};

/// Default Alibaba Cloud DNS endpoint.
pub const DEFAULT_ENDPOINT: &str = "alidns.cn-hangzhou.aliyuncs.com";

/// Application settings, stored as JSON5 next to the credentials file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults applied to new records.
    #[serde(default)]
    pub records: RecordDefaults,
}

/// API endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Host name or full URL of the DNS API.
    #[serde(default = "default_endpoint")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Raise the level by `steps` (used by repeated `-v`).
    pub fn raised(self, steps: u8) -> Self {
        let order = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let idx = order.iter().position(|l| *l == self).unwrap_or(2);
        order[(idx + steps as usize).min(order.len() - 1)]
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Defaults pre-filled when adding a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDefaults {
    /// TTL in seconds.
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,

    /// Resolution line code.
    #[serde(default = "default_line")]
    pub default_line: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            default_line: default_line(),
        }
    }
}

fn default_ttl() -> u64 {
    600
}

fn default_line() -> String {
    LineCode::DEFAULT.to_string()
}
