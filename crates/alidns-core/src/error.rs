//! Error types for AliDNS Manager core.

use std::path::PathBuf;
use thiserror::Error;

/// Core result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings and path resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not determine the per-user configuration directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON5 parse error: {0}")]
    Json5(String),
}

/// A DNS record draft that fails the format checks.
///
/// Each variant names the offending field so callers can point the user at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Host record (RR) must not be empty")]
    EmptyHostRecord,

    #[error("Record value must not be empty")]
    EmptyValue,

    #[error("TTL must be a number greater than 0")]
    InvalidTtl,

    #[error("A record value must be a valid IPv4 address: {0}")]
    InvalidIpv4(String),

    #[error("AAAA record value must be a valid IPv6 address: {0}")]
    InvalidIpv6(String),

    #[error("MX record requires a priority greater than 0")]
    MissingMxPriority,

    #[error("Unsupported record type: {0}")]
    UnsupportedType(String),
}
