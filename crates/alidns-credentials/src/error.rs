//! Error types for credential storage.

use thiserror::Error;

/// Errors that can occur while saving credentials or resolving the user scope.
///
/// Loading and clearing never produce these; see [`crate::LoadOutcome`].
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Key source error: {0}")]
    KeySource(String),

    #[error("Configuration error: {0}")]
    Config(#[from] alidns_core::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;
