//! Error types for the DNS API client.

use alidns_core::ValidationError;
use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Service error codes that mean the AccessKey pair itself was rejected.
const AUTH_ERROR_CODES: [&str; 5] = [
    "InvalidAccessKeyId.NotFound",
    "InvalidAccessKeyId.Inactive",
    "SignatureDoesNotMatch",
    "IncompleteSignature",
    "Forbidden.RAM",
];

/// API client error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with an error body.
    #[error("API error {code}: {message} (RequestId: {request_id})")]
    Api {
        code: String,
        message: String,
        request_id: String,
    },

    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The AccessKey ID or Secret is empty.
    #[error("API credentials are not configured")]
    NotConfigured,

    /// A record draft failed the format checks; nothing was sent.
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// Bad endpoint or HTTP client setup.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Service error code, if this is a service error.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the service rejected the credentials rather than the request.
    pub fn is_auth_error(&self) -> bool {
        self.code()
            .map(|code| AUTH_ERROR_CODES.contains(&code))
            .unwrap_or(false)
    }
}
