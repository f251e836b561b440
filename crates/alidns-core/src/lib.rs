//! # alidns-core
//!
//! Core types, settings, and utilities for AliDNS Manager.
//!
//! This crate provides shared functionality used across all AliDNS Manager crates:
//!
//! - **Settings**: Loading, validation, and persistence of the JSON5 settings file
//! - **Types**: Domain and record models plus the record format checks
//! - **Utilities**: Application directory resolution, secret strings, and environment handling

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;
pub mod types;

// Re-exports for convenience
pub use config::Settings;
pub use error::{ConfigError, Error, Result, ValidationError};
pub use secret::SecretString;
pub use types::*;
