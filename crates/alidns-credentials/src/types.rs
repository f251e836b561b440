//! Credential types, in memory and on disk.

use alidns_core::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The saved AccessKey pair, decrypted.
///
/// `Debug` shows the identifier but never the secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    identifier: String,
    secret: SecretString,
}

impl CredentialRecord {
    pub fn new(identifier: impl Into<String>, secret: impl Into<SecretString>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// The AccessKey ID.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The AccessKey Secret.
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Both halves present, i.e. usable for signing requests.
    pub fn is_complete(&self) -> bool {
        !self.identifier.trim().is_empty() && !self.secret.is_empty()
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identifier", &self.identifier)
            .field("secret", &self.secret)
            .finish()
    }
}

/// Where the store sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No credentials file.
    Absent,
    /// File present and the secret opens under the current scope.
    PresentValid,
    /// File present but unparseable or sealed under another scope.
    PresentInvalid,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreState::Absent => f.write_str("absent"),
            StoreState::PresentValid => f.write_str("present"),
            StoreState::PresentInvalid => f.write_str("unreadable"),
        }
    }
}

/// Result of loading saved credentials. Loading never fails outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing saved yet.
    Absent,
    /// Credentials decrypted under the current scope.
    Loaded(CredentialRecord),
    /// A file exists but could not be used.
    ///
    /// `identifier` is whatever could be parsed (possibly empty). The secret is
    /// withheld: undecryptable ciphertext is never presented as a secret.
    Unreadable { identifier: String, reason: String },
}

impl LoadOutcome {
    pub fn state(&self) -> StoreState {
        match self {
            LoadOutcome::Absent => StoreState::Absent,
            LoadOutcome::Loaded(_) => StoreState::PresentValid,
            LoadOutcome::Unreadable { .. } => StoreState::PresentInvalid,
        }
    }

    /// Caller-facing `(identifier, secret)` pair.
    ///
    /// `Absent` gives `("", "")`; `Unreadable` gives the parsed identifier and
    /// an empty secret, so a form can be pre-filled and the user re-enters
    /// only the secret.
    pub fn into_pair(self) -> (String, String) {
        match self {
            LoadOutcome::Absent => (String::new(), String::new()),
            LoadOutcome::Loaded(record) => (
                record.identifier().to_string(),
                record.secret().expose_secret().to_string(),
            ),
            LoadOutcome::Unreadable { identifier, .. } => (identifier, String::new()),
        }
    }
}

/// On-disk document.
///
/// Field names are fixed for compatibility with files written by earlier
/// releases. Both fields tolerate absence and `null`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct StoredCredentials {
    #[serde(rename = "AccessKeyId", default)]
    pub access_key_id: Option<String>,

    /// Base64 of the sealed secret, or empty when the secret is empty.
    #[serde(rename = "AccessKeySecret", default)]
    pub access_key_secret: Option<String>,
}
