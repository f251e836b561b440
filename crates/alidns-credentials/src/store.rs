//! Credential storage backends.
//!
//! Defines the [`CredentialStore`] trait and provides [`FileCredentialStore`],
//! which keeps one JSON document per user profile at
//! `{app dir}/config.json`.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use tracing::{debug, warn};

use crate::crypto;
use crate::keychain;
use crate::error::{CredentialError, Result};
use crate::scope::UserScope;
use crate::types::{CredentialRecord, LoadOutcome, StoreState, StoredCredentials};

/// Storage for the single saved AccessKey pair.
///
/// Operations are synchronous and hold no file handles between calls.
pub trait CredentialStore: Send + Sync {
    /// Encrypt and persist the pair, replacing whatever was saved before.
    ///
    /// Both values may be empty. Fails with [`CredentialError::Storage`] when
    /// the directory or file cannot be written.
    fn save(&self, identifier: &str, secret: &str) -> Result<()>;

    /// Read the saved pair. Never fails; see [`LoadOutcome`].
    fn load(&self) -> LoadOutcome;

    /// Remove the saved pair. A missing file is fine and errors are swallowed.
    fn clear(&self);

    /// Report the lifecycle state without handing out the secret.
    fn status(&self) -> StoreState {
        self.load().state()
    }
}

/// Where the sealing scope comes from.
enum ScopeSource {
    Fixed(UserScope),
    /// The current user's scope, with `user.key` as the master key fallback.
    Current { key_file: PathBuf },
}

/// A file-system-backed credential store.
///
/// The secret is sealed under the [`UserScope`] before it touches disk. Writes
/// go through a temporary file in the same directory that is renamed over the
/// target, so readers see either the old or the new document.
///
/// The scope is resolved only when a secret is sealed or opened, so `clear`
/// and `path` work even when the master key cannot be read.
pub struct FileCredentialStore {
    path: PathBuf,
    source: ScopeSource,
}

impl FileCredentialStore {
    /// Create a store for `path` sealing under `scope`.
    pub fn new(path: PathBuf, scope: UserScope) -> Self {
        Self {
            path,
            source: ScopeSource::Fixed(scope),
        }
    }

    /// Create a store for `path` sealing under the current user's scope,
    /// with `key_file` as the master key fallback.
    pub fn for_current_user(path: PathBuf, key_file: PathBuf) -> Self {
        Self {
            path,
            source: ScopeSource::Current { key_file },
        }
    }

    /// Create a store at the default location (`{app dir}/config.json`)
    /// sealing under the current user's scope.
    pub fn from_default_location() -> Result<Self> {
        let path = alidns_core::paths::credentials_file()?;
        let key_file = alidns_core::paths::master_key_file()?;
        Ok(Self::for_current_user(path, key_file))
    }

    /// The credentials file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the sealing scope.
    pub fn scope(&self) -> Result<UserScope> {
        match &self.source {
            ScopeSource::Fixed(scope) => Ok(scope.clone()),
            ScopeSource::Current { key_file } => UserScope::current(key_file),
        }
    }

    /// Replace an unusable master key file with a new key.
    ///
    /// Secrets sealed under the old key stay unreadable; save again afterwards.
    /// Fails when the key comes from `ALIDNS_MASTER_KEY` or the store was
    /// built with a fixed scope.
    pub fn reset_master_key(&self) -> Result<()> {
        match &self.source {
            ScopeSource::Fixed(_) => Err(CredentialError::KeySource(
                "store uses a fixed scope".to_string(),
            )),
            ScopeSource::Current { key_file } => keychain::replace_key_file(key_file),
        }
    }

    /// Seal and base64-encode a secret. Empty stays empty.
    fn protect(&self, secret: &str) -> Result<String> {
        if secret.is_empty() {
            return Ok(String::new());
        }
        let scope = self.scope()?;
        let sealed = crypto::seal(scope.key_material(), secret.as_bytes())?;
        Ok(base64::engine::general_purpose::STANDARD.encode(sealed))
    }

    /// Inverse of [`Self::protect`].
    fn unprotect(&self, encoded: &str) -> Result<String> {
        if encoded.is_empty() {
            return Ok(String::new());
        }
        let sealed = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| CredentialError::DecryptionFailed(format!("base64 decode failed: {e}")))?;
        let scope = self.scope()?;
        let plaintext = crypto::open(scope.key_material(), &sealed)?;
        String::from_utf8(plaintext)
            .map_err(|e| CredentialError::DecryptionFailed(format!("invalid UTF-8: {e}")))
    }

    fn write_document(&self, json: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        alidns_core::paths::ensure_private_dir(dir).map_err(|e| {
            CredentialError::Storage(format!("cannot create directory {}: {e}", dir.display()))
        })?;

        let storage_err = |e: std::io::Error| {
            CredentialError::Storage(format!("cannot write {}: {e}", self.path.display()))
        };

        // tempfile creates the file with mode 0600 on Unix.
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(storage_err)?;
        tmp.write_all(json).map_err(storage_err)?;
        tmp.as_file().sync_all().map_err(storage_err)?;
        tmp.persist(&self.path).map_err(|e| storage_err(e.error))?;

        Ok(())
    }

    fn unreadable(identifier: String, reason: String) -> LoadOutcome {
        warn!("saved credentials are unreadable: {reason}");
        LoadOutcome::Unreadable { identifier, reason }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, identifier: &str, secret: &str) -> Result<()> {
        let stored = StoredCredentials {
            access_key_id: Some(identifier.to_string()),
            access_key_secret: Some(self.protect(secret)?),
        };

        let json = serde_json::to_string_pretty(&stored)?;
        debug!(path = %self.path.display(), "writing credentials");
        self.write_document(json.as_bytes())
    }

    fn load(&self) -> LoadOutcome {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved credentials");
                return LoadOutcome::Absent;
            }
            Err(e) => return Self::unreadable(String::new(), format!("read failed: {e}")),
        };

        let stored: StoredCredentials = match serde_json::from_str(&data) {
            Ok(stored) => stored,
            Err(e) => return Self::unreadable(String::new(), format!("malformed document: {e}")),
        };

        let identifier = stored.access_key_id.unwrap_or_default();
        let encoded = stored.access_key_secret.unwrap_or_default();

        match self.unprotect(&encoded) {
            Ok(secret) => {
                debug!(path = %self.path.display(), "loaded credentials");
                LoadOutcome::Loaded(CredentialRecord::new(identifier, secret))
            }
            Err(e) => Self::unreadable(identifier, e.to_string()),
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "cleared credentials"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "could not remove credentials: {e}"),
        }
    }
}
