//! Master key resolution.
//!
//! The master key is the per-user secret half of the scope key material.
//! It is resolved in priority order:
//! 1. `ALIDNS_MASTER_KEY` environment variable (hex-encoded)
//! 2. OS keychain (macOS Keychain via Security.framework)
//! 3. Key file in the application directory, created with mode 0600
//!
//! On platforms without a keychain backend step 2 is skipped.

use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto;
use crate::error::{CredentialError, Result};

#[cfg(target_os = "macos")]
const SERVICE_NAME: &str = "AliDnsManager";
#[cfg(target_os = "macos")]
const ACCOUNT_NAME: &str = "master_key";

/// Environment variable name for the master key (hex-encoded).
pub const ENV_VAR: &str = "ALIDNS_MASTER_KEY";

const KEY_LEN: usize = 32;

/// Retrieve the master key, creating one if none exists yet.
///
/// `key_file` is only touched when neither the environment nor the OS
/// keychain provides a key.
pub fn get_or_create_master_key(key_file: &Path) -> Result<Zeroizing<Vec<u8>>> {
    resolve_master_key(alidns_core::env::get_var(ENV_VAR), key_file)
}

/// Resolution with the environment value passed in.
pub(crate) fn resolve_master_key(
    env_value: Option<String>,
    key_file: &Path,
) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(hex_key) = env_value {
        debug!("using master key from environment variable");
        return decode_key(&hex_key, ENV_VAR);
    }

    if let Some(key) = get_from_keychain()? {
        debug!("using master key from OS keychain");
        return Ok(key);
    }

    load_or_create_key_file(key_file)
}

/// Decode a hex key, checking its length. `origin` names the source in errors.
fn decode_key(hex_key: &str, origin: &str) -> Result<Zeroizing<Vec<u8>>> {
    let key = Zeroizing::new(
        hex::decode(hex_key.trim())
            .map_err(|e| CredentialError::KeySource(format!("invalid hex in {origin}: {e}")))?,
    );
    if key.len() != KEY_LEN {
        return Err(CredentialError::KeySource(format!(
            "{origin} must decode to exactly {KEY_LEN} bytes, got {}",
            key.len()
        )));
    }
    Ok(key)
}

/// Read the key file, or generate a key and write it with mode 0600.
///
/// When another process creates the file first, its key is used.
pub(crate) fn load_or_create_key_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    if path.exists() {
        debug!(path = %path.display(), "using master key from key file");
        return read_key_file(path);
    }

    debug!(path = %path.display(), "generating new master key");
    let key = crypto::generate_master_key();

    if let Some(parent) = path.parent() {
        alidns_core::paths::ensure_private_dir(parent).map_err(|e| {
            CredentialError::KeySource(format!("cannot create {}: {e}", parent.display()))
        })?;
    }

    let encoded = Zeroizing::new(hex::encode(key.as_slice()));
    match write_private(path, encoded.as_bytes()) {
        Ok(()) => Ok(key),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "key file created concurrently");
            read_key_file(path)
        }
        Err(e) => Err(CredentialError::KeySource(format!(
            "cannot write {}: {e}",
            path.display()
        ))),
    }
}

fn read_key_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let content = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
        CredentialError::KeySource(format!("cannot read {}: {e}", path.display()))
    })?);
    decode_key(&content, &path.display().to_string())
}

/// Replace the key file with a freshly generated key.
///
/// Refused while `ALIDNS_MASTER_KEY` is set, since the file would not be used.
pub(crate) fn replace_key_file(path: &Path) -> Result<()> {
    if alidns_core::env::get_var(ENV_VAR).is_some() {
        return Err(CredentialError::KeySource(format!(
            "{ENV_VAR} is set; fix or unset it instead"
        )));
    }

    match std::fs::remove_file(path) {
        Ok(()) => warn!(path = %path.display(), "discarded unusable master key file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(CredentialError::KeySource(format!(
                "cannot remove {}: {e}",
                path.display()
            )))
        }
    }

    load_or_create_key_file(path).map(|_| ())
}

/// Write `path` in one step, owner-only on Unix. Never replaces an existing file.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // tempfile creates the file with mode 0600 on Unix.
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// macOS keychain implementation
// ---------------------------------------------------------------------------

#[cfg(target_os = "macos")]
fn get_from_keychain() -> Result<Option<Zeroizing<Vec<u8>>>> {
    use security_framework::passwords::{get_generic_password, set_generic_password};

    match get_generic_password(SERVICE_NAME, ACCOUNT_NAME) {
        Ok(data) => {
            let hex_str = Zeroizing::new(String::from_utf8(data.to_vec()).map_err(|e| {
                CredentialError::KeySource(format!("keychain data is not valid UTF-8: {e}"))
            })?);
            decode_key(&hex_str, "keychain entry").map(Some)
        }
        Err(e) => {
            // errSecItemNotFound: first run, so create and store a key.
            let msg = e.to_string();
            if msg.contains("not found") || msg.contains("-25300") {
                let key = crypto::generate_master_key();
                let hex_key = Zeroizing::new(hex::encode(key.as_slice()));
                set_generic_password(SERVICE_NAME, ACCOUNT_NAME, hex_key.as_bytes()).map_err(
                    |e| CredentialError::KeySource(format!("keychain write failed: {e}")),
                )?;
                Ok(Some(key))
            } else {
                Err(CredentialError::KeySource(format!(
                    "keychain read failed: {e}"
                )))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Other platforms: no keychain backend, the key file is used
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "macos"))]
fn get_from_keychain() -> Result<Option<Zeroizing<Vec<u8>>>> {
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_master_key_from_env_value() {
        let tmp = TempDir::new().unwrap();
        let key = crypto::generate_master_key();
        let hex_key = hex::encode(key.as_slice());

        let resolved = resolve_master_key(Some(hex_key), &tmp.path().join("user.key")).unwrap();
        assert_eq!(resolved.as_slice(), key.as_slice());
        // The env path never writes a key file.
        assert!(!tmp.path().join("user.key").exists());
    }

    #[test]
    fn test_invalid_hex_in_env_value() {
        let tmp = TempDir::new().unwrap();
        let result = resolve_master_key(Some("not-valid-hex!".into()), &tmp.path().join("k"));
        assert!(matches!(result, Err(CredentialError::KeySource(_))));
    }

    #[test]
    fn test_wrong_length_key_in_env_value() {
        let tmp = TempDir::new().unwrap();
        let result = resolve_master_key(Some(hex::encode([0u8; 16])), &tmp.path().join("k"));
        assert!(matches!(result, Err(CredentialError::KeySource(_))));
    }

    #[test]
    fn test_key_file_is_created_once() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("AliDnsManager").join("user.key");

        let first = load_or_create_key_file(&path).unwrap();
        let second = load_or_create_key_file(&path).unwrap();

        assert_eq!(first.len(), KEY_LEN);
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn test_concurrent_first_use_agrees_on_one_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user.key");

        let keys: Vec<Vec<u8>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| load_or_create_key_file(&path).map(|k| k.to_vec())))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        let on_disk = load_or_create_key_file(&path).unwrap();
        for key in keys {
            assert_eq!(key.as_slice(), on_disk.as_slice());
        }
    }

    #[test]
    fn test_existing_key_file_is_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user.key");
        let existing = hex::encode([3u8; KEY_LEN]);
        std::fs::write(&path, &existing).unwrap();

        let err = write_private(&path, b"other").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), existing);
    }

    #[test]
    fn test_replace_key_file_recovers_from_corruption() {
        if alidns_core::env::get_var(ENV_VAR).is_some() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user.key");
        std::fs::write(&path, "zz").unwrap();

        replace_key_file(&path).unwrap();
        assert_eq!(load_or_create_key_file(&path).unwrap().len(), KEY_LEN);
    }

    #[test]
    fn test_corrupt_key_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user.key");
        std::fs::write(&path, "zz").unwrap();

        assert!(matches!(
            load_or_create_key_file(&path),
            Err(CredentialError::KeySource(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user.key");
        load_or_create_key_file(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "key file should have 0600 permissions");
    }
}
