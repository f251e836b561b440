//! Shared fixtures for the cross-crate tests.

use std::path::PathBuf;

use alidns_credentials::{FileCredentialStore, UserScope};
use tempfile::TempDir;

/// Master key used by every fixture scope.
pub const TEST_MASTER_KEY: [u8; 32] = [0x5a; 32];

/// A scope for `user` on a fixed test machine.
pub fn scope_for(user: &str) -> UserScope {
    UserScope::from_parts(&TEST_MASTER_KEY, user, "integration-host")
}

/// Path of the credentials file inside a temporary application directory.
pub fn credentials_path(dir: &TempDir) -> PathBuf {
    dir.path().join("AliDnsManager").join("config.json")
}

/// A store for `user` in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn store_for(user: &str) -> (FileCredentialStore, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let store = FileCredentialStore::new(credentials_path(&dir), scope_for(user));
    (store, dir)
}
