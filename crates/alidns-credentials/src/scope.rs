//! The per-user, per-machine encryption scope.
//!
//! Key material is the master key bound to the OS user name and a machine
//! identifier. A credentials file copied to another account or machine fails
//! to open, the same way a user-scoped platform protection API would.

use std::fmt;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::Result;
use crate::keychain;

/// Machine identifier sources, tried in order before the host name.
const MACHINE_ID_FILES: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Key material scoped to one user on one machine.
#[derive(Clone)]
pub struct UserScope {
    user: String,
    machine: String,
    key_material: Zeroizing<Vec<u8>>,
}

impl UserScope {
    /// Build a scope from explicit parts.
    pub fn from_parts(master_key: &[u8], user: &str, machine: &str) -> Self {
        // Length-prefixed so ("ab", "c") and ("a", "bc") never collide.
        let mut material = Zeroizing::new(Vec::with_capacity(
            master_key.len() + user.len() + machine.len() + 24,
        ));
        for part in [master_key, user.as_bytes(), machine.as_bytes()] {
            material.extend_from_slice(&(part.len() as u64).to_be_bytes());
            material.extend_from_slice(part);
        }

        Self {
            user: user.to_string(),
            machine: machine.to_string(),
            key_material: material,
        }
    }

    /// Resolve the scope of the current OS user.
    ///
    /// `key_file` is the master key fallback location; see [`crate::keychain`].
    pub fn current(key_file: &Path) -> Result<Self> {
        let master_key = keychain::get_or_create_master_key(key_file)?;
        let user = current_user();
        let machine = machine_id();
        debug!(user = %user, "resolved credential scope");
        Ok(Self::from_parts(&master_key, &user, &machine))
    }

    /// Resolve the current scope with the default key file location.
    pub fn current_default() -> Result<Self> {
        let key_file = alidns_core::paths::master_key_file()?;
        Self::current(&key_file)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn machine(&self) -> &str {
        &self.machine
    }

    pub(crate) fn key_material(&self) -> &[u8] {
        &self.key_material
    }
}

impl fmt::Debug for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserScope")
            .field("user", &self.user)
            .field("key_material", &"[REDACTED]")
            .finish()
    }
}

fn current_user() -> String {
    alidns_core::env::first_var(&["USER", "USERNAME", "LOGNAME"])
        .unwrap_or_else(|| "unknown".to_string())
}

/// The OS machine id, falling back to the host name.
fn machine_id() -> String {
    for path in MACHINE_ID_FILES {
        if let Ok(id) = std::fs::read_to_string(path) {
            let id = id.trim();
            if !id.is_empty() {
                return id.to_string();
            }
        }
    }

    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_string())
}
