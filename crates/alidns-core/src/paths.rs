//! Path resolution utilities.
//!
//! Everything lives under one per-user application directory:
//! `<config dir>/AliDnsManager` (`%APPDATA%` on Windows, `~/.config` on Linux,
//! `~/Library/Application Support` on macOS). `ALIDNS_HOME` overrides it.

use crate::env;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Folder name under the platform configuration directory.
pub const APP_DIR_NAME: &str = "AliDnsManager";

/// Environment variable that relocates the application directory.
pub const HOME_ENV: &str = "ALIDNS_HOME";

/// Get the application directory.
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env::get_var(HOME_ENV) {
        return Ok(expand_tilde(&dir));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR_NAME))
}

/// Get the saved credentials file path (`config.json`).
///
/// The file name predates the settings file and is kept for upgrade compatibility.
pub fn credentials_file() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join("config.json"))
}

/// Get the settings file path (`settings.json5`).
pub fn settings_file() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join("settings.json5"))
}

/// Get the master key fallback file path (`user.key`).
pub fn master_key_file() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join("user.key"))
}

/// Ensure the application directory exists, restricted to the owner on Unix.
pub fn ensure_app_dir() -> Result<PathBuf, ConfigError> {
    let dir = app_dir()?;
    ensure_private_dir(&dir)?;
    Ok(dir)
}

/// Create `dir` (and parents) and set mode 0700 on Unix.
pub fn ensure_private_dir(dir: &Path) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        // Only the tail is stable; the base depends on the platform and ALIDNS_HOME.
        assert!(credentials_file().unwrap().ends_with("config.json"));
        assert!(settings_file().unwrap().ends_with("settings.json5"));
        assert!(master_key_file().unwrap().ends_with("user.key"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/test");
        assert!(!expanded.to_string_lossy().contains('~'));
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_private_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join(APP_DIR_NAME);
        ensure_private_dir(&dir).unwrap();

        let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }
}
