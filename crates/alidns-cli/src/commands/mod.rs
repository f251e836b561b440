//! CLI command implementations.

pub mod config;
pub mod connect;
pub mod credentials;
pub mod doctor;
pub mod domains;
pub mod records;

use std::io::{BufRead, Write};

use alidns_client::AliDnsClient;
use alidns_core::Settings;
use alidns_credentials::{CredentialStore, FileCredentialStore, LoadOutcome};

/// Open the credential store at its default location.
pub(crate) fn open_store() -> anyhow::Result<FileCredentialStore> {
    FileCredentialStore::from_default_location()
        .map_err(|e| anyhow::anyhow!("Failed to initialize credential store: {}", e))
}

/// Build an API client from the saved credentials.
///
/// Missing or unreadable credentials mean "not connected".
pub(crate) fn saved_client(settings: &Settings) -> anyhow::Result<AliDnsClient> {
    let store = open_store()?;

    match store.load() {
        LoadOutcome::Loaded(record) if record.is_complete() => {
            Ok(AliDnsClient::from_settings(record.identifier(), record.secret(), settings)?)
        }
        LoadOutcome::Unreadable { reason, .. } => anyhow::bail!(
            "Saved credentials cannot be read ({}). Run 'alidns connect' to enter them again.",
            reason
        ),
        _ => anyhow::bail!("Not connected. Run 'alidns connect' first."),
    }
}

/// Print `prompt` and read one line from stdin, trimmed.
pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question; anything but `y`/`yes` is no.
pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let answer = prompt_line(&format!("{} [y/N]: ", prompt))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
