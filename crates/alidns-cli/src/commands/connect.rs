//! `alidns connect`: verify an AccessKey pair and remember it.

use alidns_client::AliDnsClient;
use alidns_core::{SecretString, Settings};
use alidns_credentials::{CredentialError, CredentialStore};
use clap::Args;
use console::style;
use tracing::{debug, warn};

/// Connect command arguments.
#[derive(Args)]
pub struct ConnectArgs {
    /// AccessKey ID (defaults to the saved one, then prompts)
    #[arg(long, env = "ALIDNS_ACCESS_KEY_ID")]
    pub id: Option<String>,

    /// AccessKey Secret (defaults to the saved one, then prompts for hidden input)
    #[arg(long, env = "ALIDNS_ACCESS_KEY_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Verify only; do not save the credentials
    #[arg(long)]
    pub no_save: bool,
}

/// Run the connect command.
pub async fn run(args: ConnectArgs, settings: &Settings) -> anyhow::Result<()> {
    let store = super::open_store()?;

    // Prefill from what is saved; an unreadable file yields only the ID.
    let (saved_id, saved_secret) = store.load().into_pair();

    let id = match args.id.filter(|v| !v.trim().is_empty()) {
        Some(id) => id.trim().to_string(),
        None if !saved_id.is_empty() => saved_id.clone(),
        None => super::prompt_line("AccessKey ID: ")?,
    };
    if id.is_empty() {
        anyhow::bail!("AccessKey ID must not be empty");
    }

    // The saved secret only belongs to the saved ID.
    let secret = match args.secret.filter(|v| !v.trim().is_empty()) {
        Some(secret) => secret.trim().to_string(),
        None if id == saved_id && !saved_secret.is_empty() => saved_secret,
        None => rpassword::prompt_password("AccessKey Secret: ")
            .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))?
            .trim()
            .to_string(),
    };
    let secret = SecretString::new(secret);
    if secret.is_empty() {
        anyhow::bail!("AccessKey Secret must not be empty");
    }

    let client = AliDnsClient::from_settings(&id, &secret, settings)?;
    debug!(endpoint = %client.endpoint(), "verifying credentials");

    if let Err(e) = client.verify().await {
        if e.is_auth_error() {
            anyhow::bail!("The AccessKey pair was rejected: {}", e);
        }
        anyhow::bail!("Could not reach the DNS API: {}", e);
    }

    println!("{} Connected as {}", style("✓").green(), style(&id).bold());

    if args.no_save {
        println!("Credentials were not saved (--no-save).");
        return Ok(());
    }

    match store.save(&id, secret.expose_secret()) {
        Ok(()) => {}
        Err(CredentialError::KeySource(reason)) => {
            // Nothing else is sealed under the old key.
            warn!("master key unusable ({}), generating a new one", reason);
            store
                .reset_master_key()
                .and_then(|()| store.save(&id, secret.expose_secret()))
                .map_err(|e| anyhow::anyhow!("Failed to save credentials: {}", e))?;
        }
        Err(e) => anyhow::bail!("Failed to save credentials: {}", e),
    }
    println!("Credentials saved to {}", store.path().display());

    Ok(())
}
