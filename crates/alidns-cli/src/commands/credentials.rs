//! Saved credential commands.
//!
//! Provides `alidns credentials status|show|clear|path` on top of the
//! `alidns-credentials` store. The secret itself is never printed.

use alidns_credentials::{CredentialStore, LoadOutcome};
use clap::Args;
use console::style;

/// Credentials command arguments.
#[derive(Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

#[derive(clap::Subcommand)]
pub enum CredentialsCommand {
    /// Report whether credentials are saved and readable
    Status,

    /// Print the AccessKey ID and a masked secret
    Show,

    /// Remove the saved credentials
    Clear,

    /// Show the credentials file path
    Path,
}

/// Run the credentials command.
pub fn run(args: CredentialsArgs) -> anyhow::Result<()> {
    let store = super::open_store()?;

    match args.command {
        CredentialsCommand::Status => match store.load() {
            LoadOutcome::Unreadable { reason, .. } => {
                println!("{} ({})", style("unreadable").yellow(), reason);
            }
            outcome => println!("{}", outcome.state()),
        },

        CredentialsCommand::Show => match store.load() {
            LoadOutcome::Absent => println!("No credentials saved."),
            LoadOutcome::Loaded(record) => {
                println!("{:<18} {}", "AccessKey ID:", record.identifier());
                println!("{:<18} {}", "AccessKey Secret:", record.secret().masked());
            }
            LoadOutcome::Unreadable { identifier, reason } => {
                println!("{:<18} {}", "AccessKey ID:", identifier);
                println!(
                    "{:<18} {}",
                    "AccessKey Secret:",
                    style(format!("unreadable ({})", reason)).yellow()
                );
            }
        },

        CredentialsCommand::Clear => {
            store.clear();
            println!("Credentials cleared.");
        }

        CredentialsCommand::Path => {
            println!("{}", store.path().display());
        }
    }

    Ok(())
}
