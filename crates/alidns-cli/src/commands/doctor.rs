//! Diagnostic commands.

use alidns_client::AliDnsClient;
use alidns_core::{paths, Settings};
use alidns_credentials::{CredentialStore, LoadOutcome};
use clap::Args;
use console::{style, Emoji};

static CHECK: Emoji = Emoji("✓", "+");
static CROSS: Emoji = Emoji("✗", "x");
static WARN: Emoji = Emoji("⚠", "!");

/// Doctor command arguments.
#[derive(Args)]
pub struct DoctorArgs {
    /// Also call the DNS API with the saved credentials
    #[arg(long)]
    pub full: bool,
}

/// Run the doctor command.
pub async fn run(args: DoctorArgs, settings: &Settings) -> anyhow::Result<()> {
    println!("AliDNS Manager Doctor\n");

    let mut errors = 0;
    let mut warnings = 0;

    // Check directories
    println!("Checking directories...");

    match paths::app_dir() {
        Ok(dir) if dir.exists() => {
            println!("  {} Application directory exists: {}", style(CHECK).green(), dir.display());
        }
        Ok(dir) => {
            println!("  {} Application directory missing: {}", style(WARN).yellow(), dir.display());
            warnings += 1;
        }
        Err(e) => {
            println!("  {} Failed to determine application directory: {}", style(CROSS).red(), e);
            errors += 1;
        }
    }

    // Check settings
    println!("\nChecking settings...");

    match Settings::load_default() {
        Ok(file_settings) => match file_settings.validate() {
            Ok(()) => println!("  {} Settings valid", style(CHECK).green()),
            Err(e) => {
                println!("  {} Settings invalid: {}", style(CROSS).red(), e);
                errors += 1;
            }
        },
        Err(alidns_core::ConfigError::NotFound(_)) => {
            println!("  {} No settings file, defaults apply", style(CHECK).green());
        }
        Err(e) => {
            println!("  {} Settings error: {}", style(CROSS).red(), e);
            errors += 1;
        }
    }
    println!("    Endpoint: {}", settings.endpoint.url);

    // Check credentials
    println!("\nChecking credentials...");

    let store = match super::open_store() {
        Ok(store) => Some(store),
        Err(e) => {
            println!("  {} {}", style(CROSS).red(), e);
            errors += 1;
            None
        }
    };

    let mut record = None;
    if let Some(store) = &store {
        match store.scope() {
            Ok(scope) => println!("    Encryption scope: {} on {}", scope.user(), scope.machine()),
            Err(e) => println!("    Encryption scope unavailable: {}", e),
        }
        match store.load() {
            LoadOutcome::Absent => {
                println!("  {} No credentials saved", style(WARN).yellow());
                println!("    Run 'alidns connect' to add them");
                warnings += 1;
            }
            LoadOutcome::Loaded(loaded) if loaded.is_complete() => {
                println!("  {} Credentials readable ({})", style(CHECK).green(), loaded.identifier());
                record = Some(loaded);
            }
            LoadOutcome::Loaded(_) => {
                println!("  {} Saved credentials are incomplete", style(WARN).yellow());
                warnings += 1;
            }
            LoadOutcome::Unreadable { reason, .. } => {
                println!("  {} Credentials unreadable: {}", style(CROSS).red(), reason);
                println!("    Run 'alidns connect' to enter them again");
                errors += 1;
            }
        }
    }

    // Check the API
    if args.full {
        println!("\nChecking DNS API...");

        match &record {
            Some(record) => {
                let result = match AliDnsClient::from_settings(
                    record.identifier(),
                    record.secret(),
                    settings,
                ) {
                    Ok(client) => client.verify().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => println!("  {} API accepted the credentials", style(CHECK).green()),
                    Err(e) => {
                        println!("  {} API check failed: {}", style(CROSS).red(), e);
                        errors += 1;
                    }
                }
            }
            None => println!("  {} Skipped, no usable credentials", style(WARN).yellow()),
        }
    }

    // Summary
    println!();
    if errors == 0 && warnings == 0 {
        println!("{} All checks passed!", style(CHECK).green());
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            if errors > 0 { style(CROSS).red() } else { style(WARN).yellow() },
            errors,
            warnings
        );
    }

    if errors > 0 {
        anyhow::bail!("doctor found {} error(s)", errors);
    }

    Ok(())
}
