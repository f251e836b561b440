//! AliDNS Manager CLI entry point.

use alidns_cli::{run, Cli};
use alidns_core::Settings;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Settings are read before logging so the level can come from them
    let (settings, settings_error) = match Settings::load_or_default() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // Initialize logging
    let level = settings.logging.level.raised(cli.verbose);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("alidns={}", level.as_str()).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = settings_error {
        tracing::warn!("ignoring settings file, using defaults: {}", e);
    }

    // Run the command
    run(cli, settings).await
}
