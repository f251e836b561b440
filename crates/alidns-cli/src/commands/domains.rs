//! Domain commands.

use alidns_client::DnsApi;
use alidns_core::Settings;
use clap::Args;

use crate::render;

/// Domains command arguments.
#[derive(Args)]
pub struct DomainsArgs {
    #[command(subcommand)]
    pub command: DomainsCommand,
}

#[derive(clap::Subcommand)]
pub enum DomainsCommand {
    /// List hosted domains
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Run the domains command.
pub async fn run(args: DomainsArgs, settings: &Settings) -> anyhow::Result<()> {
    let client = super::saved_client(settings)?;

    match args.command {
        DomainsCommand::List { json } => {
            let domains = client.list_domains().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&domains)?);
            } else {
                render::render_domains(&domains);
            }
        }
    }

    Ok(())
}
