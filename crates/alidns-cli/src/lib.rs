//! AliDNS Manager command-line interface.

pub mod commands;
pub mod render;

use alidns_core::Settings;
use clap::{Parser, Subcommand};

/// AliDNS Manager - manage Alibaba Cloud DNS records
#[derive(Parser)]
#[command(name = "alidns")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Verify an AccessKey pair and save it
    Connect(commands::connect::ConnectArgs),

    /// Inspect or remove the saved AccessKey pair
    Credentials(commands::credentials::CredentialsArgs),

    /// List hosted domains
    Domains(commands::domains::DomainsArgs),

    /// Manage DNS records
    Records(commands::records::RecordsArgs),

    /// Settings management
    Config(commands::config::ConfigArgs),

    /// Run diagnostics
    Doctor(commands::doctor::DoctorArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command {
        Commands::Connect(args) => commands::connect::run(args, &settings).await,
        Commands::Credentials(args) => commands::credentials::run(args),
        Commands::Domains(args) => commands::domains::run(args, &settings).await,
        Commands::Records(args) => commands::records::run(args, &settings).await,
        Commands::Config(args) => commands::config::run(args, &settings),
        Commands::Doctor(args) => commands::doctor::run(args, &settings).await,
        Commands::Version => {
            println!("alidns {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
