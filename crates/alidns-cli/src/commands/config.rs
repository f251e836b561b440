//! Settings management commands.

use alidns_core::{paths, Settings};
use clap::Args;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the effective settings (file plus environment overrides)
    Show,

    /// Show the settings file path
    Path,

    /// Write a settings file with the defaults
    Init {
        /// Force overwrite existing settings
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the settings file
    Validate,
}

/// Run the config command.
pub fn run(args: ConfigArgs, settings: &Settings) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", settings.to_json5()?);
        }

        ConfigCommand::Path => {
            let path = paths::settings_file()?;
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = paths::settings_file()?;

            if path.exists() && !force {
                anyhow::bail!(
                    "Settings file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }

            paths::ensure_app_dir()?;
            Settings::default().save(&path)?;

            println!("Created settings file: {}", path.display());
        }

        ConfigCommand::Validate => match Settings::load_default() {
            Ok(file_settings) => match file_settings.validate() {
                Ok(()) => println!("Settings are valid"),
                Err(e) => anyhow::bail!("{}", e),
            },
            Err(alidns_core::ConfigError::NotFound(path)) => {
                println!("No settings file at {}; defaults apply.", path.display());
            }
            Err(e) => anyhow::bail!("Failed to load settings: {}", e),
        },
    }

    Ok(())
}
