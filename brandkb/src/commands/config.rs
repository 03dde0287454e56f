//! Config command.

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::cli::{ConfigAction, ConfigCommand};
use crate::config::Config;

/// Execute config command.
pub fn execute(cmd: ConfigCommand, config: &Config) -> Result<()> {
    match cmd.action {
        ConfigAction::Show => {
            println!("{}", "# effective configuration".dimmed());
            println!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?);
            Ok(())
        }
        ConfigAction::Init { force } => {
            let path = Config::config_path();
            if path.exists() && !force {
                bail!("Config file {} already exists (use --force to overwrite)", path.display());
            }
            config.save_to(&path)?;
            println!("{} Wrote {}", "✓".green(), path.display());
            Ok(())
        }
    }
}
