//! brandkb - brand knowledge-base CLI
//!
//! Builds knowledge bases from a catalog analysis plus a brand tone and keeps
//! their history in a local snapshot cache mirrored to a document store.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;
mod config;
mod context;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (BRANDKB_LOG_FORMAT=json for structured output)
    let filter = EnvFilter::from_default_env()
        .add_directive("brandkb=info".parse()?)
        .add_directive("brandkb_core=info".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("BRANDKB_LOG_FORMAT").is_ok_and(|v| v == "json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load()?;

    // Execute command
    match cli.command {
        Commands::Save { analysis, tone, yes } => {
            commands::save::execute(&analysis, &tone, yes, &config).await
        }
        Commands::Show { timestamp, json } => {
            commands::show::execute(timestamp.as_deref(), json, &config).await
        }
        Commands::History(cmd) => commands::history::execute(cmd, &config).await,
        Commands::Delete { timestamp, force } => {
            commands::delete::delete(timestamp.as_deref(), force, &config).await
        }
        Commands::Clear { force } => commands::delete::clear(force, &config).await,
        Commands::Share { timestamp, decode } => {
            commands::share::execute(timestamp.as_deref(), decode.as_deref(), &config).await
        }
        Commands::Tones => commands::tones::execute(),
        Commands::Config(cmd) => commands::config::execute(cmd, &config),
        Commands::Version => {
            println!("brandkb {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
