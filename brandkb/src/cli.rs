//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// brandkb - brand knowledge-base manager
///
/// Build a knowledge base from a catalog analysis and a brand tone, then
/// browse, restore, compare, share or delete saved versions.
#[derive(Parser, Debug)]
#[command(name = "brandkb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the wizard: analysis file → tone → review → save
    Save {
        /// Analysis result JSON (brandName, products, categories, mainKeywords)
        #[arg(short, long)]
        analysis: PathBuf,

        /// Brand tone (professional, humorous, inspiring, casual)
        #[arg(short, long)]
        tone: String,

        /// Skip the review confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the current knowledge base (or a specific one)
    Show {
        /// Record timestamp (defaults to the current one)
        timestamp: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Version history
    History(HistoryCommand),

    /// Delete a knowledge base locally and remotely
    Delete {
        /// Record timestamp (defaults to the current one)
        timestamp: Option<String>,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Reset local state (remote documents are kept)
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Print a share link for a knowledge base
    Share {
        /// Record timestamp (defaults to the current one)
        timestamp: Option<String>,

        /// Decode a share link or token instead
        #[arg(long, conflicts_with = "timestamp")]
        decode: Option<String>,
    },

    /// List available brand tones
    Tones,

    /// Configuration file management
    Config(ConfigCommand),

    /// Show version
    Version,
}

// ─────────────────────────────────────────────────────────────────────────────
// History Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved versions, newest first
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Make a saved version current again
    Load {
        /// Record timestamp
        timestamp: String,
    },

    /// Compare two versions (by version number)
    Diff {
        /// Older version number
        from: usize,
        /// Newer version number
        to: usize,
    },

    /// List documents held by the remote store
    Remote,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
