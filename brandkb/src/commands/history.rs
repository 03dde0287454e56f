//! History command: list, restore and compare saved versions.

use anyhow::{Result, anyhow};
use brandkb_core::history::{by_version, diff, format_timestamp, versions};
use brandkb_core::{RemoteStore, history::RecordDiff};
use colored::Colorize;

use crate::cli::{HistoryAction, HistoryCommand};
use crate::commands::show::print_record;
use crate::config::Config;
use crate::context;

/// Execute history command.
pub async fn execute(cmd: HistoryCommand, config: &Config) -> Result<()> {
    match cmd.action {
        HistoryAction::List { json } => list(json, config).await,
        HistoryAction::Load { timestamp } => load(&timestamp, config).await,
        HistoryAction::Diff { from, to } => compare(from, to, config).await,
        HistoryAction::Remote => remote(config).await,
    }
}

/// List saved versions.
async fn list(json: bool, config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;
    let history = ctx.store.history().await;
    let current = ctx.store.current().await.map(|c| c.timestamp);

    if json {
        println!("{}", serde_json::to_string_pretty(&versions(&history))?);
        return Ok(());
    }

    if history.is_empty() {
        println!("{} No saved versions", "⚠".yellow());
        return Ok(());
    }

    println!("{} {} saved versions:", "📚".cyan(), history.len());
    println!();
    for version in versions(&history) {
        let marker = if current.as_deref() == Some(version.record.timestamp.as_str()) {
            "●".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} Version {}  {}  {} products, {}",
            marker,
            version.number.to_string().bold(),
            format_timestamp(&version.record.timestamp),
            version.record.products.len(),
            version.record.brand_tone.label().cyan()
        );
        println!("    {}", version.record.timestamp.dimmed());
    }

    Ok(())
}

/// Make a version current again.
async fn load(timestamp: &str, config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;
    let record = ctx
        .store
        .load_from_history(timestamp)
        .await
        .ok_or_else(|| anyhow!("Knowledge base {} not found in history", timestamp))?;

    println!("{} Loaded version from {}", "✓".green(), format_timestamp(&record.timestamp));
    print_record(&record);
    Ok(())
}

/// Compare two versions by number.
async fn compare(from: usize, to: usize, config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;
    let history = ctx.store.history().await;

    let old = by_version(&history, from).ok_or_else(|| anyhow!("No version {}", from))?;
    let new = by_version(&history, to).ok_or_else(|| anyhow!("No version {}", to))?;

    println!("Version {} → Version {}", from.to_string().bold(), to.to_string().bold());
    print_diff(&diff(old, new));
    Ok(())
}

fn print_diff(d: &RecordDiff) {
    if d.is_empty() {
        println!("  {}", "No changes".dimmed());
        return;
    }

    if let Some((from, to)) = d.tone_change {
        println!("  Tone: {} → {}", from.label(), to.label().cyan());
    }
    for product in &d.added_products {
        println!("  {} product {} [{}]", "+".green(), product.name, product.category);
    }
    for product in &d.removed_products {
        println!("  {} product {} [{}]", "-".red(), product.name, product.category);
    }
    for category in &d.added_categories {
        println!("  {} category {}", "+".green(), category);
    }
    for category in &d.removed_categories {
        println!("  {} category {}", "-".red(), category);
    }
    for keyword in &d.added_keywords {
        println!("  {} keyword {}", "+".green(), keyword);
    }
    for keyword in &d.removed_keywords {
        println!("  {} keyword {}", "-".red(), keyword);
    }
}

/// List documents in the remote store.
async fn remote(config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;
    let docs = ctx.remote.list().await?;

    if docs.is_empty() {
        println!("{} No documents in collection {}", "⚠".yellow(), ctx.remote.collection());
        return Ok(());
    }

    println!(
        "{} {} documents in {}:",
        "🗄".cyan(),
        docs.len(),
        ctx.remote.collection().bold()
    );
    for doc in docs {
        println!(
            "  {}  {}  {}",
            &doc.id[..8.min(doc.id.len())],
            format_timestamp(&doc.record.timestamp),
            doc.record.brand_tone.label().cyan()
        );
    }
    Ok(())
}
