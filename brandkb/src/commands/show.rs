//! Show command and shared record printing.

use anyhow::{Result, bail};
use brandkb_core::KnowledgeRecord;
use brandkb_core::history::format_timestamp;
use colored::Colorize;

use crate::config::Config;
use crate::context;

/// Execute show command.
pub async fn execute(timestamp: Option<&str>, json: bool, config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;

    let record = match timestamp {
        Some(ts) => ctx
            .store
            .history()
            .await
            .into_iter()
            .find(|r| r.timestamp == ts),
        None => ctx.store.current().await,
    };

    let Some(record) = record else {
        match timestamp {
            Some(ts) => bail!("Knowledge base {} not found in history", ts),
            None => {
                println!(
                    "{} No knowledge base yet. Run `brandkb save` to create one.",
                    "⚠".yellow()
                );
                return Ok(());
            }
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }

    Ok(())
}

/// Print a record summary.
pub(crate) fn print_record(record: &KnowledgeRecord) {
    println!("{}", "Knowledge Base".bold());
    if let Some(name) = &record.brand_name {
        println!("  Brand: {}", name.bold());
    }
    println!(
        "  Tone: {} ({})",
        record.brand_tone.label().cyan(),
        record.brand_tone.description().dimmed()
    );
    println!(
        "  Saved: {} {}",
        format_timestamp(&record.timestamp),
        record.timestamp.dimmed()
    );

    println!("  Products ({}):", record.products.len());
    for product in &record.products {
        println!(
            "    • {} {}",
            product.name,
            format!("[{}]", product.category).dimmed()
        );
    }

    if !record.categories.is_empty() {
        println!("  Categories: {}", record.categories.join(", "));
    }
    if !record.main_keywords.is_empty() {
        println!("  Keywords: {}", record.main_keywords.join(", ").dimmed());
    }
}
