//! Share command.

use anyhow::Result;
use brandkb_core::share::{parse_share, share_link};
use colored::Colorize;

use crate::commands::resolve_timestamp;
use crate::config::Config;
use crate::context;

/// Execute share command.
pub async fn execute(timestamp: Option<&str>, decode: Option<&str>, config: &Config) -> Result<()> {
    if let Some(link) = decode {
        println!("{}", parse_share(link)?);
        return Ok(());
    }

    let ctx = context::open(config).await?;
    let timestamp = resolve_timestamp(&ctx.store, timestamp).await?;
    if !ctx.store.history().await.iter().any(|r| r.timestamp == timestamp) {
        tracing::warn!("Sharing {} which is not in local history", timestamp);
    }

    let link = share_link(&config.share.base_url, &timestamp)?;
    println!("{} Share link:", "🔗".cyan());
    println!("  {}", link.bold());
    Ok(())
}
