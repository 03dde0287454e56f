//! Delete and clear commands.

use anyhow::{Context, Result};
use brandkb_core::history::format_timestamp;
use colored::Colorize;
use dialoguer::Confirm;

use crate::commands::resolve_timestamp;
use crate::config::Config;
use crate::context;

/// Delete a knowledge base locally and remotely.
pub async fn delete(timestamp: Option<&str>, force: bool, config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;
    let timestamp = resolve_timestamp(&ctx.store, timestamp)
        .await
        .context("No knowledge base to delete")?;

    if !force
        && !confirm(&format!(
            "Delete knowledge base from {}? This action cannot be undone.",
            format_timestamp(&timestamp)
        ))?
    {
        println!("Cancelled");
        return Ok(());
    }

    ctx.store.delete_by_timestamp(&timestamp).await?;
    println!("{} Knowledge base deleted successfully", "✓".green());
    Ok(())
}

/// Reset local state. Remote documents are kept.
pub async fn clear(force: bool, config: &Config) -> Result<()> {
    let ctx = context::open(config).await?;

    if !force && !confirm("Clear the local knowledge base and its history?")? {
        println!("Cancelled");
        return Ok(());
    }

    ctx.store.clear().await;
    println!(
        "{} Local knowledge base cleared {}",
        "✓".green(),
        "(remote documents kept)".dimmed()
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use brandkb_core::{AnalysisResult, BrandTone, KnowledgeRecord, RemoteStore};
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            paths: PathsConfig::under(dir),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_delete_current_with_force() {
        let temp = tempdir().expect("Failed to create temp dir");
        let config = config_in(temp.path());
        {
            let ctx = context::open(&config).await.unwrap();
            let record = KnowledgeRecord::new(AnalysisResult::default(), BrandTone::Casual, "t1");
            ctx.store.save(record).await.unwrap();
        }

        delete(None, true, &config).await.unwrap();

        let ctx = context::open(&config).await.unwrap();
        assert!(ctx.store.current().await.is_none());
        assert!(ctx.store.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_current_fails() {
        let temp = tempdir().expect("Failed to create temp dir");
        let err = delete(None, true, &config_in(temp.path())).await.unwrap_err();
        assert!(err.to_string().contains("No knowledge base to delete"));
    }

    #[tokio::test]
    async fn test_delete_missing_remote_keeps_local() {
        let temp = tempdir().expect("Failed to create temp dir");
        let config = config_in(temp.path());
        {
            // Remote loses the document behind the store's back
            let ctx = context::open(&config).await.unwrap();
            let record = KnowledgeRecord::new(AnalysisResult::default(), BrandTone::Casual, "t1");
            ctx.store.save(record).await.unwrap();
            for doc in ctx.remote.list().await.unwrap() {
                ctx.remote.delete(&doc.id).await.unwrap();
            }
        }

        assert!(delete(Some("t1"), true, &config).await.is_err());

        let ctx = context::open(&config).await.unwrap();
        assert_eq!(ctx.store.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_with_force() {
        let temp = tempdir().expect("Failed to create temp dir");
        let config = config_in(temp.path());
        {
            let ctx = context::open(&config).await.unwrap();
            let record = KnowledgeRecord::new(AnalysisResult::default(), BrandTone::Casual, "t1");
            ctx.store.save(record).await.unwrap();
        }

        clear(true, &config).await.unwrap();

        let ctx = context::open(&config).await.unwrap();
        assert!(ctx.store.history().await.is_empty());
        assert_eq!(ctx.remote.list().await.unwrap().len(), 1);
    }
}
