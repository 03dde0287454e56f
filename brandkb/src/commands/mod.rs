//! Command implementations.

pub mod config;
pub mod delete;
pub mod history;
pub mod save;
pub mod share;
pub mod show;
pub mod tones;

use anyhow::{Result, bail};
use brandkb_core::KnowledgeStore;

/// Use `timestamp` if given, otherwise the current record's timestamp.
pub(crate) async fn resolve_timestamp(
    store: &KnowledgeStore,
    timestamp: Option<&str>,
) -> Result<String> {
    if let Some(ts) = timestamp {
        return Ok(ts.to_string());
    }
    match store.current().await {
        Some(current) => Ok(current.timestamp),
        None => bail!("No current knowledge base; pass a timestamp"),
    }
}
