//! Store wiring for CLI commands.
//!
//! Every command opens the same pair of backends: the file snapshot cache
//! under `paths.cache_dir` and the SQLite document store at
//! `paths.database_path`.

use anyhow::{Context, Result};
use brandkb_core::{FileCache, KnowledgeStore, SqliteRemote};
use std::sync::Arc;

use crate::config::Config;

/// An opened store plus direct access to its remote backend
pub struct StoreContext {
    pub store: KnowledgeStore,
    pub remote: Arc<SqliteRemote>,
}

/// Open the knowledge store described by `config`.
pub async fn open(config: &Config) -> Result<StoreContext> {
    config.ensure_dirs()?;

    let remote = Arc::new(
        SqliteRemote::open(&config.paths.database_path, config.store.collection.clone())
            .with_context(|| {
                format!(
                    "Failed to open knowledge database at {}",
                    config.paths.database_path.display()
                )
            })?,
    );
    let cache = Arc::new(FileCache::new(&config.paths.cache_dir));
    let store = KnowledgeStore::load(cache, remote.clone(), config.store.clone()).await;

    Ok(StoreContext { store, remote })
}
