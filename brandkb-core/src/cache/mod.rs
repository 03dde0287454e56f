//! Local snapshot cache.
//!
//! The cache is a best-effort mirror of store state: string-keyed slots read
//! once at startup and overwritten after every mutation. Last writer wins.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// String-keyed slot storage backing the knowledge store snapshot.
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// Read a slot. Returns `None` when the slot has never been written.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// File Cache
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed cache: one `<key>.json` file per slot under a directory.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Error::Cache(format!("invalid cache key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl LocalCache for FileCache {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Cache(format!("read {}: {}", path.display(), e))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Cache(format!("create {}: {}", self.dir.display(), e)))?;

        // Slot is replaced by rename; readers never see a partial write
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| Error::Cache(format!("write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::Cache(format!("rename {}: {}", path.display(), e)))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Cache
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory cache. Contents live as long as the value.
#[derive(Default)]
pub struct MemoryCache {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with one slot pre-populated
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots: RwLock::new(slots),
        }
    }
}

#[async_trait]
impl LocalCache for MemoryCache {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_cache_missing_slot() {
        let temp = tempdir().expect("Failed to create temp dir");
        let cache = FileCache::new(temp.path().join("cache"));

        assert_eq!(cache.read("knowledge_base_data").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_cache_write_then_read() {
        let temp = tempdir().expect("Failed to create temp dir");
        let cache = FileCache::new(temp.path().join("cache"));

        cache.write("knowledge_base_data", "{\"history\":[]}").await.unwrap();
        cache.write("knowledge_base_data", "{\"currentData\":null}").await.unwrap();

        let value = cache.read("knowledge_base_data").await.unwrap();
        assert_eq!(value.as_deref(), Some("{\"currentData\":null}"));
        assert!(temp.path().join("cache/knowledge_base_data.json").exists());
        assert!(!temp.path().join("cache/knowledge_base_data.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_cache_rejects_path_keys() {
        let temp = tempdir().expect("Failed to create temp dir");
        let cache = FileCache::new(temp.path());

        assert!(cache.write("../escape", "x").await.is_err());
        assert!(cache.read("").await.is_err());
    }

    #[test]
    fn test_memory_cache_slots() {
        tokio_test::block_on(async {
            let cache = MemoryCache::with_slot("a", "1");
            assert_eq!(cache.read("a").await.unwrap().as_deref(), Some("1"));
            assert_eq!(cache.read("b").await.unwrap(), None);

            cache.write("b", "2").await.unwrap();
            assert_eq!(cache.read("b").await.unwrap().as_deref(), Some("2"));
        });
    }
}
