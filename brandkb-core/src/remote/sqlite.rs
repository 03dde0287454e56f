//! SQLite-backed remote store.
//!
//! Each knowledge record is one row in `kb_documents`, scoped by collection
//! name. The record itself is stored as JSON in `payload_json`.

use async_trait::async_trait;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

use super::{DocumentRef, RemoteStore, StoredDocument};
use crate::error::{Error, Result};
use crate::types::KnowledgeRecord;

/// SQLite document collection.
///
/// Thread-safe via internal Mutex. Async operations run the SQLite work on
/// the blocking pool.
pub struct SqliteRemote {
    conn: Arc<Mutex<Connection>>,
    collection: String,
}

impl SqliteRemote {
    /// Open (or create) the database at `path` and run migrations
    pub fn open(path: impl AsRef<Path>, collection: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        debug!("Opened remote store at {:?}", path);
        Self::with_connection(conn, collection)
    }

    /// Open a private in-memory database
    pub fn open_in_memory(collection: impl Into<String>) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, collection)
    }

    fn with_connection(conn: Connection, collection: impl Into<String>) -> Result<Self> {
        conn.execute_batch(include_str!("./migrations/001_knowledge_base.sql"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            collection: collection.into(),
        })
    }

    /// Collection this store reads and writes
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Check database connectivity
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute_batch("SELECT 1").map_err(Error::Database)
    }

    /// Run `f` against the connection on the blocking pool
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &str) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let collection = self.collection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| Error::LockPoisoned)?;
            f(&*conn, &collection)
        })
        .await
        .map_err(|e| Error::Remote(format!("database task failed: {}", e)))?
    }

    fn map_document(row: &rusqlite::Row) -> rusqlite::Result<(String, String, i64)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    }
}

#[async_trait]
impl RemoteStore for SqliteRemote {
    async fn create(&self, record: &KnowledgeRecord) -> Result<Option<String>> {
        let payload = serde_json::to_string(record)?;
        let timestamp = record.timestamp.clone();
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp_millis();

        self.blocking(move |conn, collection| {
            conn.execute(
                "INSERT INTO kb_documents (id, collection, timestamp, payload_json, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, collection, timestamp, payload, now],
            )?;
            Ok(Some(id))
        })
        .await
    }

    async fn find_by_timestamp(&self, timestamp: &str) -> Result<Vec<DocumentRef>> {
        let timestamp = timestamp.to_string();

        self.blocking(move |conn, collection| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp FROM kb_documents
                 WHERE collection = ?1 AND timestamp = ?2
                 ORDER BY created_at",
            )?;

            let docs = stmt
                .query_map(params![collection, timestamp], |row| {
                    Ok(DocumentRef {
                        id: row.get(0)?,
                        timestamp: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(docs)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();

        self.blocking(move |conn, collection| {
            let rows = conn.execute(
                "DELETE FROM kb_documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )?;
            debug!("Deleted {} document(s) with id {}", rows, id);
            Ok(())
        })
        .await
    }

    async fn list(&self) -> Result<Vec<StoredDocument>> {
        let rows = self
            .blocking(|conn, collection| {
                let mut stmt = conn.prepare(
                    "SELECT id, payload_json, created_at FROM kb_documents
                     WHERE collection = ?1
                     ORDER BY created_at DESC, rowid DESC",
                )?;
                let rows = stmt
                    .query_map(params![collection], Self::map_document)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        rows.into_iter()
            .map(|(id, payload, created_at)| {
                Ok(StoredDocument {
                    id,
                    record: serde_json::from_str(&payload)?,
                    created_at,
                })
            })
            .collect()
    }
}
