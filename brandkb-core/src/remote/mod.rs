//! Remote document store.
//!
//! The remote side is a document collection keyed by opaque document ids and
//! queried by equality on the record `timestamp`. Backends:
//!
//! - [`SqliteRemote`]: SQLite table, one row per document
//! - [`MemoryRemote`]: process-local collection

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryRemote;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRemote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::KnowledgeRecord;

/// Reference to one stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub timestamp: String,
}

/// A stored document with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub record: KnowledgeRecord,
    /// Creation time in milliseconds since the epoch
    pub created_at: i64,
}

/// Remote document collection holding knowledge records.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Create a document for `record`.
    ///
    /// Returns the new document id, or `None` if the backend accepted the
    /// write without assigning one.
    async fn create(&self, record: &KnowledgeRecord) -> Result<Option<String>>;

    /// Find all documents whose `timestamp` equals `timestamp`.
    async fn find_by_timestamp(&self, timestamp: &str) -> Result<Vec<DocumentRef>>;

    /// Delete one document by id. Deleting a missing document is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// List all documents, newest first.
    async fn list(&self) -> Result<Vec<StoredDocument>>;
}
