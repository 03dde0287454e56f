//! In-memory remote store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentRef, RemoteStore, StoredDocument};
use crate::error::Result;
use crate::types::KnowledgeRecord;

/// Process-local document collection.
#[derive(Default)]
pub struct MemoryRemote {
    documents: RwLock<Vec<StoredDocument>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn create(&self, record: &KnowledgeRecord) -> Result<Option<String>> {
        let id = Uuid::new_v4().to_string();
        self.documents.write().await.push(StoredDocument {
            id: id.clone(),
            record: record.clone(),
            created_at: chrono::Utc::now().timestamp_millis(),
        });
        Ok(Some(id))
    }

    async fn find_by_timestamp(&self, timestamp: &str) -> Result<Vec<DocumentRef>> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|doc| doc.record.timestamp == timestamp)
            .map(|doc| DocumentRef {
                id: doc.id.clone(),
                timestamp: doc.record.timestamp.clone(),
            })
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.documents.write().await.retain(|doc| doc.id != id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredDocument>> {
        let mut docs = self.documents.read().await.clone();
        docs.reverse();
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BrandTone;

    fn record(ts: &str) -> KnowledgeRecord {
        KnowledgeRecord {
            brand_name: None,
            products: vec![],
            categories: vec![],
            main_keywords: vec![],
            brand_tone: BrandTone::Casual,
            timestamp: ts.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_find_delete() {
        let remote = MemoryRemote::new();
        let id = remote.create(&record("t1")).await.unwrap().unwrap();
        remote.create(&record("t1")).await.unwrap();
        remote.create(&record("t2")).await.unwrap();

        let found = remote.find_by_timestamp("t1").await.unwrap();
        assert_eq!(found.len(), 2);

        remote.delete(&id).await.unwrap();
        assert_eq!(remote.find_by_timestamp("t1").await.unwrap().len(), 1);
        assert_eq!(remote.len().await, 2);

        // Missing ids are ignored
        remote.delete("nope").await.unwrap();
        assert_eq!(remote.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let remote = MemoryRemote::new();
        remote.create(&record("t1")).await.unwrap();
        remote.create(&record("t2")).await.unwrap();

        let docs = remote.list().await.unwrap();
        assert_eq!(docs[0].record.timestamp, "t2");
        assert_eq!(docs[1].record.timestamp, "t1");
    }
}
