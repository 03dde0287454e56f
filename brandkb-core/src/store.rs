//! Knowledge store.
//!
//! The store is the single authority for reading, saving and deleting
//! knowledge records. It keeps the current record and the history in memory,
//! mirrors them into a [`LocalCache`] slot after every change, and forwards
//! creates and deletes to a [`RemoteStore`].
//!
//! Mutations are optimistic: local state changes before the remote call is
//! confirmed. Each mutation captures a pre-image first; a failed delete
//! always restores it, a failed save restores it only under
//! [`SaveFailurePolicy::Rollback`].
//!
//! Mutating operations are serialized per store instance. Reads never wait on
//! in-flight remote I/O and observe the optimistic state.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::LocalCache;
use crate::config::{SaveFailurePolicy, StoreConfig};
use crate::error::{Error, Result};
use crate::remote::RemoteStore;
use crate::types::KnowledgeRecord;

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Serialized store state, as written to the local cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub current_data: Option<KnowledgeRecord>,
    /// Newest first
    #[serde(default)]
    pub history: Vec<KnowledgeRecord>,
}

impl StoreSnapshot {
    /// Parse and validate a cached snapshot.
    pub fn parse(raw: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the snapshot invariants: every record has a timestamp and history
    /// timestamps are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.history.len());
        for record in &self.history {
            if record.timestamp.is_empty() {
                return Err(Error::validation("history entry without timestamp"));
            }
            if !seen.insert(record.timestamp.as_str()) {
                return Err(Error::validation(format!(
                    "duplicate history timestamp {}",
                    record.timestamp
                )));
            }
        }

        if let Some(current) = &self.current_data {
            if current.timestamp.is_empty() {
                return Err(Error::validation("current record without timestamp"));
            }
        }

        Ok(())
    }

    /// Find a history entry by timestamp
    pub fn find(&self, timestamp: &str) -> Option<&KnowledgeRecord> {
        self.history.iter().find(|r| r.timestamp == timestamp)
    }

    fn is_current(&self, timestamp: &str) -> bool {
        self.current_data
            .as_ref()
            .is_some_and(|c| c.timestamp == timestamp)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pre-image
// ─────────────────────────────────────────────────────────────────────────────

/// The slice of state a mutation touches, captured before the optimistic change.
#[derive(Debug)]
struct PreImage {
    timestamp: String,
    /// Record held in history under `timestamp`, if any
    record: Option<KnowledgeRecord>,
    /// Current record before the mutation
    previous_current: Option<KnowledgeRecord>,
}

impl PreImage {
    fn capture(state: &StoreSnapshot, timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            record: state.find(timestamp).cloned(),
            previous_current: state.current_data.clone(),
        }
    }

    /// Undo an optimistic removal.
    ///
    /// A history record goes back at the end of history. The previous current
    /// record comes back only if it carried `timestamp` and nothing has
    /// replaced it since, whether or not it was also in history.
    fn restore_removed(self, state: &mut StoreSnapshot) -> bool {
        let mut restored = false;

        if state.current_data.is_none() {
            if let Some(current) = self
                .previous_current
                .filter(|c| c.timestamp == self.timestamp)
            {
                state.current_data = Some(current);
                restored = true;
            }
        }

        if let Some(record) = self.record {
            if state.find(&self.timestamp).is_none() {
                state.history.push(record);
                restored = true;
            }
        }

        restored
    }

    /// Undo an optimistic insert of the record under `timestamp`.
    fn undo_insert(self, state: &mut StoreSnapshot) {
        state.history.retain(|r| r.timestamp != self.timestamp);
        if state.is_current(&self.timestamp) {
            state.current_data = self.previous_current;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// Knowledge-base store with optimistic local state and remote persistence.
pub struct KnowledgeStore {
    cache: Arc<dyn LocalCache>,
    remote: Arc<dyn RemoteStore>,
    config: StoreConfig,
    state: RwLock<StoreSnapshot>,
    /// Serializes mutating operations
    op_lock: Mutex<()>,
}

impl KnowledgeStore {
    /// Create a store, initializing state from the cached snapshot.
    ///
    /// A missing snapshot starts empty. An unreadable, malformed or invalid
    /// snapshot is logged and also starts empty; this never fails.
    pub async fn load(
        cache: Arc<dyn LocalCache>,
        remote: Arc<dyn RemoteStore>,
        config: StoreConfig,
    ) -> Self {
        let state = match cache.read(&config.cache_key).await {
            Ok(Some(raw)) => match StoreSnapshot::parse(&raw) {
                Ok(snapshot) => {
                    debug!(
                        "Loaded knowledge store snapshot with {} history entries",
                        snapshot.history.len()
                    );
                    snapshot
                }
                Err(e) => {
                    warn!("Error loading knowledge store: {}", e);
                    StoreSnapshot::default()
                }
            },
            Ok(None) => StoreSnapshot::default(),
            Err(e) => {
                warn!("Error loading knowledge store: {}", e);
                StoreSnapshot::default()
            }
        };

        Self {
            cache,
            remote,
            config,
            state: RwLock::new(state),
            op_lock: Mutex::new(()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current record, if any
    pub async fn current(&self) -> Option<KnowledgeRecord> {
        self.state.read().await.current_data.clone()
    }

    /// History, newest first
    pub async fn history(&self) -> Vec<KnowledgeRecord> {
        self.state.read().await.history.clone()
    }

    /// Copy of the full store state
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.read().await.clone()
    }

    /// Whether a current record is set
    pub async fn has_data(&self) -> bool {
        self.state.read().await.current_data.is_some()
    }

    /// Save a completed record.
    ///
    /// The record becomes current and is prepended to history before the
    /// remote create is issued. A remote failure, or a create that returns no
    /// document id, is reported as [`Error::Persistence`].
    pub async fn save(&self, record: KnowledgeRecord) -> Result<KnowledgeRecord> {
        if record.timestamp.is_empty() {
            return Err(Error::validation("Timestamp is required to save a knowledge base"));
        }

        let _guard = self.op_lock.lock().await;

        let pre_image = {
            let mut state = self.state.write().await;
            if state.find(&record.timestamp).is_some() {
                return Err(Error::validation(format!(
                    "A knowledge base with timestamp {} already exists",
                    record.timestamp
                )));
            }
            let pre_image = PreImage::capture(&state, &record.timestamp);
            state.current_data = Some(record.clone());
            state.history.insert(0, record.clone());
            pre_image
        };
        self.persist().await;

        let outcome = match self.remote.create(&record).await {
            Ok(Some(id)) if !id.is_empty() => {
                info!("Saved knowledge base {} as document {}", record.timestamp, id);
                Ok(record)
            }
            Ok(_) => Err(Error::persistence("save", "Failed to save to database")),
            Err(e) => Err(Error::persistence("save", e)),
        };

        if let Err(e) = &outcome {
            warn!("Error saving knowledge base {}: {}", pre_image.timestamp, e);
            if self.config.save_failure == SaveFailurePolicy::Rollback {
                pre_image.undo_insert(&mut *self.state.write().await);
                self.persist().await;
            }
        }

        outcome
    }

    /// Delete a record locally and remotely.
    ///
    /// The record is removed from local state first. If the remote has no
    /// matching documents, or any remote call fails, the removed record is
    /// appended back to history and the error is returned.
    pub async fn delete_by_timestamp(&self, timestamp: &str) -> Result<()> {
        if timestamp.is_empty() {
            return Err(Error::validation("Timestamp is required for deletion"));
        }

        let _guard = self.op_lock.lock().await;

        let pre_image = {
            let mut state = self.state.write().await;
            let pre_image = PreImage::capture(&state, timestamp);
            if state.is_current(timestamp) {
                state.current_data = None;
            }
            state.history.retain(|r| r.timestamp != timestamp);
            pre_image
        };
        self.persist().await;

        match self.delete_remote(timestamp).await {
            Ok(count) => {
                info!("Deleted knowledge base {} ({} document(s))", timestamp, count);
                Ok(())
            }
            Err(e) => {
                let restored = pre_image.restore_removed(&mut *self.state.write().await);
                if restored {
                    self.persist().await;
                }
                warn!(
                    "Error deleting knowledge base {} (restored locally: {}): {}",
                    timestamp, restored, e
                );
                Err(e)
            }
        }
    }

    async fn delete_remote(&self, timestamp: &str) -> Result<usize> {
        let docs = self
            .remote
            .find_by_timestamp(timestamp)
            .await
            .map_err(|e| Error::persistence("delete", e))?;

        if docs.is_empty() {
            return Err(Error::not_found(timestamp));
        }

        let results = join_all(docs.iter().map(|doc| self.remote.delete(&doc.id))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        if let Some(Err(e)) = results.into_iter().find(|r| r.is_err()) {
            debug!("{} of {} remote deletes failed", failed, docs.len());
            return Err(Error::persistence("delete", e));
        }

        Ok(docs.len())
    }

    /// Make a history entry current again. Local only.
    ///
    /// Returns `None`, without touching state, for an empty or unknown timestamp.
    pub async fn load_from_history(&self, timestamp: &str) -> Option<KnowledgeRecord> {
        if timestamp.is_empty() {
            return None;
        }

        let _guard = self.op_lock.lock().await;

        let record = {
            let mut state = self.state.write().await;
            let record = state.find(timestamp).cloned()?;
            state.current_data = Some(record.clone());
            record
        };
        self.persist().await;
        Some(record)
    }

    /// Reset current record and history. Remote documents are kept.
    pub async fn clear(&self) {
        let _guard = self.op_lock.lock().await;
        *self.state.write().await = StoreSnapshot::default();
        self.persist().await;
    }

    /// Mirror the current state into the cache slot. Failures are logged only.
    async fn persist(&self) {
        let raw = {
            let state = self.state.read().await;
            serde_json::to_string(&*state)
        };

        let result = match raw {
            Ok(raw) => self.cache.write(&self.config.cache_key, &raw).await,
            Err(e) => Err(Error::Serialization(e)),
        };

        if let Err(e) = result {
            warn!("Error saving knowledge store: {}", e);
        }
    }
}
