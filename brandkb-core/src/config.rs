//! Store configuration.

use serde::{Deserialize, Serialize};

/// What `save` does with its optimistic local insert when the remote create fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveFailurePolicy {
    /// Keep the record locally and only surface the error
    #[default]
    KeepLocal,
    /// Restore the pre-save state, like a failed delete does
    Rollback,
}

/// Knowledge store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Cache slot holding the serialized `{currentData, history}` snapshot
    #[serde(default = "default_cache_key")]
    pub cache_key: String,

    /// Remote collection name
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub save_failure: SaveFailurePolicy,
}

fn default_cache_key() -> String {
    "knowledge_base_data".to_string()
}

fn default_collection() -> String {
    "knowledge_base".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cache_key: default_cache_key(),
            collection: default_collection(),
            save_failure: SaveFailurePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.cache_key, "knowledge_base_data");
        assert_eq!(config.collection, "knowledge_base");
        assert_eq!(config.save_failure, SaveFailurePolicy::KeepLocal);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"save_failure":"rollback"}"#).unwrap();
        assert_eq!(config.cache_key, "knowledge_base_data");
        assert_eq!(config.save_failure, SaveFailurePolicy::Rollback);
    }
}
