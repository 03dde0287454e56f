//! Configuration management for brandkb.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (BRANDKB_DATA_DIR, BRANDKB_SHARE_URL)
//! 2. Config file (BRANDKB_CONFIG or <data dir>/config.toml)
//! 3. Default values

use anyhow::{Context, Result};
use brandkb_core::StoreConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Share link settings
    #[serde(default)]
    pub share: ShareConfig,

    /// Paths
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin that share links are built under
    #[serde(default = "default_share_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for brandkb data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Local snapshot cache directory
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Remote document database
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

// Default value functions
fn default_share_url() -> String {
    std::env::var("BRANDKB_SHARE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BRANDKB_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(proj_dirs) = ProjectDirs::from("dev", "brandkb", "brandkb") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".brandkb")
    }
}

fn default_cache_dir() -> PathBuf {
    default_data_dir().join("cache")
}

fn default_database_path() -> PathBuf {
    default_data_dir().join("knowledge.db")
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_url(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::under(default_data_dir())
    }
}

impl PathsConfig {
    /// Paths rooted at `data_dir`
    pub fn under(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            cache_dir: data_dir.join("cache"),
            database_path: data_dir.join("knowledge.db"),
            data_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            share: ShareConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config: Config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.apply_overrides(
            std::env::var("BRANDKB_DATA_DIR").ok(),
            std::env::var("BRANDKB_SHARE_URL").ok(),
        );
        Ok(config)
    }

    /// Apply environment overrides on top of file values. A data dir override
    /// re-roots every path.
    fn apply_overrides(&mut self, data_dir: Option<String>, share_url: Option<String>) {
        if let Some(dir) = data_dir {
            self.paths = PathsConfig::under(dir);
        }
        if let Some(url) = share_url {
            self.share.base_url = url;
        }
    }

    /// Save configuration to file.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("BRANDKB_CONFIG") {
            PathBuf::from(path)
        } else {
            default_data_dir().join("config.toml")
        }
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.paths.data_dir)
            .context("Failed to create data directory")?;
        std::fs::create_dir_all(&self.paths.cache_dir)
            .context("Failed to create cache directory")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkb_core::SaveFailurePolicy;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.store.cache_key, "knowledge_base_data");
        assert_eq!(config.store.collection, "knowledge_base");
        assert_eq!(config.store.save_failure, SaveFailurePolicy::KeepLocal);
        assert!(config.paths.cache_dir.starts_with(&config.paths.data_dir));
    }

    #[test]
    fn test_ensure_dirs_creates_directories() {
        let temp = tempdir().expect("Failed to create temp dir");
        let config = Config {
            paths: PathsConfig::under(temp.path().join("data")),
            ..Config::default()
        };

        assert!(!config.paths.data_dir.exists());
        assert!(!config.paths.cache_dir.exists());

        config.ensure_dirs().expect("Failed to create directories");

        assert!(config.paths.data_dir.exists());
        assert!(config.paths.cache_dir.exists());
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp = tempdir().expect("Failed to create temp dir");
        let loaded = Config::load_from(&temp.path().join("missing.toml"))
            .expect("Failed to load default config");

        assert_eq!(loaded.store.cache_key, "knowledge_base_data");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[store]\nsave_failure = \"rollback\"\n\n[share]\nbase_url = \"https://ads.example.com\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.store.save_failure, SaveFailurePolicy::Rollback);
        assert_eq!(loaded.store.collection, "knowledge_base");
        assert_eq!(loaded.share.base_url, "https://ads.example.com");
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[share]\nbase_url = \"https://file.example.com\"\n\n\
             [paths]\ndata_dir = \"/from/file\"\n",
        )
        .unwrap();

        let mut config = Config::load_from(&path).expect("Failed to load config");
        let env_dir = temp.path().join("env");
        config.apply_overrides(
            Some(env_dir.display().to_string()),
            Some("https://env.example.com".to_string()),
        );

        assert_eq!(config.share.base_url, "https://env.example.com");
        assert_eq!(config.paths.data_dir, env_dir);
        assert_eq!(config.paths.database_path, env_dir.join("knowledge.db"));

        config.apply_overrides(None, None);
        assert_eq!(config.share.base_url, "https://env.example.com");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("nested/config.toml");

        let mut config = Config {
            paths: PathsConfig::under(temp.path()),
            ..Config::default()
        };
        config.store.collection = "brand_acme".to_string();
        config.save_to(&path).expect("Failed to save config");

        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.store.collection, "brand_acme");
        assert_eq!(loaded.paths.database_path, temp.path().join("knowledge.db"));
    }
}
