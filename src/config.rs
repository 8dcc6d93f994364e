//! Configuration management
//!
//! Small TOML config under the user config dir. Currently only storage
//! settings; the eviction window and session policy are fixed business rules,
//! not knobs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the summary database lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

fn default_database_path() -> PathBuf {
    data_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("progress.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Config {
    /// Load configuration from disk, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path
            .parent()
            .context("Config path has no parent directory")?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }
}

/// Path to the config file
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("companion-progress").join("config.toml"))
}

/// Data directory for durable state
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir().context("Could not determine data directory")?;
    Ok(dir.join("companion-progress"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            restored.storage.database_path,
            config.storage.database_path
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config
            .storage
            .database_path
            .to_string_lossy()
            .ends_with("progress.db"));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            database_path = "/tmp/custom.db"
        "#,
        )
        .unwrap();
        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/custom.db"));
    }
}
