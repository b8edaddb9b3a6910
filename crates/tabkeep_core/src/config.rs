//! Configuration for a tabkeep state directory.

use crate::entity::BLANK_TITLE;
use crate::error::{Result, SessionError};
use crate::types::{MarkedFile, Repository};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the state directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Comprehensive configuration for a tabkeep state directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Session behavior.
    #[serde(default)]
    pub session: SessionConfig,

    /// Persistent store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Help document settings.
    #[serde(default)]
    pub help: HelpConfig,

    /// Repositories served from the local filesystem.
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,

    /// Starred files.
    #[serde(default)]
    pub marked: Vec<MarkedFile>,
}

impl Config {
    /// Load configuration from `<root>/config.toml`.
    ///
    /// A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| SessionError::ConfigError(format!("failed to read config: {}", e)))?;
            toml::from_str(&content)
                .map_err(|e| SessionError::ConfigError(format!("failed to parse config: {}", e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to `<root>/config.toml`.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)
            .map_err(|e| SessionError::ConfigError(format!("failed to serialize config: {}", e)))?;
        fs::write(&path, content)
            .map_err(|e| SessionError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Configured repositories as service values.
    ///
    /// Relative repository paths are resolved against `base`.
    pub fn repository_list(&self, base: &Path) -> Vec<Repository> {
        self.repositories
            .iter()
            .map(|r| {
                let path = if r.path.is_absolute() {
                    r.path.clone()
                } else {
                    base.join(&r.path)
                };
                Repository::at(r.name.clone(), path.to_string_lossy().into_owned())
            })
            .collect()
    }

    /// Adds or replaces a repository entry.
    pub fn upsert_repository(&mut self, name: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        match self.repositories.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.path = path,
            None => self.repositories.push(RepositoryConfig {
                name: name.to_string(),
                path,
            }),
        }
    }
}

/// Session behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Title shown for the blank entity (default: "No file open").
    pub blank_title: String,

    /// Reopen the last file of the current repository on startup
    /// (default: true).
    pub restore_last_file: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            blank_title: BLANK_TITLE.to_string(),
            restore_last_file: true,
        }
    }
}

/// Persistent store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database file name, relative to the state directory
    /// (default: "session.redb").
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file: "session.redb".to_string(),
        }
    }
}

/// Help document settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelpConfig {
    /// Directory holding help documents, relative to the state directory
    /// (default: "help").
    pub dir: String,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            dir: "help".to_string(),
        }
    }
}

/// A repository entry in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Repository name.
    pub name: String,
    /// Root directory.
    pub path: PathBuf,
}
