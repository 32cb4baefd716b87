//! Storage module - the two-level storage/repository hierarchy

use crate::traits::ConfigurationRegistry;
use crate::{ConfigError, DelegateError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Kind of repository
///
/// - Hosted: Artifacts are deployed directly into it
/// - Proxy: Caches artifacts fetched from a remote
/// - Group: Aggregates other repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    /// Locally deployed artifacts
    #[default]
    Hosted,

    /// Local cache of a remote repository
    Proxy,

    /// Aggregate of other repositories
    Group,
}

impl RepositoryKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryKind::Hosted => "hosted",
            RepositoryKind::Proxy => "proxy",
            RepositoryKind::Group => "group",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hosted" => Some(RepositoryKind::Hosted),
            "proxy" => Some(RepositoryKind::Proxy),
            "group" => Some(RepositoryKind::Group),
            _ => None,
        }
    }
}

/// A named artifact collection within a storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository identifier, unique within its storage
    pub id: String,

    /// Artifact layout (e.g. "maven2", "npm")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Repository kind
    #[serde(default)]
    pub kind: RepositoryKind,
}

impl Repository {
    /// Create a hosted repository with no explicit layout
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layout: None,
            kind: RepositoryKind::Hosted,
        }
    }
}

/// Top-level grouping holding repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    /// Storage identifier
    pub id: String,

    /// Base directory on disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basedir: Option<String>,

    /// Repositories in registration order
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

impl Storage {
    /// Create an empty storage
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            basedir: None,
            repositories: Vec::new(),
        }
    }

    /// Builder-style helper adding a repository
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// Look up a repository by id
    pub fn repository(&self, repository_id: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.id == repository_id)
    }
}

/// In-memory storage configuration
///
/// Keeps storages in the order they were declared, which is also the order
/// sweeps visit them.
///
/// # Examples
///
/// ```
/// use arca_domain::{ConfigurationRegistry, StorageConfiguration};
///
/// let config = StorageConfiguration::from_toml_str(r#"
///     [[storages]]
///     id = "storage0"
///
///     [[storages.repositories]]
///     id = "releases"
/// "#).unwrap();
///
/// assert_eq!(config.storage_ids(), vec!["storage0"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfiguration {
    /// Configured storages
    #[serde(default)]
    pub storages: Vec<Storage>,
}

impl StorageConfiguration {
    /// Create a configuration from already-built storages
    pub fn new(storages: Vec<Storage>) -> Result<Self, ConfigError> {
        let config = Self { storages };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: StorageConfiguration = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Look up a storage by id
    pub fn storage(&self, storage_id: &str) -> Option<&Storage> {
        self.storages.iter().find(|s| s.id == storage_id)
    }

    /// Look up a repository by storage and repository id
    pub fn repository(&self, storage_id: &str, repository_id: &str) -> Option<&Repository> {
        self.storage(storage_id)
            .and_then(|storage| storage.repository(repository_id))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut storage_ids = HashSet::new();
        for storage in &self.storages {
            if !storage_ids.insert(storage.id.as_str()) {
                return Err(ConfigError::Duplicate(storage.id.clone()));
            }

            let mut repository_ids = HashSet::new();
            for repository in &storage.repositories {
                if !repository_ids.insert(repository.id.as_str()) {
                    return Err(ConfigError::Duplicate(format!(
                        "{}:{}",
                        storage.id, repository.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ConfigurationRegistry for StorageConfiguration {
    fn storage_ids(&self) -> Vec<String> {
        self.storages.iter().map(|s| s.id.clone()).collect()
    }

    fn repository_ids(&self, storage_id: &str) -> Result<Vec<String>, DelegateError> {
        self.storage(storage_id)
            .map(|storage| storage.repositories.iter().map(|r| r.id.clone()).collect())
            .ok_or_else(|| DelegateError::StorageNotFound(storage_id.to_string()))
    }
}
