//! Error types shared by the registry and the maintenance delegates

use thiserror::Error;

/// Failure raised by an external maintenance service or the registry
#[derive(Error, Debug)]
pub enum DelegateError {
    /// Storage is not registered
    #[error("Storage not found: {0}")]
    StorageNotFound(String),

    /// Repository is not registered under the storage
    #[error("Repository not found: {storage_id}:{repository_id}")]
    RepositoryNotFound {
        /// Storage that was searched
        storage_id: String,
        /// Repository that is missing
        repository_id: String,
    },

    /// Underlying filesystem or index access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data (metadata, checksum files) could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Any other service-side failure
    #[error("Service error: {0}")]
    Service(String),
}

/// Errors raised while loading a storage configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Identifier declared twice
    #[error("Duplicate identifier in configuration: {0}")]
    Duplicate(String),
}
