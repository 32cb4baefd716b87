//! Arca Domain Layer
//!
//! Core model of the artifact storage hierarchy and the trait interfaces that
//! maintenance jobs depend upon.
//!
//! ## Key Concepts
//!
//! - **Storage**: Top-level grouping holding one or more repositories
//! - **Repository**: A named artifact collection within a storage
//! - **Registry**: Read-only view over the configured storages and repositories
//! - **Delegates**: External services that perform the actual maintenance work
//!   (expired artifact cleanup, trash removal, checksum regeneration)
//!
//! ## Architecture
//!
//! Jobs never reach for process-wide state. Every collaborator is injected as
//! a trait object, so tests substitute fixture registries and recording mocks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod storage;
pub mod traits;

// Re-exports for convenience
pub use error::{ConfigError, DelegateError};
pub use storage::{Repository, RepositoryKind, Storage, StorageConfiguration};
pub use traits::{
    ChecksumService, ConfigurationRegistry, ExpiredArtifactsCleaner, RegenerationPolicy,
    TrashService,
};
