//! Trait definitions for external interactions
//!
//! These traits define the boundaries between maintenance jobs and the
//! services that own storage, indexes and the filesystem. Implementations
//! live outside this workspace.

use crate::DelegateError;

/// Read-only view over the configured storage hierarchy
pub trait ConfigurationRegistry: Send + Sync {
    /// All storage identifiers in registration order
    fn storage_ids(&self) -> Vec<String>;

    /// Repository identifiers registered under a storage
    ///
    /// Fails with [`DelegateError::StorageNotFound`] for unknown storages.
    fn repository_ids(&self, storage_id: &str) -> Result<Vec<String>, DelegateError>;
}

/// Removes proxied artifacts that have not been accessed recently
pub trait ExpiredArtifactsCleaner: Send + Sync {
    /// Remove artifacts older than `last_accessed_days`
    ///
    /// `min_size_bytes` of `-1` disables the size filter.
    fn cleanup(&self, last_accessed_days: i64, min_size_bytes: i64) -> Result<(), DelegateError>;
}

/// Empties repository trash directories
pub trait TrashService: Send + Sync {
    /// Clear the trash of every repository
    fn delete_all_trash(&self) -> Result<(), DelegateError>;

    /// Clear trash for the given scope
    ///
    /// Whether a repository without a storage is meaningful is up to the
    /// implementation.
    fn delete_trash(
        &self,
        storage_id: Option<&str>,
        repository_id: Option<&str>,
    ) -> Result<(), DelegateError>;
}

/// Whether existing checksums are rewritten during regeneration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegenerationPolicy {
    /// Create missing checksums, leave existing ones untouched
    #[default]
    MissingOnly,

    /// Rewrite existing checksums and create missing ones
    Overwrite,
}

impl RegenerationPolicy {
    /// Map a `forceRegeneration` flag onto a policy
    pub fn from_force(force: bool) -> Self {
        if force {
            RegenerationPolicy::Overwrite
        } else {
            RegenerationPolicy::MissingOnly
        }
    }

    /// True when existing checksums get rewritten
    pub fn is_forced(&self) -> bool {
        matches!(self, RegenerationPolicy::Overwrite)
    }
}

/// Computes checksum files for repository contents
pub trait ChecksumService: Send + Sync {
    /// Regenerate checksums of one repository
    ///
    /// `base_path` restricts the work to a subtree; `None` means the
    /// repository root.
    fn regenerate_checksum(
        &self,
        storage_id: &str,
        repository_id: &str,
        base_path: Option<&str>,
        policy: RegenerationPolicy,
    ) -> Result<(), DelegateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_force() {
        assert_eq!(RegenerationPolicy::from_force(false), RegenerationPolicy::MissingOnly);
        assert_eq!(RegenerationPolicy::from_force(true), RegenerationPolicy::Overwrite);
        assert_eq!(RegenerationPolicy::default(), RegenerationPolicy::MissingOnly);
        assert!(RegenerationPolicy::Overwrite.is_forced());
        assert!(!RegenerationPolicy::MissingOnly.is_forced());
    }
}
