//! Outcomes of job executions and repository sweeps

use std::fmt;

/// Fully-qualified repository reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryRef {
    /// Owning storage
    pub storage_id: String,
    /// Repository within the storage
    pub repository_id: String,
}

impl RepositoryRef {
    /// Create a reference
    pub fn new(storage_id: impl Into<String>, repository_id: impl Into<String>) -> Self {
        Self {
            storage_id: storage_id.into(),
            repository_id: repository_id.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.storage_id, self.repository_id)
    }
}

/// Something a sweep could not process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// Processing one repository failed
    Repository {
        /// The repository
        target: RepositoryRef,
        /// Failure message
        reason: String,
    },
    /// The repositories of a storage could not be listed
    Storage {
        /// The storage
        storage_id: String,
        /// Failure message
        reason: String,
    },
}

/// Per-repository results of a sweep
///
/// Each repository's outcome is recorded independently; a sweep never fails
/// as a whole because one repository did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Repositories processed successfully, in visit order
    pub processed: Vec<RepositoryRef>,

    /// Repositories and storages that were skipped, in visit order
    pub skipped: Vec<Skipped>,
}

impl SweepReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful repository
    pub fn record_processed(&mut self, target: RepositoryRef) {
        self.processed.push(target);
    }

    /// Record a failed repository
    pub fn record_skipped(&mut self, target: RepositoryRef, reason: impl Into<String>) {
        self.skipped.push(Skipped::Repository {
            target,
            reason: reason.into(),
        });
    }

    /// Record a storage whose repositories could not be listed
    pub fn record_unlisted_storage(&mut self, storage_id: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(Skipped::Storage {
            storage_id: storage_id.into(),
            reason: reason.into(),
        });
    }

    /// Number of repositories skipped
    pub fn skipped_repositories(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, Skipped::Repository { .. }))
            .count()
    }

    /// Number of storages whose listing failed
    pub fn skipped_storages(&self) -> usize {
        self.skipped.len() - self.skipped_repositories()
    }

    /// Number of repositories attempted
    pub fn attempted(&self) -> usize {
        self.processed.len() + self.skipped_repositories()
    }

    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// One-line summary, e.g. "completed with 1 of 3 repositories skipped"
    pub fn summary(&self) -> String {
        let mut line = format!(
            "completed with {} of {} repositories skipped",
            self.skipped_repositories(),
            self.attempted()
        );
        let storages = self.skipped_storages();
        if storages > 0 {
            line.push_str(&format!(" ({} storages could not be listed)", storages));
        }
        line
    }
}

/// Result of one successful job execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// A single delegate call completed
    Completed,

    /// A multi-repository sweep completed
    Swept(SweepReport),
}

impl JobOutcome {
    /// Sweep report, if this outcome came from a sweep
    pub fn sweep(&self) -> Option<&SweepReport> {
        match self {
            JobOutcome::Completed => None,
            JobOutcome::Swept(report) => Some(report),
        }
    }
}
