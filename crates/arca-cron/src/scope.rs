//! Scope resolution and repository sweeps
//!
//! The identifying parameters of a run decide how far an operation reaches:
//!
//! | storageId | repositoryId | Scope |
//! |-----------|--------------|-------|
//! | absent    | absent       | [`StorageScope::Global`] |
//! | present   | absent       | [`StorageScope::Storage`] |
//! | present   | present      | [`StorageScope::Repository`] |
//! | absent    | present      | rejected |
//!
//! The scope is resolved once per run. [`Sweep`] turns it into an ordered
//! [`SweepPlan`] in which every repository appears exactly once.

use crate::report::{RepositoryRef, SweepReport};
use crate::CronJobError;
use arca_domain::{ConfigurationRegistry, DelegateError};
use std::collections::HashSet;

/// Reach of one maintenance run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageScope {
    /// Every repository of every storage
    Global,
    /// Every repository of one storage
    Storage(String),
    /// Exactly one repository
    Repository(String, String),
}

impl StorageScope {
    /// Resolve the scope from the identifying parameters
    pub fn resolve(
        storage_id: Option<&str>,
        repository_id: Option<&str>,
    ) -> Result<Self, CronJobError> {
        match (storage_id, repository_id) {
            (Some(storage), Some(repository)) => Ok(StorageScope::Repository(
                storage.to_string(),
                repository.to_string(),
            )),
            (Some(storage), None) => Ok(StorageScope::Storage(storage.to_string())),
            (None, None) => Ok(StorageScope::Global),
            (None, Some(repository)) => Err(CronJobError::InvalidParameterCombination(format!(
                "repositoryId '{}' requires a storageId",
                repository
            ))),
        }
    }

    /// True for the single-repository scope
    pub fn is_single_repository(&self) -> bool {
        matches!(self, StorageScope::Repository(..))
    }
}

/// Ordered list of repositories a sweep will visit
#[derive(Debug, Default)]
pub struct SweepPlan {
    /// Repositories in visit order, without duplicates
    pub targets: Vec<RepositoryRef>,

    /// Storages whose repositories could not be listed
    pub unlisted: Vec<(String, DelegateError)>,
}

impl SweepPlan {
    /// Visit every target in order, isolating failures per repository
    ///
    /// A failing repository is logged and recorded as skipped; the sweep
    /// moves on to the next one.
    pub fn execute<F>(self, mut visit: F) -> SweepReport
    where
        F: FnMut(&RepositoryRef) -> Result<(), DelegateError>,
    {
        let mut report = SweepReport::new();

        for (storage_id, error) in self.unlisted {
            report.record_unlisted_storage(storage_id, error.to_string());
        }

        for target in self.targets {
            tracing::debug!(repository = %target, "Processing repository");
            match visit(&target) {
                Ok(()) => report.record_processed(target),
                Err(e) => {
                    tracing::warn!(repository = %target, error = %e, "Skipping repository");
                    report.record_skipped(target, e.to_string());
                }
            }
        }

        report
    }
}

/// Enumerates the repositories covered by a scope
pub struct Sweep<'a> {
    registry: &'a dyn ConfigurationRegistry,
}

impl<'a> Sweep<'a> {
    /// Create a sweep over the given registry
    pub fn new(registry: &'a dyn ConfigurationRegistry) -> Self {
        Self { registry }
    }

    /// Build the visit plan for a scope
    ///
    /// An unknown storage at [`StorageScope::Storage`] is the only outcome of
    /// that run and is returned as an error. During a global sweep a storage
    /// that cannot be listed is recorded in [`SweepPlan::unlisted`] instead.
    pub fn plan(&self, scope: &StorageScope) -> Result<SweepPlan, DelegateError> {
        let mut plan = SweepPlan::default();
        let mut seen = HashSet::new();

        match scope {
            StorageScope::Repository(storage_id, repository_id) => {
                plan.targets
                    .push(RepositoryRef::new(storage_id.as_str(), repository_id.as_str()));
            }
            StorageScope::Storage(storage_id) => {
                let repositories = self.registry.repository_ids(storage_id)?;
                push_unique(&mut plan, &mut seen, storage_id, repositories);
            }
            StorageScope::Global => {
                let mut seen_storages = HashSet::new();
                for storage_id in self.registry.storage_ids() {
                    if !seen_storages.insert(storage_id.clone()) {
                        continue;
                    }
                    match self.registry.repository_ids(&storage_id) {
                        Ok(repositories) => {
                            push_unique(&mut plan, &mut seen, &storage_id, repositories)
                        }
                        Err(e) => {
                            tracing::warn!(storage = %storage_id, error = %e, "Cannot list repositories of storage");
                            plan.unlisted.push((storage_id, e));
                        }
                    }
                }
            }
        }

        Ok(plan)
    }
}

fn push_unique(
    plan: &mut SweepPlan,
    seen: &mut HashSet<RepositoryRef>,
    storage_id: &str,
    repositories: Vec<String>,
) {
    for repository_id in repositories {
        let target = RepositoryRef::new(storage_id, repository_id);
        if seen.insert(target.clone()) {
            plan.targets.push(target);
        }
    }
}
