//! Clearing of repository trash

use super::{CronJob, REPOSITORY_ID, STORAGE_ID};
use crate::{Autocomplete, CronJobError, CronJobProperty, JobConfiguration, JobOutcome};
use arca_domain::TrashService;
use std::sync::Arc;

/// Empties trash globally or for the configured storage/repository
///
/// A plain two-way dispatch. Whether a repository without a storage makes
/// sense is for the trash service to decide.
pub struct ClearRepositoryTrashJob {
    trash: Arc<dyn TrashService>,
}

impl ClearRepositoryTrashJob {
    /// Job type identifier
    pub const JOB_TYPE: &'static str = "clear-repository-trash";

    /// Create the job around a trash service
    pub fn new(trash: Arc<dyn TrashService>) -> Self {
        Self { trash }
    }
}

impl CronJob for ClearRepositoryTrashJob {
    fn job_type(&self) -> &'static str {
        Self::JOB_TYPE
    }

    fn properties(&self) -> Vec<CronJobProperty> {
        vec![
            CronJobProperty::named(STORAGE_ID)
                .optional()
                .string()
                .autocomplete(Autocomplete::StorageId),
            CronJobProperty::named(REPOSITORY_ID)
                .optional()
                .string()
                .autocomplete(Autocomplete::RepositoryId),
        ]
    }

    fn execute(&self, config: &JobConfiguration) -> Result<JobOutcome, CronJobError> {
        let storage_id = config.optional(STORAGE_ID);
        let repository_id = config.optional(REPOSITORY_ID);

        if storage_id.is_none() && repository_id.is_none() {
            tracing::info!("Clearing trash of all repositories");
            self.trash.delete_all_trash()?;
        } else {
            tracing::info!(?storage_id, ?repository_id, "Clearing repository trash");
            self.trash.delete_trash(storage_id, repository_id)?;
        }

        Ok(JobOutcome::Completed)
    }
}
