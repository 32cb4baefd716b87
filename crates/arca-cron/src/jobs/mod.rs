//! Maintenance jobs
//!
//! Every job exposes its parameter descriptors and an execution entry point.
//! Parameters are parsed completely before any delegate is called, so a
//! malformed configuration never partially applies an operation.

mod checksum;
mod cleanup;
mod trash;

pub use checksum::RegenerateChecksumJob;
pub use cleanup::{CleanupExpiredArtifactsJob, NO_MIN_SIZE};
pub use trash::ClearRepositoryTrashJob;

use crate::{CronJobError, CronJobProperty, JobConfiguration, JobOutcome};

/// Parameter name for the storage identifier
pub const STORAGE_ID: &str = "storageId";
/// Parameter name for the repository identifier
pub const REPOSITORY_ID: &str = "repositoryId";

/// A unit of scheduled maintenance work
///
/// Implementations hold nothing but injected delegates and are stateless
/// across invocations.
pub trait CronJob: Send + Sync {
    /// Stable identifier used to select the job from task settings
    fn job_type(&self) -> &'static str;

    /// Parameter descriptors in declared order
    fn properties(&self) -> Vec<CronJobProperty>;

    /// Run the job once
    ///
    /// Configuration errors (see [`CronJobError::is_configuration_error`])
    /// are returned before any delegate is invoked.
    fn execute(&self, config: &JobConfiguration) -> Result<JobOutcome, CronJobError>;
}
