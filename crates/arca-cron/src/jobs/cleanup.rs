//! Removal of expired artifacts from proxy repositories

use super::CronJob;
use crate::config::{coerce_optional_integer, coerce_required_integer};
use crate::{CronJobError, CronJobProperty, JobConfiguration, JobOutcome};
use arca_domain::ExpiredArtifactsCleaner;
use std::sync::Arc;

/// Sent to the cleaner when no minimum size is configured
pub const NO_MIN_SIZE: i64 = -1;

const LAST_ACCESSED_TIME_IN_DAYS: &str = "lastAccessedTimeInDays";
const MIN_SIZE_IN_BYTES: &str = "minSizeInBytes";

/// Deletes proxied artifacts that have not been accessed for a while
///
/// Makes exactly one call into the cleaner; locating candidate artifacts is
/// the cleaner's job.
pub struct CleanupExpiredArtifactsJob {
    cleaner: Arc<dyn ExpiredArtifactsCleaner>,
}

impl CleanupExpiredArtifactsJob {
    /// Job type identifier
    pub const JOB_TYPE: &'static str = "cleanup-expired-artifacts";

    /// Create the job around a cleaner
    pub fn new(cleaner: Arc<dyn ExpiredArtifactsCleaner>) -> Self {
        Self { cleaner }
    }
}

impl CronJob for CleanupExpiredArtifactsJob {
    fn job_type(&self) -> &'static str {
        Self::JOB_TYPE
    }

    fn properties(&self) -> Vec<CronJobProperty> {
        vec![
            CronJobProperty::named(LAST_ACCESSED_TIME_IN_DAYS)
                .required()
                .integer(),
            CronJobProperty::named(MIN_SIZE_IN_BYTES).optional().integer(),
        ]
    }

    fn execute(&self, config: &JobConfiguration) -> Result<JobOutcome, CronJobError> {
        let last_accessed_days = coerce_required_integer(config, LAST_ACCESSED_TIME_IN_DAYS)?;
        let min_size_bytes =
            coerce_optional_integer(config, MIN_SIZE_IN_BYTES)?.unwrap_or(NO_MIN_SIZE);

        tracing::info!(
            last_accessed_days,
            min_size_bytes,
            "Cleaning up expired proxy artifacts"
        );
        self.cleaner.cleanup(last_accessed_days, min_size_bytes)?;

        Ok(JobOutcome::Completed)
    }
}
