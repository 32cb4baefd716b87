//! Execution of configured tasks against the registered jobs
//!
//! The runner is the boundary towards the external scheduler. It decides how
//! each kind of job error surfaces:
//!
//! - malformed configuration is logged and the run is reported as
//!   [`RunStatus::Aborted`], a no-op rather than an operational fault;
//! - a delegate failure at a single-target entry point is returned as `Err`;
//! - sweeps always complete, with skipped repositories listed in the report.

use crate::jobs::{
    CleanupExpiredArtifactsJob, ClearRepositoryTrashJob, CronJob, RegenerateChecksumJob,
};
use crate::settings::CronTaskConfiguration;
use crate::{CronJobError, CronJobProperty, JobConfiguration, JobOutcome, RunnerMetrics};
use arca_domain::{ChecksumService, ConfigurationRegistry, ExpiredArtifactsCleaner, TrashService};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// External services the built-in jobs depend on
#[derive(Clone)]
pub struct Delegates {
    /// Expired artifact cleaner
    pub cleaner: Arc<dyn ExpiredArtifactsCleaner>,
    /// Trash service
    pub trash: Arc<dyn TrashService>,
    /// Checksum service
    pub checksums: Arc<dyn ChecksumService>,
    /// Storage registry
    pub registry: Arc<dyn ConfigurationRegistry>,
}

/// A job type and its descriptors, as shown by a scheduling UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDefinition {
    /// Job type identifier
    pub job: String,
    /// Parameter descriptors in declared order
    pub properties: Vec<CronJobProperty>,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The job ran to completion
    Completed(JobOutcome),

    /// The configuration was rejected; nothing was executed
    Aborted {
        /// Why the configuration was rejected
        reason: String,
    },
}

/// Report of one task run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Correlation id, also attached to the run's log span
    pub run_id: Uuid,
    /// Task name
    pub task: String,
    /// Job type
    pub job: String,
    /// Final status
    pub status: RunStatus,
    /// Wall-clock duration
    pub elapsed: Duration,
}

impl RunReport {
    /// True when the run was aborted for bad configuration
    pub fn is_aborted(&self) -> bool {
        matches!(self.status, RunStatus::Aborted { .. })
    }
}

/// Registry of jobs by type, executing one task at a time
///
/// # Examples
///
/// ```
/// use arca_cron::{CronTaskConfiguration, JobRunner};
///
/// let mut runner = JobRunner::new();
/// let task = CronTaskConfiguration::new("nightly", "no-such-job");
/// assert!(runner.run(&task).is_err());
/// ```
#[derive(Default)]
pub struct JobRunner {
    jobs: BTreeMap<&'static str, Box<dyn CronJob>>,
    metrics: RunnerMetrics,
}

impl JobRunner {
    /// Create a runner with no jobs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with the three built-in maintenance jobs
    pub fn with_default_jobs(delegates: Delegates) -> Self {
        let mut runner = Self::new();
        runner.register(CleanupExpiredArtifactsJob::new(delegates.cleaner));
        runner.register(ClearRepositoryTrashJob::new(delegates.trash));
        runner.register(RegenerateChecksumJob::new(
            delegates.checksums,
            delegates.registry,
        ));
        runner
    }

    /// Register a job, replacing any job of the same type
    pub fn register<J: CronJob + 'static>(&mut self, job: J) {
        let job_type = job.job_type();
        if self.jobs.insert(job_type, Box::new(job)).is_some() {
            tracing::debug!(job = job_type, "Replaced registered job");
        }
    }

    /// Descriptor list of one job type
    pub fn properties(&self, job_type: &str) -> Option<Vec<CronJobProperty>> {
        self.jobs.get(job_type).map(|job| job.properties())
    }

    /// All registered jobs with their descriptors, sorted by job type
    pub fn definitions(&self) -> Vec<JobDefinition> {
        self.jobs
            .values()
            .map(|job| JobDefinition {
                job: job.job_type().to_string(),
                properties: job.properties(),
            })
            .collect()
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &RunnerMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run a configured task once
    pub fn run(&mut self, task: &CronTaskConfiguration) -> Result<RunReport, CronJobError> {
        self.run_job(&task.name, &task.job, &task.configuration())
    }

    /// Run a job type once with an ad-hoc configuration
    pub fn run_job(
        &mut self,
        task: &str,
        job_type: &str,
        config: &JobConfiguration,
    ) -> Result<RunReport, CronJobError> {
        let job = self
            .jobs
            .get(job_type)
            .ok_or_else(|| CronJobError::UnknownJob(job_type.to_string()))?;

        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("cron_task", %run_id, task, job = job_type);
        let _guard = span.enter();

        tracing::info!(parameters = config.len(), "Starting job");
        let start = Instant::now();
        let result = job.execute(config);
        let elapsed = start.elapsed();
        self.metrics.total_runtime_ms += elapsed.as_millis();

        let status = match result {
            Ok(outcome) => {
                if let Some(report) = outcome.sweep() {
                    self.metrics.record_skipped(report.skipped_repositories());
                }
                self.metrics.record_completed(job_type);
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "Job completed");
                RunStatus::Completed(outcome)
            }
            Err(e) if e.is_configuration_error() => {
                self.metrics.record_aborted(job_type);
                tracing::error!(error = %e, "Invalid job configuration. Job won't be fired");
                RunStatus::Aborted {
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                self.metrics.record_failed(job_type);
                tracing::error!(error = %e, "Job failed");
                return Err(e);
            }
        };

        Ok(RunReport {
            run_id,
            task: task.to_string(),
            job: job_type.to_string(),
            status,
            elapsed,
        })
    }
}
