//! Arca Cron
//!
//! Scheduled maintenance jobs for the storage/repository hierarchy.
//!
//! # Overview
//!
//! The crate provides:
//! - **Parameter descriptors**: Immutable, ordered descriptions of what a job
//!   accepts, used for validation and by external scheduling UIs
//! - **Job configuration**: A read-only view over a flat parameter map
//! - **Maintenance jobs**: Expired artifact cleanup, trash clearing and
//!   checksum regeneration
//! - **Scope resolution**: Cascading a run across one repository, one
//!   storage or the whole hierarchy while isolating per-repository failures
//! - **Job runner**: Executes configured tasks and records metrics
//!
//! Deciding *when* a job runs, and keeping two runs of the same job apart,
//! belongs to the external scheduler.
//!
//! # Jobs
//!
//! | Job type | Parameters |
//! |----------|------------|
//! | `cleanup-expired-artifacts` | `lastAccessedTimeInDays` (required integer), `minSizeInBytes` (integer, default -1) |
//! | `clear-repository-trash` | `storageId`, `repositoryId` |
//! | `regenerate-checksum` | `storageId`, `repositoryId`, `forceRegeneration` (boolean, default false), `basePath` |
//!
//! # Usage
//!
//! ```no_run
//! use arca_cron::{CronSettings, Delegates, JobRunner};
//! # fn delegates() -> Delegates { unimplemented!() }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = CronSettings::from_file("cron.toml")?;
//! let mut runner = JobRunner::with_default_jobs(delegates());
//!
//! if let Some(task) = settings.task("nightly-checksums") {
//!     let report = runner.run(task)?;
//!     println!("{:?}", report.status);
//! }
//! println!("{}", runner.metrics().summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod jobs;
mod metrics;
mod property;
mod report;
mod runner;
pub mod scope;
mod settings;

pub use config::{
    coerce_optional_boolean, coerce_optional_integer, coerce_required_integer, JobConfiguration,
};
pub use error::CronJobError;
pub use jobs::CronJob;
pub use metrics::RunnerMetrics;
pub use property::{
    parse_boolean, parse_integer, validate_submission, Autocomplete, CronJobProperty, Facet,
    NamedProperty, Presence, PresentProperty, ValueType,
};
pub use report::{JobOutcome, RepositoryRef, Skipped, SweepReport};
pub use runner::{Delegates, JobDefinition, JobRunner, RunReport, RunStatus};
pub use scope::StorageScope;
pub use settings::{CronSettings, CronTaskConfiguration, SettingsError};
