//! Regeneration of artifact checksums
//!
//! The scope cascades from one repository, to every repository of a storage,
//! to the whole hierarchy. Broad sweeps isolate failures per repository; the
//! single-repository form propagates its failure because it is the only
//! outcome of the run.

use super::{CronJob, REPOSITORY_ID, STORAGE_ID};
use crate::config::coerce_optional_boolean;
use crate::scope::{StorageScope, Sweep};
use crate::{Autocomplete, CronJobError, CronJobProperty, JobConfiguration, JobOutcome};
use arca_domain::{ChecksumService, ConfigurationRegistry, RegenerationPolicy};
use std::sync::Arc;

const FORCE_REGENERATION: &str = "forceRegeneration";
const BASE_PATH: &str = "basePath";

/// Creates missing checksums, optionally rewriting existing ones
pub struct RegenerateChecksumJob {
    checksums: Arc<dyn ChecksumService>,
    registry: Arc<dyn ConfigurationRegistry>,
}

impl RegenerateChecksumJob {
    /// Job type identifier
    pub const JOB_TYPE: &'static str = "regenerate-checksum";

    /// Create the job around a checksum service and the storage registry
    pub fn new(
        checksums: Arc<dyn ChecksumService>,
        registry: Arc<dyn ConfigurationRegistry>,
    ) -> Self {
        Self {
            checksums,
            registry,
        }
    }
}

impl CronJob for RegenerateChecksumJob {
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
            CronJobProperty::named(FORCE_REGENERATION).optional().boolean(),
            CronJobProperty::named(BASE_PATH).optional().string(),
        ]
    }

    fn execute(&self, config: &JobConfiguration) -> Result<JobOutcome, CronJobError> {
        let force = coerce_optional_boolean(config, FORCE_REGENERATION)?.unwrap_or(false);
        let policy = RegenerationPolicy::from_force(force);
        let base_path = config.optional(BASE_PATH);
        let scope =
            StorageScope::resolve(config.optional(STORAGE_ID), config.optional(REPOSITORY_ID))?;

        if let StorageScope::Repository(storage_id, repository_id) = &scope {
            tracing::info!(
                storage = %storage_id,
                repository = %repository_id,
                ?base_path,
                forced = policy.is_forced(),
                "Regenerating repository checksums"
            );
            self.checksums
                .regenerate_checksum(storage_id, repository_id, base_path, policy)?;
            return Ok(JobOutcome::Completed);
        }

        if let Some(path) = base_path {
            tracing::warn!(
                base_path = %path,
                ?scope,
                "basePath only applies to a single repository; regenerating from repository roots"
            );
        }

        let plan = Sweep::new(self.registry.as_ref()).plan(&scope)?;
        tracing::info!(
            ?scope,
            repositories = plan.targets.len(),
            forced = policy.is_forced(),
            "Regenerating checksums"
        );

        let report = plan.execute(|target| {
            self.checksums.regenerate_checksum(
                &target.storage_id,
                &target.repository_id,
                None,
                policy,
            )
        });
        tracing::info!(?scope, "Checksum sweep {}", report.summary());

        Ok(JobOutcome::Swept(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;
    use arca_domain::{DelegateError, Repository, Storage, StorageConfiguration};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        storage: String,
        repository: String,
        base_path: Option<String>,
        policy: RegenerationPolicy,
    }

    #[derive(Default)]
    struct MockChecksums {
        calls: Mutex<Vec<Call>>,
        failing: Vec<&'static str>,
    }

    impl ChecksumService for MockChecksums {
        fn regenerate_checksum(
            &self,
            storage_id: &str,
            repository_id: &str,
            base_path: Option<&str>,
            policy: RegenerationPolicy,
        ) -> Result<(), DelegateError> {
            self.calls.lock().unwrap().push(Call {
                storage: storage_id.to_string(),
                repository: repository_id.to_string(),
                base_path: base_path.map(String::from),
                policy,
            });
            if self.failing.iter().any(|f| *f == repository_id) {
                return Err(DelegateError::RepositoryNotFound {
                    storage_id: storage_id.to_string(),
                    repository_id: repository_id.to_string(),
                });
            }
            Ok(())
        }
    }

    fn registry() -> Arc<StorageConfiguration> {
        Arc::new(
            StorageConfiguration::new(vec![
                Storage::new("storage0")
                    .with_repository(Repository::new("releases"))
                    .with_repository(Repository::new("snapshots")),
                Storage::new("storage1").with_repository(Repository::new("central")),
            ])
            .unwrap(),
        )
    }

    fn job_with(checksums: MockChecksums) -> (Arc<MockChecksums>, RegenerateChecksumJob) {
        let checksums = Arc::new(checksums);
        (
            checksums.clone(),
            RegenerateChecksumJob::new(checksums, registry()),
        )
    }

    fn visited(checksums: &MockChecksums) -> Vec<(String, String)> {
        checksums
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| (c.storage.clone(), c.repository.clone()))
            .collect()
    }

    #[test]
    fn test_properties_order() {
        let (_, job) = job_with(MockChecksums::default());
        let names: Vec<_> = job.properties().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["storageId", "repositoryId", "forceRegeneration", "basePath"]);

        let properties = job.properties();
        assert_eq!(properties[2].value_type(), ValueType::Boolean);
        assert_eq!(properties[3].autocomplete_source(), None);
    }

    #[test]
    fn test_single_repository_honors_base_path() {
        let (checksums, job) = job_with(MockChecksums::default());
        let config = JobConfiguration::from_pairs([
            ("storageId", "storage0"),
            ("repositoryId", "releases"),
            ("basePath", "org/example"),
            ("forceRegeneration", "true"),
        ]);

        assert_eq!(job.execute(&config).unwrap(), JobOutcome::Completed);
        assert_eq!(
            *checksums.calls.lock().unwrap(),
            vec![Call {
                storage: "storage0".into(),
                repository: "releases".into(),
                base_path: Some("org/example".into()),
                policy: RegenerationPolicy::Overwrite,
            }]
        );
    }

    #[test]
    fn test_single_repository_failure_propagates() {
        let (_, job) = job_with(MockChecksums {
            failing: vec!["releases"],
            ..Default::default()
        });
        let config = JobConfiguration::from_pairs([
            ("storageId", "storage0"),
            ("repositoryId", "releases"),
        ]);

        let err = job.execute(&config).unwrap_err();
        assert!(matches!(err, CronJobError::Delegate(DelegateError::RepositoryNotFound { .. })));
    }

    #[test]
    fn test_storage_sweep_ignores_base_path() {
        let (checksums, job) = job_with(MockChecksums::default());
        let config = JobConfiguration::from_pairs([
            ("storageId", "storage0"),
            ("basePath", "org/example"),
        ]);

        let outcome = job.execute(&config).unwrap();
        assert_eq!(outcome.sweep().unwrap().processed.len(), 2);
        assert!(checksums.calls.lock().unwrap().iter().all(|c| c.base_path.is_none()));
    }

    #[test]
    fn test_global_sweep_visits_every_repository_once() {
        let (checksums, job) = job_with(MockChecksums::default());

        job.execute(&JobConfiguration::default()).unwrap();
        assert_eq!(
            visited(&checksums),
            vec![
                ("storage0".into(), "releases".into()),
                ("storage0".into(), "snapshots".into()),
                ("storage1".into(), "central".into()),
            ]
        );
    }

    #[test]
    fn test_sweep_isolates_failures() {
        let (checksums, job) = job_with(MockChecksums {
            failing: vec!["releases"],
            ..Default::default()
        });

        let outcome = job.execute(&JobConfiguration::default()).unwrap();
        let report = outcome.sweep().unwrap();
        assert_eq!(visited(&checksums).len(), 3);
        assert_eq!(report.skipped_repositories(), 1);
        assert_eq!(report.processed.len(), 2);
    }

    #[test]
    fn test_unknown_storage_propagates() {
        let (checksums, job) = job_with(MockChecksums::default());
        let config = JobConfiguration::from_pairs([("storageId", "nope")]);

        let err = job.execute(&config).unwrap_err();
        assert!(matches!(err, CronJobError::Delegate(DelegateError::StorageNotFound(_))));
        assert!(checksums.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_force_absent_matches_false() {
        let (absent, job) = job_with(MockChecksums::default());
        job.execute(&JobConfiguration::from_pairs([("storageId", "storage1")]))
            .unwrap();

        let (explicit, job) = job_with(MockChecksums::default());
        job.execute(&JobConfiguration::from_pairs([
            ("storageId", "storage1"),
            ("forceRegeneration", "false"),
        ]))
        .unwrap();

        assert_eq!(*absent.calls.lock().unwrap(), *explicit.calls.lock().unwrap());
        assert_eq!(absent.calls.lock().unwrap()[0].policy, RegenerationPolicy::MissingOnly);
    }

    #[test]
    fn test_invalid_force_aborts_before_any_call() {
        let (checksums, job) = job_with(MockChecksums::default());
        let config = JobConfiguration::from_pairs([("forceRegeneration", "sometimes")]);

        let err = job.execute(&config).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(checksums.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_repository_without_storage_aborts() {
        let (checksums, job) = job_with(MockChecksums::default());
        let config = JobConfiguration::from_pairs([("repositoryId", "releases")]);

        let err = job.execute(&config).unwrap_err();
        assert!(matches!(err, CronJobError::InvalidParameterCombination(_)));
        assert!(checksums.calls.lock().unwrap().is_empty());
    }
}
