//! Shared recording delegates for integration tests

#![allow(dead_code)]

use arca_cron::Delegates;
use arca_domain::{
    ChecksumService, ConfigurationRegistry, DelegateError, ExpiredArtifactsCleaner,
    RegenerationPolicy, Repository, Storage, StorageConfiguration, TrashService,
};
use std::sync::{Arc, Mutex};

/// Every delegate call, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Cleanup {
        days: i64,
        min_bytes: i64,
    },
    DeleteAllTrash,
    DeleteTrash {
        storage: Option<String>,
        repository: Option<String>,
    },
    Regenerate {
        storage: String,
        repository: String,
        base_path: Option<String>,
        policy: RegenerationPolicy,
    },
}

/// Records calls into every delegate; repositories listed in `failing`
/// raise an I/O error during checksum regeneration
#[derive(Default)]
pub struct Recorder {
    pub calls: Mutex<Vec<Call>>,
    pub failing: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_repository(&self, repository_id: &str) {
        self.failing.lock().unwrap().push(repository_id.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn regenerated(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Regenerate {
                    storage, repository, ..
                } => Some((storage, repository)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ExpiredArtifactsCleaner for Recorder {
    fn cleanup(&self, last_accessed_days: i64, min_size_bytes: i64) -> Result<(), DelegateError> {
        self.record(Call::Cleanup {
            days: last_accessed_days,
            min_bytes: min_size_bytes,
        });
        Ok(())
    }
}

impl TrashService for Recorder {
    fn delete_all_trash(&self) -> Result<(), DelegateError> {
        self.record(Call::DeleteAllTrash);
        Ok(())
    }

    fn delete_trash(
        &self,
        storage_id: Option<&str>,
        repository_id: Option<&str>,
    ) -> Result<(), DelegateError> {
        self.record(Call::DeleteTrash {
            storage: storage_id.map(String::from),
            repository: repository_id.map(String::from),
        });
        Ok(())
    }
}

impl ChecksumService for Recorder {
    fn regenerate_checksum(
        &self,
        storage_id: &str,
        repository_id: &str,
        base_path: Option<&str>,
        policy: RegenerationPolicy,
    ) -> Result<(), DelegateError> {
        self.record(Call::Regenerate {
            storage: storage_id.to_string(),
            repository: repository_id.to_string(),
            base_path: base_path.map(String::from),
            policy,
        });
        if self.failing.lock().unwrap().iter().any(|r| r == repository_id) {
            return Err(DelegateError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("cannot read {}", repository_id),
            )));
        }
        Ok(())
    }
}

/// Build a registry from `(storage, [repositories])` pairs
pub fn registry(layout: &[(&str, &[&str])]) -> Arc<StorageConfiguration> {
    let storages = layout
        .iter()
        .map(|(storage, repositories)| {
            repositories
                .iter()
                .fold(Storage::new(*storage), |s, r| s.with_repository(Repository::new(*r)))
        })
        .collect();
    Arc::new(StorageConfiguration::new(storages).unwrap())
}

/// Delegates that all record into the same recorder
pub fn delegates(recorder: &Arc<Recorder>, registry: Arc<dyn ConfigurationRegistry>) -> Delegates {
    Delegates {
        cleaner: recorder.clone(),
        trash: recorder.clone(),
        checksums: recorder.clone(),
        registry,
    }
}
