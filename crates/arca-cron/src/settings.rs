//! Cron task settings files
//!
//! A task binds a job type to a parameter map. The cron expression is kept
//! for the external scheduler and never interpreted here.
//!
//! ```toml
//! [[tasks]]
//! name = "nightly-checksums"
//! job = "regenerate-checksum"
//! cron_expression = "0 0 2 * * ?"
//!
//! [tasks.properties]
//! storageId = "storage0"
//! forceRegeneration = "false"
//! ```

use crate::JobConfiguration;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Task settings error
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse settings TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Task without a name
    #[error("Task name must not be empty")]
    EmptyName,

    /// Two tasks share a name
    #[error("Duplicate task name: {0}")]
    DuplicateTask(String),
}

/// One scheduled task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronTaskConfiguration {
    /// Unique task name
    pub name: String,

    /// Job type to execute
    pub job: String,

    /// Trigger expression for the external scheduler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,

    /// Raw job parameters
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl CronTaskConfiguration {
    /// Create a task without parameters
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
            cron_expression: None,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style helper setting one parameter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Parameters as a job configuration snapshot
    pub fn configuration(&self) -> JobConfiguration {
        JobConfiguration::new(self.properties.clone())
    }
}

/// All configured tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronSettings {
    /// Tasks in declaration order
    #[serde(default)]
    pub tasks: Vec<CronTaskConfiguration>,
}

impl CronSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: CronSettings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Look up a task by name
    pub fn task(&self, name: &str) -> Option<&CronTaskConfiguration> {
        self.tasks.iter().find(|t| t.name == name)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let mut names = HashSet::new();
        for task in &self.tasks {
            if task.name.trim().is_empty() {
                return Err(SettingsError::EmptyName);
            }
            if !names.insert(task.name.as_str()) {
                return Err(SettingsError::DuplicateTask(task.name.clone()));
            }
        }
        Ok(())
    }
}
