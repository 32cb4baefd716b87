//! Read-only view over a job's flat parameter map

use crate::property::{parse_boolean, parse_integer};
use crate::CronJobError;
use std::collections::BTreeMap;

/// Parameters of one job execution
///
/// Keys are case-sensitive; each maps to a single raw string. Typed
/// coercion is left to the job via the `coerce_*` helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobConfiguration {
    properties: BTreeMap<String, String>,
}

impl JobConfiguration {
    /// Wrap a parameter map
    pub fn new(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }

    /// Build a configuration from key/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Value of an optional parameter
    pub fn optional(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Value of a required parameter
    pub fn required(&self, name: &str) -> Result<&str, CronJobError> {
        self.optional(name)
            .ok_or_else(|| CronJobError::MissingRequiredParameter(name.to_string()))
    }

    /// Number of configured parameters
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when no parameter is configured
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Required integer parameter
pub fn coerce_required_integer(
    config: &JobConfiguration,
    name: &str,
) -> Result<i64, CronJobError> {
    parse_integer(name, config.required(name)?)
}

/// Optional integer parameter, `None` when absent
pub fn coerce_optional_integer(
    config: &JobConfiguration,
    name: &str,
) -> Result<Option<i64>, CronJobError> {
    config
        .optional(name)
        .map(|raw| parse_integer(name, raw))
        .transpose()
}

/// Optional boolean parameter, `None` when absent
pub fn coerce_optional_boolean(
    config: &JobConfiguration,
    name: &str,
) -> Result<Option<bool>, CronJobError> {
    config
        .optional(name)
        .map(|raw| parse_boolean(name, raw))
        .transpose()
}
