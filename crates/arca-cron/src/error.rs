//! Error types for maintenance job execution

use arca_domain::DelegateError;
use thiserror::Error;

/// Errors that can occur while parsing a job configuration or running a job
#[derive(Error, Debug)]
pub enum CronJobError {
    /// A required key is absent from the configuration
    #[error("Missing required parameter: {0}")]
    MissingRequiredParameter(String),

    /// A present value cannot be parsed into its declared type
    #[error("Invalid {expected} value [{value}] of '{name}' parameter")]
    ParameterCoercion {
        /// Parameter name
        name: String,
        /// Raw configured value
        value: String,
        /// Declared type name
        expected: &'static str,
    },

    /// Parameters that are individually valid but cannot be combined
    #[error("Invalid parameter combination: {0}")]
    InvalidParameterCombination(String),

    /// No job is registered under the requested type
    #[error("Unknown job type: {0}")]
    UnknownJob(String),

    /// Failure raised by a maintenance delegate
    #[error("Delegate error: {0}")]
    Delegate(#[from] DelegateError),
}

impl CronJobError {
    /// True for malformed user configuration
    ///
    /// These abort a run as a no-op instead of failing it.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CronJobError::MissingRequiredParameter(_)
                | CronJobError::ParameterCoercion { .. }
                | CronJobError::InvalidParameterCombination(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_classification() {
        assert!(CronJobError::MissingRequiredParameter("x".into()).is_configuration_error());
        assert!(CronJobError::ParameterCoercion {
            name: "x".into(),
            value: "y".into(),
            expected: "integer",
        }
        .is_configuration_error());
        assert!(CronJobError::InvalidParameterCombination("x".into()).is_configuration_error());
        assert!(!CronJobError::UnknownJob("x".into()).is_configuration_error());
        assert!(!CronJobError::Delegate(DelegateError::Service("boom".into()))
            .is_configuration_error());
    }

    #[test]
    fn test_coercion_message_names_parameter_and_value() {
        let err = CronJobError::ParameterCoercion {
            name: "lastAccessedTimeInDays".into(),
            value: "abc".into(),
            expected: "integer",
        };
        assert_eq!(
            err.to_string(),
            "Invalid integer value [abc] of 'lastAccessedTimeInDays' parameter"
        );
    }
}
