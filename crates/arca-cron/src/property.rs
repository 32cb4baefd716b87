//! Parameter descriptors for maintenance jobs
//!
//! A descriptor tells an external scheduling UI what a job needs without
//! executing anything. Facets are layered in a fixed order enforced by the
//! builder types:
//!
//! ```text
//! named(name) -> required() | optional() -> string() | integer() | boolean() -> [autocomplete(..)]
//! ```
//!
//! # Examples
//!
//! ```
//! use arca_cron::{Autocomplete, CronJobProperty, ValueType};
//!
//! let property = CronJobProperty::named("storageId")
//!     .optional()
//!     .string()
//!     .autocomplete(Autocomplete::StorageId);
//!
//! assert_eq!(property.name(), "storageId");
//! assert!(!property.is_required());
//! assert_eq!(property.value_type(), ValueType::String);
//! ```

use crate::{CronJobError, JobConfiguration};
use serde::{Deserialize, Serialize};

/// Whether a parameter must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Absence is a validation failure
    Required,
    /// May be omitted
    Optional,
}

/// Declared type of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Any string
    String,
    /// Base-10 signed 64-bit integer
    Integer,
    /// `true` or `false`, ASCII case-insensitive
    Boolean,
}

impl ValueType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
        }
    }

    /// Check that `raw` coerces to this type
    pub fn check(&self, name: &str, raw: &str) -> Result<(), CronJobError> {
        match self {
            ValueType::String => Ok(()),
            ValueType::Integer => parse_integer(name, raw).map(|_| ()),
            ValueType::Boolean => parse_boolean(name, raw).map(|_| ()),
        }
    }
}

/// External enumeration a UI should offer as suggestions
///
/// Purely descriptive; it never affects validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Autocomplete {
    /// Known storage identifiers
    StorageId,
    /// Known repository identifiers
    RepositoryId,
}

/// One layer of a composed descriptor, reported in composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<'a> {
    /// Base layer carrying the parameter name
    Name(&'a str),
    /// Required or optional
    Presence(Presence),
    /// Declared value type
    Type(ValueType),
    /// Suggestion source
    Autocomplete(Autocomplete),
}

/// Parse an integer parameter value
pub fn parse_integer(name: &str, raw: &str) -> Result<i64, CronJobError> {
    raw.parse::<i64>()
        .map_err(|_| coercion_error(name, raw, ValueType::Integer))
}

/// Parse a boolean parameter value
pub fn parse_boolean(name: &str, raw: &str) -> Result<bool, CronJobError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(coercion_error(name, raw, ValueType::Boolean))
    }
}

fn coercion_error(name: &str, raw: &str, expected: ValueType) -> CronJobError {
    CronJobError::ParameterCoercion {
        name: name.to_string(),
        value: raw.to_string(),
        expected: expected.as_str(),
    }
}

/// Base layer of a descriptor; only the name is known
#[derive(Debug, Clone)]
pub struct NamedProperty {
    name: String,
}

impl NamedProperty {
    /// Mark the parameter as required
    pub fn required(self) -> PresentProperty {
        self.with_presence(Presence::Required)
    }

    /// Mark the parameter as optional
    pub fn optional(self) -> PresentProperty {
        self.with_presence(Presence::Optional)
    }

    fn with_presence(self, presence: Presence) -> PresentProperty {
        PresentProperty {
            name: self.name,
            presence,
        }
    }
}

/// Descriptor with name and presence; a type must follow
#[derive(Debug, Clone)]
pub struct PresentProperty {
    name: String,
    presence: Presence,
}

impl PresentProperty {
    /// Declare a string value
    pub fn string(self) -> CronJobProperty {
        self.with_type(ValueType::String)
    }

    /// Declare an integer value
    pub fn integer(self) -> CronJobProperty {
        self.with_type(ValueType::Integer)
    }

    /// Declare a boolean value
    pub fn boolean(self) -> CronJobProperty {
        self.with_type(ValueType::Boolean)
    }

    fn with_type(self, value_type: ValueType) -> CronJobProperty {
        CronJobProperty {
            name: self.name,
            presence: self.presence,
            value_type,
            autocomplete: None,
        }
    }
}

/// Immutable description of one job-configurable value
///
/// Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronJobProperty {
    name: String,
    presence: Presence,
    #[serde(rename = "type")]
    value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autocomplete: Option<Autocomplete>,
}

impl CronJobProperty {
    /// Start a descriptor with the given parameter name
    pub fn named(name: impl Into<String>) -> NamedProperty {
        NamedProperty { name: name.into() }
    }

    /// Attach an autocomplete hint
    pub fn autocomplete(mut self, source: Autocomplete) -> Self {
        self.autocomplete = Some(source);
        self
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Presence requirement
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// True for required parameters
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Declared value type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Autocomplete hint, if any
    pub fn autocomplete_source(&self) -> Option<Autocomplete> {
        self.autocomplete
    }

    /// Layers of this descriptor in composition order
    pub fn facets(&self) -> Vec<Facet<'_>> {
        let mut facets = vec![
            Facet::Name(&self.name),
            Facet::Presence(self.presence),
            Facet::Type(self.value_type),
        ];
        if let Some(source) = self.autocomplete {
            facets.push(Facet::Autocomplete(source));
        }
        facets
    }

    /// Validate one submitted value against presence and type
    pub fn check(&self, value: Option<&str>) -> Result<(), CronJobError> {
        match value {
            None if self.is_required() => {
                Err(CronJobError::MissingRequiredParameter(self.name.clone()))
            }
            None => Ok(()),
            Some(raw) => self.value_type.check(&self.name, raw),
        }
    }
}

/// Validate a whole submission against a descriptor list
///
/// Returns every violation in descriptor order. Keys without a descriptor
/// are not inspected.
pub fn validate_submission(
    properties: &[CronJobProperty],
    config: &JobConfiguration,
) -> Vec<CronJobError> {
    properties
        .iter()
        .filter_map(|property| property.check(config.optional(property.name())).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_all_facets() {
        let property = CronJobProperty::named("lastAccessedTimeInDays")
            .required()
            .integer();

        assert_eq!(property.name(), "lastAccessedTimeInDays");
        assert_eq!(property.presence(), Presence::Required);
        assert_eq!(property.value_type(), ValueType::Integer);
        assert_eq!(property.autocomplete_source(), None);
    }

    #[test]
    fn test_facets_in_composition_order() {
        let property = CronJobProperty::named("repositoryId")
            .optional()
            .string()
            .autocomplete(Autocomplete::RepositoryId);

        assert_eq!(
            property.facets(),
            vec![
                Facet::Name("repositoryId"),
                Facet::Presence(Presence::Optional),
                Facet::Type(ValueType::String),
                Facet::Autocomplete(Autocomplete::RepositoryId),
            ]
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("n", "42").unwrap(), 42);
        assert_eq!(parse_integer("n", "-1").unwrap(), -1);
        assert_eq!(parse_integer("n", "+7").unwrap(), 7);
        assert!(parse_integer("n", "abc").is_err());
        assert!(parse_integer("n", " 42").is_err());
        assert!(parse_integer("n", "").is_err());
        assert!(parse_integer("n", "1.5").is_err());
    }

    #[test]
    fn test_parse_boolean() {
        assert!(parse_boolean("b", "true").unwrap());
        assert!(parse_boolean("b", "TRUE").unwrap());
        assert!(!parse_boolean("b", "False").unwrap());
        assert!(parse_boolean("b", "yes").is_err());
        assert!(parse_boolean("b", "").is_err());
    }

    #[test]
    fn test_check_ignores_autocomplete() {
        let property = CronJobProperty::named("storageId")
            .optional()
            .string()
            .autocomplete(Autocomplete::StorageId);

        // Any string passes, even one no storage is named after
        assert!(property.check(Some("no-such-storage")).is_ok());
        assert!(property.check(None).is_ok());
    }

    #[test]
    fn test_check_required_missing() {
        let property = CronJobProperty::named("lastAccessedTimeInDays")
            .required()
            .integer();

        let err = property.check(None).unwrap_err();
        assert!(
            matches!(err, CronJobError::MissingRequiredParameter(name) if name == "lastAccessedTimeInDays")
        );
        assert!(property.check(Some("30")).is_ok());
        assert!(property.check(Some("thirty")).is_err());
    }

    #[test]
    fn test_validate_submission_reports_in_descriptor_order() {
        let properties = vec![
            CronJobProperty::named("lastAccessedTimeInDays").required().integer(),
            CronJobProperty::named("minSizeInBytes").optional().integer(),
            CronJobProperty::named("forceRegeneration").optional().boolean(),
        ];
        let config = JobConfiguration::from_pairs([
            ("minSizeInBytes", "xyz"),
            ("forceRegeneration", "maybe"),
            ("unrelated", "whatever"),
        ]);

        let violations = validate_submission(&properties, &config);
        assert_eq!(violations.len(), 3);
        assert!(matches!(&violations[0], CronJobError::MissingRequiredParameter(n) if n == "lastAccessedTimeInDays"));
        assert!(matches!(&violations[1], CronJobError::ParameterCoercion { name, .. } if name == "minSizeInBytes"));
        assert!(matches!(&violations[2], CronJobError::ParameterCoercion { expected: "boolean", .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let property = CronJobProperty::named("storageId")
            .optional()
            .string()
            .autocomplete(Autocomplete::StorageId);

        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "storageId",
                "presence": "optional",
                "type": "string",
                "autocomplete": "storageId"
            })
        );

        let plain = CronJobProperty::named("basePath").optional().string();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("autocomplete").is_none());
    }
}
