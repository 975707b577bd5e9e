//! # JSON Schema Validation
//!
//! Runtime validation of projected JSON export documents against the
//! bundled DataCite Metadata Schema 4.6 (Draft 2020-12).
//!
//! ## Error Normalization
//!
//! The raw `jsonschema` errors are reduced to [`ValidationIssue`]s. For
//! `required` violations the pointer is extended with the missing
//! property name so the path always addresses the field a caller has to
//! fix, not just its parent object.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, ValidationError, Validator};
use serde_json::{json, Value};
use thiserror::Error;

use crate::issue::{ValidationIssue, SCHEMA_VERSION};

/// The DataCite 4.6 schema document shipped with this crate.
static KERNEL_46_SCHEMA: &str = include_str!("../schemas/datacite-4.6.schema.json");

/// Error constructing a validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Only the bundled schema revision is supported.
    #[error("unsupported schema version '{0}' (supported: {SCHEMA_VERSION})")]
    UnsupportedVersion(String),

    /// The bundled schema document failed to parse.
    #[error("bundled schema for version {version} is not valid JSON: {reason}")]
    SchemaParse {
        version: &'static str,
        reason: String,
    },

    /// The compiled validator could not be built.
    #[error("validator build error for schema version {version}: {reason}")]
    ValidatorBuild {
        version: &'static str,
        reason: String,
    },
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Compiles the bundled DataCite 4.6 schema once at construction; the
/// compiled validator is `Send + Sync` and can be shared across threads.
/// Holds no mutable state and performs no I/O.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Create a validator for the current schema version (4.6).
    pub fn new() -> Result<Self, SchemaError> {
        let schema: Value =
            serde_json::from_str(KERNEL_46_SCHEMA).map_err(|e| SchemaError::SchemaParse {
                version: SCHEMA_VERSION,
                reason: e.to_string(),
            })?;

        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|e| SchemaError::ValidatorBuild {
                version: SCHEMA_VERSION,
                reason: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Create a validator for an explicit schema version.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedVersion` for anything other than
    /// the bundled revision.
    pub fn for_version(version: &str) -> Result<Self, SchemaError> {
        if version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion(version.to_string()));
        }
        Self::new()
    }

    /// Validate a projected export document.
    ///
    /// Returns zero or more issues in document traversal order. An empty
    /// list means the document conforms to the schema.
    pub fn validate_export(&self, document: &Value) -> Vec<ValidationIssue> {
        self.validator
            .iter_errors(document)
            .map(issue_from_error)
            .collect()
    }
}

/// Reduce a raw `jsonschema` error to the normalized issue shape.
fn issue_from_error(error: ValidationError<'_>) -> ValidationIssue {
    let mut path = error.instance_path.to_string();
    let message = error.to_string();

    let (keyword, context) = match &error.kind {
        ValidationErrorKind::Required { property } => {
            // Address the missing field itself, not its parent object.
            if let Some(name) = property.as_str() {
                path = format!("{path}/{name}");
            }
            ("required".to_string(), json!({ "property": property }))
        }
        ValidationErrorKind::MinItems { limit } => {
            ("minItems".to_string(), json!({ "limit": limit }))
        }
        ValidationErrorKind::MaxItems { limit } => {
            ("maxItems".to_string(), json!({ "limit": limit }))
        }
        ValidationErrorKind::MinLength { limit } => {
            ("minLength".to_string(), json!({ "limit": limit }))
        }
        ValidationErrorKind::MaxLength { limit } => {
            ("maxLength".to_string(), json!({ "limit": limit }))
        }
        ValidationErrorKind::Minimum { limit } => {
            ("minimum".to_string(), json!({ "limit": limit }))
        }
        ValidationErrorKind::Maximum { limit } => {
            ("maximum".to_string(), json!({ "limit": limit }))
        }
        ValidationErrorKind::Pattern { pattern } => {
            ("pattern".to_string(), json!({ "pattern": pattern }))
        }
        ValidationErrorKind::Enum { options } => {
            ("enum".to_string(), json!({ "allowed": options }))
        }
        ValidationErrorKind::Constant { expected_value } => {
            ("const".to_string(), json!({ "expected": expected_value }))
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            "additionalProperties".to_string(),
            json!({ "unexpected": unexpected }),
        ),
        _ => (
            keyword_from_schema_path(&error.schema_path.to_string()),
            json!({}),
        ),
    };

    ValidationIssue {
        path,
        message,
        keyword,
        context,
    }
}

/// Fall back to the last segment of the schema pointer as the keyword
/// (e.g. `/properties/data/properties/type/type` -> `type`).
fn keyword_from_schema_path(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty() && segment.parse::<usize>().is_err())
        .unwrap_or("schema")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_document() -> Value {
        json!({
            "data": {
                "type": "dois",
                "attributes": {
                    "titles": [{ "title": "Test Dataset" }],
                    "creators": [{
                        "name": "Doe, John",
                        "nameType": "Personal",
                        "givenName": "John",
                        "familyName": "Doe"
                    }],
                    "publisher": "Open Research Data Repository",
                    "publicationYear": 2026,
                    "types": { "resourceTypeGeneral": "Dataset" }
                }
            }
        })
    }

    #[test]
    fn valid_document_yields_no_issues() {
        let validator = SchemaValidator::new().unwrap();
        assert!(validator.validate_export(&valid_document()).is_empty());
    }

    #[test]
    fn missing_creators_is_addressed_by_path() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]
            .as_object_mut()
            .unwrap()
            .remove("creators");

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/data/attributes/creators");
        assert_eq!(issues[0].keyword, "required");
        assert_eq!(issues[0].context["property"], "creators");
    }

    #[test]
    fn empty_titles_violates_min_items() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]["titles"] = json!([]);

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/data/attributes/titles");
        assert_eq!(issues[0].keyword, "minItems");
        assert_eq!(issues[0].context["limit"], 1);
    }

    #[test]
    fn missing_publication_year_is_required_error() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]
            .as_object_mut()
            .unwrap()
            .remove("publicationYear");

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/data/attributes/publicationYear");
        assert_eq!(issues[0].keyword, "required");
    }

    #[test]
    fn non_integer_publication_year_is_type_error() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]["publicationYear"] = json!("2026");

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/data/attributes/publicationYear");
        assert_eq!(issues[0].keyword, "type");
    }

    #[test]
    fn contributor_without_type_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]["contributors"] = json!([{ "name": "Doe, Jane" }]);

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/data/attributes/contributors/0/contributorType");
        assert_eq!(issues[0].keyword, "required");
    }

    #[test]
    fn wrong_top_level_type_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["type"] = json!("datasets");

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/data/type");
        assert_eq!(issues[0].keyword, "const");
    }

    #[test]
    fn unknown_resource_type_general_is_enum_error() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]["types"]["resourceTypeGeneral"] = json!("Spreadsheet");

        let issues = validator.validate_export(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].path,
            "/data/attributes/types/resourceTypeGeneral"
        );
        assert_eq!(issues[0].keyword, "enum");
    }

    #[test]
    fn validation_is_deterministic() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_document();
        doc["data"]["attributes"]["titles"] = json!([]);
        doc["data"]["attributes"]["creators"] = json!([]);

        let first = validator.validate_export(&doc);
        let second = validator.validate_export(&doc);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn for_version_rejects_unknown_revision() {
        let err = SchemaValidator::for_version("4.3").unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedVersion(_)));
    }

    #[test]
    fn keyword_fallback_takes_last_named_segment() {
        assert_eq!(
            keyword_from_schema_path("/properties/data/properties/type/type"),
            "type"
        );
        assert_eq!(keyword_from_schema_path("/items/0"), "items");
    }
}
