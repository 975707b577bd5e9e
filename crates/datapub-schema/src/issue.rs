//! # Normalized Validation Issues
//!
//! The single error shape both validation paths reduce to, and the
//! user-facing report the export service returns on failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The DataCite Metadata Schema revision this core validates against.
pub const SCHEMA_VERSION: &str = "4.6";

/// A single validation finding with structured context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Pointer into the document, e.g. `/data/attributes/titles`.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The schema rule violated, e.g. `required`, `minItems`.
    pub keyword: String,
    /// Rule-specific details, e.g. the minimum required count.
    pub context: Value,
}

impl ValidationIssue {
    pub fn new(
        path: impl Into<String>,
        message: impl Into<String>,
        keyword: impl Into<String>,
        context: Value,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            keyword: keyword.into(),
            context,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.path, self.message)
        }
    }
}

/// The structured failure body returned when an export does not conform
/// to the schema. Serializes to
/// `{ message, errors: [{path, message, keyword, context}], schema_version }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub message: String,
    pub errors: Vec<ValidationIssue>,
    pub schema_version: String,
}

impl ValidationReport {
    /// Failure report for the JSON export path.
    pub fn json_failure(errors: Vec<ValidationIssue>) -> Self {
        Self {
            message: "JSON export validation failed against DataCite Schema.".to_string(),
            errors,
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }

    /// Failure report for the XML export path.
    pub fn xml_failure(errors: Vec<ValidationIssue>) -> Self {
        Self {
            message: "XML export validation failed against DataCite Schema.".to_string(),
            errors,
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for issue in &self.errors {
            writeln!(f)?;
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_display_includes_path_and_message() {
        let issue = ValidationIssue::new(
            "/data/attributes/titles",
            "[] has less than 1 item",
            "minItems",
            json!({"limit": 1}),
        );
        let display = issue.to_string();
        assert!(display.contains("/data/attributes/titles"));
        assert!(display.contains("less than 1 item"));
    }

    #[test]
    fn issue_display_marks_root() {
        let issue = ValidationIssue::new("", "\"data\" is a required property", "required", json!({}));
        assert!(issue.to_string().contains("(root)"));
    }

    #[test]
    fn report_serializes_to_contract_shape() {
        let report = ValidationReport::json_failure(vec![ValidationIssue::new(
            "/data/attributes/creators",
            "[] has less than 1 item",
            "minItems",
            json!({"limit": 1}),
        )]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value["message"],
            "JSON export validation failed against DataCite Schema."
        );
        assert_eq!(value["schema_version"], "4.6");
        assert_eq!(value["errors"][0]["path"], "/data/attributes/creators");
        assert_eq!(value["errors"][0]["keyword"], "minItems");
        assert_eq!(value["errors"][0]["context"]["limit"], 1);
    }
}
