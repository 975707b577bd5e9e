//! # Export Error Taxonomy
//!
//! Every failure path out of the export service is a typed result the
//! caller can branch on; nothing is silently swallowed and no panic
//! escapes the service boundary.

use thiserror::Error;

use datapub_core::ResourceId;
use datapub_schema::ValidationReport;

/// Failure modes of an export call.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The resource id does not exist. Checked before projection.
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// The caller is not allowed to export. Checked before projection.
    #[error("caller is not authorized to export")]
    Unauthorized,

    /// The projected document failed schema validation. Carries the full
    /// structured report including the schema version; recoverable by
    /// fixing the underlying metadata, never retried automatically.
    #[error("{0}")]
    SchemaValidation(ValidationReport),

    /// The valid document could not be serialized to bytes.
    #[error("export serialization failed: {0}")]
    Serialization(String),
}

impl ExportError {
    /// The HTTP-equivalent status for this failure.
    pub fn status(&self) -> u16 {
        match self {
            ExportError::NotFound(_) => 404,
            ExportError::Unauthorized => 401,
            ExportError::SchemaValidation(_) => 422,
            ExportError::Serialization(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datapub_schema::ValidationReport;

    #[test]
    fn status_codes_match_failure_kinds() {
        assert_eq!(ExportError::NotFound(ResourceId::new()).status(), 404);
        assert_eq!(ExportError::Unauthorized.status(), 401);
        assert_eq!(
            ExportError::SchemaValidation(ValidationReport::json_failure(vec![])).status(),
            422
        );
    }
}
