//! # Export Orchestration
//!
//! The export service ties projection and validation together: it loads
//! the aggregate, projects the requested format, validates the result,
//! and hands back a named, typed payload. A payload that leaves this
//! service has passed validation; anything else is a typed error.

use chrono::Utc;
use datapub_core::{Actor, Resource, ResourceId};
use datapub_schema::{kernel, SchemaError, SchemaValidator, ValidationIssue, ValidationReport};

use crate::error::ExportError;
use crate::json::project_json;
use crate::store::ResourceStore;
use crate::xml::project_xml;

/// The two supported wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Xml => "application/xml",
        }
    }
}

/// A validated export, ready for download or transfer.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
    /// Non-fatal advisory findings, e.g. a missing DOI on the XML path.
    /// Never cause a failure; empty on the JSON path.
    pub warnings: Vec<ValidationIssue>,
}

/// Loads, projects, and validates resources for export.
pub struct ExportService<S: ResourceStore> {
    store: S,
    validator: SchemaValidator,
}

impl<S: ResourceStore> ExportService<S> {
    /// Build a service over `store`, compiling the schema once up front.
    pub fn new(store: S) -> Result<Self, SchemaError> {
        Ok(Self {
            store,
            validator: SchemaValidator::new()?,
        })
    }

    /// Export one resource in the requested format.
    ///
    /// The caller must be authenticated; any known actor may export.
    /// Returns a payload only when the projected document passed
    /// validation, otherwise the full [`ValidationReport`] inside
    /// [`ExportError::SchemaValidation`].
    pub fn export(
        &self,
        actor: Option<&Actor>,
        id: &ResourceId,
        format: ExportFormat,
    ) -> Result<ExportPayload, ExportError> {
        let actor = actor.ok_or(ExportError::Unauthorized)?;
        let resource = self.store.load(id).ok_or(ExportError::NotFound(*id))?;

        let (bytes, warnings) = match format {
            ExportFormat::Json => (self.export_json(&resource)?, Vec::new()),
            ExportFormat::Xml => self.export_xml(&resource)?,
        };

        let filename = format!(
            "dataset-{}-{}.{}",
            resource.id,
            Utc::now().format("%Y%m%d%H%M%S"),
            format.extension()
        );

        tracing::info!(
            resource = %resource.id,
            actor = %actor.name,
            format = format.extension(),
            bytes = bytes.len(),
            "export produced"
        );

        Ok(ExportPayload {
            bytes,
            filename,
            content_type: format.content_type(),
            warnings,
        })
    }

    fn export_json(&self, resource: &Resource) -> Result<Vec<u8>, ExportError> {
        let document = project_json(resource);
        let issues = self.validator.validate_export(&document);
        if !issues.is_empty() {
            return Err(ExportError::SchemaValidation(ValidationReport::json_failure(
                issues,
            )));
        }
        serde_json::to_vec_pretty(&document)
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }

    fn export_xml(
        &self,
        resource: &Resource,
    ) -> Result<(Vec<u8>, Vec<ValidationIssue>), ExportError> {
        let check = kernel::check(resource);
        for warning in &check.warnings {
            tracing::debug!(path = %warning.path, "kernel warning: {}", warning.message);
        }
        if check.is_fatal() {
            return Err(ExportError::SchemaValidation(ValidationReport::xml_failure(
                check.errors,
            )));
        }
        Ok((project_xml(resource)?.into_bytes(), check.warnings))
    }
}
