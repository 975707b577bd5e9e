//! # datapub-export — Format Projection and Export Orchestration
//!
//! Projects the Resource aggregate into the two DataCite wire formats
//! and orchestrates export: authorize, load, project, validate, and
//! return either a fully valid payload or a structured failure.
//!
//! ## Projection Contract
//!
//! Both projectors ([`json::project_json`], [`xml::project_xml`]) are
//! pure, deterministic, and total over any aggregate shape — they never
//! reject malformed input themselves. Rejection is the validator's job;
//! the [`service::ExportService`] wires the two together so that an
//! export either yields a document that passed validation or a
//! [`ValidationReport`](datapub_schema::ValidationReport), never a
//! partially valid payload.
//!
//! The creator/contributor partition is not reimplemented here: both
//! projectors call `datapub_core::partition_parties` so the formats
//! cannot diverge.

pub mod error;
pub mod json;
pub mod service;
pub mod store;
pub mod xml;

pub use error::ExportError;
pub use json::{project_json, registration_document, PUBLISHER};
pub use service::{ExportFormat, ExportPayload, ExportService};
pub use store::{MemoryStore, ResourceStore};
pub use xml::project_xml;
