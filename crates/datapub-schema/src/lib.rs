//! # datapub-schema — DataCite 4.6 Validation
//!
//! Validates projected export documents against the external DataCite
//! Metadata Schema before anything leaves the system.
//!
//! Two validation paths share one error shape:
//!
//! - **JSON**: the projected JSON:API document is validated against the
//!   bundled DataCite 4.6 JSON Schema (Draft 2020-12) via the
//!   `jsonschema` crate — see [`json::SchemaValidator`].
//! - **XML**: the kernel-4.6 mandatory-field contract is enforced over
//!   the aggregate before projection — see [`kernel::check`]. Advisory
//!   findings are surfaced as non-fatal warnings and never block export.
//!
//! Every failure is reduced to a [`ValidationIssue`] carrying a document
//! pointer, a human-readable message, the violated schema keyword, and
//! rule-specific context. Issue order follows document traversal order;
//! validating the same document against the same schema version always
//! yields the same ordered list.
//!
//! This crate holds no mutable state after construction and issues no
//! network calls.

pub mod issue;
pub mod json;
pub mod kernel;

pub use issue::{ValidationIssue, ValidationReport, SCHEMA_VERSION};
pub use json::{SchemaError, SchemaValidator};
pub use kernel::KernelCheck;
