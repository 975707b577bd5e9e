//! # Registration Error Taxonomy
//!
//! Every failure of a registration call is typed by what the caller can
//! do about it: fix the metadata, fix the credentials, or try again
//! later. Registry responses are never swallowed; rejection bodies are
//! carried verbatim.

use thiserror::Error;

use datapub_core::CoreError;
use datapub_export::ExportError;
use datapub_schema::SchemaError;

use crate::config::{ConfigError, RegistryMode};
use crate::policy::PolicyDenied;

/// Failure modes of DOI registration.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The policy refused the call; nothing was sent.
    #[error("registration denied: {0}")]
    Policy(#[from] PolicyDenied),

    /// The export document failed projection or validation; nothing was
    /// sent. An invalid document never reaches the registry.
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A domain invariant refused the call, e.g. a second mint attempt.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The registry could not be reached after the bounded retry ran out.
    #[error("{mode} registry unreachable after {attempts} attempts: {detail}")]
    Unreachable {
        mode: RegistryMode,
        attempts: u32,
        detail: String,
    },

    /// The registry rejected the request. Not retried; the body carries
    /// the registry's own error detail.
    #[error("{mode} registry rejected the request with status {status}: {body}")]
    Rejected {
        mode: RegistryMode,
        status: u16,
        body: String,
    },

    /// Authentication failed against the registry. Not retried.
    #[error("{mode} registry rejected the credentials (status {status})")]
    BadCredentials { mode: RegistryMode, status: u16 },

    /// The registry answered success but the body was not usable.
    #[error("unexpected response from {mode} registry: {reason}")]
    UnexpectedResponse { mode: RegistryMode, reason: String },
}
