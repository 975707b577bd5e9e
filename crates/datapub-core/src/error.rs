//! # Core Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. The aggregate-level failure modes live here; export
//! and registration failures carry their own taxonomies in the crates
//! that own those operations.

use thiserror::Error;

use crate::identifier::Doi;

/// Aggregate-level error.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A DOI write-back was attempted on an already-registered resource.
    /// Registration is not retractable; a second attempt must go through
    /// the metadata-update path instead.
    #[error("resource is already registered under {existing}")]
    AlreadyRegistered {
        /// The DOI already attached to the resource.
        existing: Doi,
    },

    /// A string did not parse as a DOI in registry form.
    #[error("not a DOI in registry form (10.<registrant>/<suffix>): {0}")]
    InvalidDoi(String),
}
