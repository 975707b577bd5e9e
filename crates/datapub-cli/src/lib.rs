//! # datapub-cli — Publishing Core Command-Line Interface
//!
//! Operator tooling around the publishing core. Resources enter as JSON
//! aggregate files on disk; the curation workflow that normally supplies
//! them is out of the picture here.
//!
//! ## Subcommands
//!
//! - `validate` — Check a resource file against the DataCite 4.6 schema
//! - `export` — Produce a validated DataCite JSON or XML export file
//! - `register` — Mint a DOI or refresh registered metadata
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handler functions delegate to the domain crates; no projection or
//!   validation logic lives here.

pub mod export;
pub mod register;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use datapub_core::Resource;

/// Load a resource aggregate from a JSON file.
pub fn load_resource(path: &Path) -> anyhow::Result<Resource> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading resource file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing resource file {}", path.display()))
}
