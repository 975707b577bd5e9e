//! # datapub-registry — DOI Registration
//!
//! Registers resources with the external DataCite registry: policy
//! evaluation, the REST client for minting and metadata refresh, and
//! the DOI write-back into the aggregate.
//!
//! ## Call Shape
//!
//! [`publish`] is the single entry point. Every call runs the
//! [`policy`] first, then either mints (unregistered resource) or
//! pushes updated metadata (registered resource). The export document
//! is validated before any network traffic; transient registry
//! failures are retried a bounded number of times ([`retry`]).
//!
//! ## Crate Policy
//!
//! No `unwrap`/`expect` outside tests. Credentials never appear in
//! `Debug` output or logs.

pub mod client;
pub mod config;
pub mod error;
pub mod policy;
pub mod retry;

pub use client::{DataCiteClient, RegistrationOutcome};
pub use config::{ConfigError, RegistryConfig, RegistryMode, RegistrySettings};
pub use error::RegistryError;
pub use policy::{authorize, PolicyDenied, RegistrationOp};
pub use retry::MAX_ATTEMPTS;

use datapub_core::{Actor, Doi, Resource};

/// What a [`publish`] call did.
#[derive(Debug, Clone)]
pub enum RegistrationResult {
    /// A DOI was minted and written back into the resource.
    Minted(RegistrationOutcome),
    /// The registry record behind an existing DOI was refreshed.
    Updated { doi: Doi },
}

/// Publish a resource: mint a DOI, or refresh metadata if one exists.
///
/// The policy is evaluated on every call. On a successful mint the DOI
/// is written back into `resource` before returning; the caller owns
/// persisting the updated aggregate.
pub async fn publish(
    client: &DataCiteClient,
    actor: &Actor,
    resource: &mut Resource,
    requested: Option<RegistryMode>,
) -> Result<RegistrationResult, RegistryError> {
    let default_mode = client.settings().default_mode;

    if let Some(doi) = resource.doi.clone() {
        let mode = policy::authorize(
            actor,
            resource,
            requested,
            default_mode,
            RegistrationOp::UpdateMetadata,
        )?;
        client.update_metadata(&doi, resource, mode).await?;
        return Ok(RegistrationResult::Updated { doi });
    }

    let mode = policy::authorize(
        actor,
        resource,
        requested,
        default_mode,
        RegistrationOp::Mint,
    )?;
    let outcome = client.register(resource, mode).await?;
    resource.assign_doi(outcome.doi.clone())?;
    Ok(RegistrationResult::Minted(outcome))
}
