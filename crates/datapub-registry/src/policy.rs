//! # Registration Policy
//!
//! Decides, before any network traffic, whether a registration call may
//! proceed and which registry mode it runs against. The policy is
//! evaluated on every call; a mode granted once is never cached.

use thiserror::Error;

use datapub_core::{Actor, Resource};

use crate::config::RegistryMode;

/// The registration operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOp {
    /// Mint a new DOI for an unregistered resource.
    Mint,
    /// Push updated metadata for an already registered resource.
    UpdateMetadata,
}

/// A policy refusal. Carries no registry detail; nothing was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyDenied {
    /// Minting requires a published landing page, because the registry
    /// stores its URL as the DOI target.
    #[error("landing page required")]
    LandingPageRequired,
}

/// Authorize one registration call and resolve its registry mode.
///
/// A published landing page is required except when updating metadata of
/// a resource that is already registered. A test-restricted actor is
/// always forced onto the test registry; their requested mode is
/// ignored, not rejected. Everyone else gets the requested mode, or the
/// configured default when none was requested.
pub fn authorize(
    actor: &Actor,
    resource: &Resource,
    requested: Option<RegistryMode>,
    default_mode: RegistryMode,
    op: RegistrationOp,
) -> Result<RegistryMode, PolicyDenied> {
    let metadata_refresh = op == RegistrationOp::UpdateMetadata && resource.is_registered();
    if !metadata_refresh && !resource.has_published_landing_page() {
        return Err(PolicyDenied::LandingPageRequired);
    }

    if actor.role.is_test_restricted() {
        return Ok(RegistryMode::Test);
    }

    Ok(requested.unwrap_or(default_mode))
}
