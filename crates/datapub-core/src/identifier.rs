//! # Domain Identifier Newtypes
//!
//! Newtype wrappers for the two identifier namespaces of the publishing
//! core. A [`ResourceId`] keys the internal aggregate; a [`Doi`] is the
//! external persistent identifier minted by the registry. The types are
//! deliberately not interchangeable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Internal identifier for a curated metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

impl ResourceId {
    /// Generate a new random resource identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Digital Object Identifier as minted by the external registry.
///
/// Stored without a resolver prefix, e.g. `10.5072/example-full`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Doi(String);

impl Doi {
    /// Parse a DOI from its registry form `10.<registrant>/<suffix>`.
    ///
    /// Rejects resolver URLs and strings without a registrant/suffix
    /// split. The registrant is numeric but may be subdivided with dots
    /// (`10.978.86123/x`). The registry is the authority on deeper
    /// syntax; this check only guards against storing something that is
    /// not a DOI at all.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        let Some(rest) = raw.strip_prefix("10.") else {
            return Err(CoreError::InvalidDoi(raw.to_string()));
        };
        let Some((registrant, suffix)) = rest.split_once('/') else {
            return Err(CoreError::InvalidDoi(raw.to_string()));
        };
        let registrant_ok = registrant
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()));
        if !registrant_ok || suffix.is_empty() {
            return Err(CoreError::InvalidDoi(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// The DOI in registry form, without a resolver prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Doi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doi_parse_accepts_registry_form() {
        let doi = Doi::parse("10.5072/test-2026-001").unwrap();
        assert_eq!(doi.as_str(), "10.5072/test-2026-001");
    }

    #[test]
    fn doi_parse_trims_whitespace() {
        let doi = Doi::parse("  10.5072/x  ").unwrap();
        assert_eq!(doi.as_str(), "10.5072/x");
    }

    #[test]
    fn doi_parse_rejects_resolver_url() {
        assert!(Doi::parse("https://doi.org/10.5072/x").is_err());
    }

    #[test]
    fn doi_parse_rejects_missing_suffix() {
        assert!(Doi::parse("10.5072").is_err());
        assert!(Doi::parse("10.5072/").is_err());
    }

    #[test]
    fn doi_parse_accepts_dotted_registrant() {
        let doi = Doi::parse("10.978.86123/x").unwrap();
        assert_eq!(doi.as_str(), "10.978.86123/x");
    }

    #[test]
    fn doi_parse_rejects_non_numeric_registrant() {
        assert!(Doi::parse("10.abc/x").is_err());
        assert!(Doi::parse("10.978.abc/x").is_err());
        assert!(Doi::parse("10..5072/x").is_err());
    }

    #[test]
    fn resource_id_roundtrips_through_serde() {
        let id = ResourceId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: ResourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
