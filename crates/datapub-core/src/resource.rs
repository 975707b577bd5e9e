//! # The Resource Aggregate
//!
//! The materialized view of one curated metadata record and all of its
//! child collections. The curation workflow (an external collaborator)
//! owns creation and mutation; this core reads the aggregate and writes
//! back exactly one field, the minted DOI, after successful registration.
//!
//! Child collections are ordered — order is significant on both wire
//! formats (the first license is the primary one, titles keep curation
//! order, and so on).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identifier::{Doi, ResourceId};
use crate::party::PartyAssignment;

/// The type tag of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleType {
    /// The mandatory main title; exactly one per resource.
    Main,
    Alternative,
    Subtitle,
    Translated,
    Other,
}

impl TitleType {
    /// The DataCite `titleType` attribute value. The main title carries
    /// no attribute on either wire format.
    pub fn datacite_name(&self) -> Option<&'static str> {
        match self {
            TitleType::Main => None,
            TitleType::Alternative => Some("AlternativeTitle"),
            TitleType::Subtitle => Some("Subtitle"),
            TitleType::Translated => Some("TranslatedTitle"),
            TitleType::Other => Some("Other"),
        }
    }
}

/// A title attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub title_type: TitleType,
}

impl Title {
    /// A main title with no language tag.
    pub fn main(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
            title_type: TitleType::Main,
        }
    }
}

/// The general resource type, per the DataCite controlled list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Audiovisual,
    Collection,
    Dataset,
    Image,
    Model,
    Software,
    Sound,
    Text,
    Workflow,
    Other,
}

impl ResourceType {
    pub fn as_datacite(&self) -> &'static str {
        match self {
            ResourceType::Audiovisual => "Audiovisual",
            ResourceType::Collection => "Collection",
            ResourceType::Dataset => "Dataset",
            ResourceType::Image => "Image",
            ResourceType::Model => "Model",
            ResourceType::Software => "Software",
            ResourceType::Sound => "Sound",
            ResourceType::Text => "Text",
            ResourceType::Workflow => "Workflow",
            ResourceType::Other => "Other",
        }
    }
}

/// A license entry, identified by its SPDX-style identifier.
///
/// Order matters across a resource's licenses: the first entry is the
/// primary license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub identifier: String,
}

/// Canonical name and URL for a known license identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseInfo {
    pub name: &'static str,
    pub url: &'static str,
}

impl License {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// Resolve the identifier to its canonical name and URL, if known.
    pub fn canonical(&self) -> Option<LicenseInfo> {
        let (name, url) = match self.identifier.as_str() {
            "CC0-1.0" => (
                "Creative Commons Zero v1.0 Universal",
                "https://creativecommons.org/publicdomain/zero/1.0/legalcode",
            ),
            "CC-BY-4.0" => (
                "Creative Commons Attribution 4.0 International",
                "https://creativecommons.org/licenses/by/4.0/legalcode",
            ),
            "CC-BY-SA-4.0" => (
                "Creative Commons Attribution Share Alike 4.0 International",
                "https://creativecommons.org/licenses/by-sa/4.0/legalcode",
            ),
            "CC-BY-NC-4.0" => (
                "Creative Commons Attribution Non Commercial 4.0 International",
                "https://creativecommons.org/licenses/by-nc/4.0/legalcode",
            ),
            "CC-BY-ND-4.0" => (
                "Creative Commons Attribution No Derivatives 4.0 International",
                "https://creativecommons.org/licenses/by-nd/4.0/legalcode",
            ),
            "MIT" => ("MIT License", "https://opensource.org/licenses/MIT"),
            "Apache-2.0" => (
                "Apache License 2.0",
                "https://www.apache.org/licenses/LICENSE-2.0",
            ),
            "GPL-3.0-or-later" => (
                "GNU General Public License v3.0 or later",
                "https://www.gnu.org/licenses/gpl-3.0-standalone.html",
            ),
            _ => return None,
        };
        Some(LicenseInfo { name, url })
    }
}

/// The type tag of a free-text description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptionType {
    Abstract,
    Methods,
    TechnicalInfo,
    Other,
}

impl DescriptionType {
    pub fn as_datacite(&self) -> &'static str {
        match self {
            DescriptionType::Abstract => "Abstract",
            DescriptionType::Methods => "Methods",
            DescriptionType::TechnicalInfo => "TechnicalInfo",
            DescriptionType::Other => "Other",
        }
    }
}

/// Typed free text attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub text: String,
    pub description_type: DescriptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// The type tag of a date entry, per the DataCite controlled list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateType {
    Accepted,
    Available,
    Collected,
    Created,
    Issued,
    Submitted,
    Updated,
    Valid,
}

impl DateType {
    pub fn as_datacite(&self) -> &'static str {
        match self {
            DateType::Accepted => "Accepted",
            DateType::Available => "Available",
            DateType::Collected => "Collected",
            DateType::Created => "Created",
            DateType::Issued => "Issued",
            DateType::Submitted => "Submitted",
            DateType::Updated => "Updated",
            DateType::Valid => "Valid",
        }
    }
}

/// A single date or a from/to range.
///
/// Dates are curated ISO-8601 strings; the kernel's range notation joins
/// the endpoints with a slash and permits open ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Single(String),
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
}

impl DateValue {
    /// The kernel wire encoding: the value itself, or `from/to` with
    /// empty sides for open ranges.
    pub fn wire_value(&self) -> String {
        match self {
            DateValue::Single(value) => value.clone(),
            DateValue::Range { from, to } => format!(
                "{}/{}",
                from.as_deref().unwrap_or(""),
                to.as_deref().unwrap_or("")
            ),
        }
    }
}

/// A typed date entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub date_type: DateType,
    pub value: DateValue,
}

/// Scheme of a funder identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunderIdentifierType {
    CrossrefFunderId,
    Ror,
    Other,
}

impl FunderIdentifierType {
    pub fn as_datacite(&self) -> &'static str {
        match self {
            FunderIdentifierType::CrossrefFunderId => "Crossref Funder ID",
            FunderIdentifierType::Ror => "ROR",
            FunderIdentifierType::Other => "Other",
        }
    }
}

/// A funding reference: funder plus optional award details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingReference {
    pub funder_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funder_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funder_identifier_type: Option<FunderIdentifierType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award_title: Option<String>,
}

/// Controlled relation between this resource and an external identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationType {
    IsSupplementTo,
    IsSupplementedBy,
    Cites,
    IsCitedBy,
    IsNewVersionOf,
    IsPreviousVersionOf,
    IsPartOf,
    HasPart,
    IsDerivedFrom,
    IsSourceOf,
    IsDocumentedBy,
    Documents,
}

impl RelationType {
    pub fn as_datacite(&self) -> &'static str {
        match self {
            RelationType::IsSupplementTo => "IsSupplementTo",
            RelationType::IsSupplementedBy => "IsSupplementedBy",
            RelationType::Cites => "Cites",
            RelationType::IsCitedBy => "IsCitedBy",
            RelationType::IsNewVersionOf => "IsNewVersionOf",
            RelationType::IsPreviousVersionOf => "IsPreviousVersionOf",
            RelationType::IsPartOf => "IsPartOf",
            RelationType::HasPart => "HasPart",
            RelationType::IsDerivedFrom => "IsDerivedFrom",
            RelationType::IsSourceOf => "IsSourceOf",
            RelationType::IsDocumentedBy => "IsDocumentedBy",
            RelationType::Documents => "Documents",
        }
    }
}

/// Type of a related identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelatedIdentifierType {
    Doi,
    Url,
    Handle,
    Isbn,
    Urn,
}

impl RelatedIdentifierType {
    pub fn as_datacite(&self) -> &'static str {
        match self {
            RelatedIdentifierType::Doi => "DOI",
            RelatedIdentifierType::Url => "URL",
            RelatedIdentifierType::Handle => "Handle",
            RelatedIdentifierType::Isbn => "ISBN",
            RelatedIdentifierType::Urn => "URN",
        }
    }
}

/// An external identifier related to this resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedIdentifier {
    pub identifier: String,
    pub identifier_type: RelatedIdentifierType,
    pub relation_type: RelationType,
}

/// A geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A geographic bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub west_longitude: f64,
    pub east_longitude: f64,
    pub south_latitude: f64,
    pub north_latitude: f64,
}

/// Spatial coverage of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<GeoPoint>,
    #[serde(default, rename = "box", skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<GeoBox>,
}

/// The controlled vocabulary a keyword is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectScheme {
    /// Dewey Decimal Classification.
    Ddc,
    /// Gemeinsame Normdatei (Integrated Authority File).
    Gnd,
    /// Free-text keyword, no scheme.
    Free,
}

impl SubjectScheme {
    pub fn scheme_name(&self) -> Option<&'static str> {
        match self {
            SubjectScheme::Ddc => Some("DDC"),
            SubjectScheme::Gnd => Some("GND"),
            SubjectScheme::Free => None,
        }
    }

    pub fn scheme_uri(&self) -> Option<&'static str> {
        match self {
            SubjectScheme::Ddc => Some("https://dewey.info/"),
            SubjectScheme::Gnd => Some("https://d-nb.info/gnd/"),
            SubjectScheme::Free => None,
        }
    }
}

/// A controlled-vocabulary keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub term: String,
    pub scheme: SubjectScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_uri: Option<String>,
}

/// The published, human-readable page describing a resource.
///
/// A published landing page is a precondition for DOI minting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingPage {
    pub url: String,
    pub published: bool,
}

/// The aggregate root: one metadata record with all child collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    /// Present once registered; transitions from `None` exactly once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<Doi>,
    /// Required before any export; validation addresses its absence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub resource_type: ResourceType,
    /// Free-text refinement of the general type (e.g. "Census Data").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub titles: Vec<Title>,
    #[serde(default)]
    pub parties: Vec<PartyAssignment>,
    #[serde(default)]
    pub licenses: Vec<License>,
    #[serde(default)]
    pub descriptions: Vec<Description>,
    #[serde(default)]
    pub dates: Vec<DateEntry>,
    #[serde(default)]
    pub funding_references: Vec<FundingReference>,
    #[serde(default)]
    pub related_identifiers: Vec<RelatedIdentifier>,
    #[serde(default)]
    pub geo_locations: Vec<GeoLocation>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<LandingPage>,
}

impl Resource {
    /// Whether a DOI has been minted for this resource.
    pub fn is_registered(&self) -> bool {
        self.doi.is_some()
    }

    /// The main title, if the curation workflow has set one.
    pub fn main_title(&self) -> Option<&Title> {
        self.titles
            .iter()
            .find(|t| t.title_type == TitleType::Main)
    }

    /// Whether the resource has a published landing page.
    pub fn has_published_landing_page(&self) -> bool {
        self.landing_page.as_ref().is_some_and(|lp| lp.published)
    }

    /// Write back the minted DOI after successful registration.
    ///
    /// The identifier transitions from `None` to a concrete value exactly
    /// once; registration is not retractable.
    pub fn assign_doi(&mut self, doi: Doi) -> Result<(), CoreError> {
        if let Some(existing) = &self.doi {
            return Err(CoreError::AlreadyRegistered {
                existing: existing.clone(),
            });
        }
        self.doi = Some(doi);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::{Party, PartyRole};

    fn minimal_resource() -> Resource {
        Resource {
            id: ResourceId::new(),
            doi: None,
            publication_year: Some(2026),
            version: None,
            resource_type: ResourceType::Dataset,
            resource_type_text: None,
            language: Some("en".into()),
            titles: vec![Title::main("Test Dataset")],
            parties: vec![PartyAssignment::new(
                Party::Person {
                    given_name: "John".into(),
                    family_name: "Doe".into(),
                    orcid: None,
                },
                vec![PartyRole::Author],
            )],
            licenses: vec![License::new("CC-BY-4.0")],
            descriptions: vec![],
            dates: vec![],
            funding_references: vec![],
            related_identifiers: vec![],
            geo_locations: vec![],
            subjects: vec![],
            landing_page: None,
        }
    }

    #[test]
    fn assign_doi_transitions_once() {
        let mut resource = minimal_resource();
        assert!(!resource.is_registered());
        resource
            .assign_doi(Doi::parse("10.5072/first").unwrap())
            .unwrap();
        assert!(resource.is_registered());
    }

    #[test]
    fn assign_doi_rejects_second_registration() {
        let mut resource = minimal_resource();
        resource
            .assign_doi(Doi::parse("10.5072/first").unwrap())
            .unwrap();
        let err = resource
            .assign_doi(Doi::parse("10.5072/second").unwrap())
            .unwrap_err();
        assert!(matches!(err, CoreError::AlreadyRegistered { .. }));
        assert_eq!(resource.doi.unwrap().as_str(), "10.5072/first");
    }

    #[test]
    fn main_title_is_found_among_others() {
        let mut resource = minimal_resource();
        resource.titles.insert(
            0,
            Title {
                text: "Untertitel".into(),
                lang: Some("de".into()),
                title_type: TitleType::Subtitle,
            },
        );
        assert_eq!(resource.main_title().unwrap().text, "Test Dataset");
    }

    #[test]
    fn landing_page_must_be_published() {
        let mut resource = minimal_resource();
        assert!(!resource.has_published_landing_page());
        resource.landing_page = Some(LandingPage {
            url: "https://data.example.org/r/1".into(),
            published: false,
        });
        assert!(!resource.has_published_landing_page());
        resource.landing_page.as_mut().unwrap().published = true;
        assert!(resource.has_published_landing_page());
    }

    #[test]
    fn known_license_resolves_to_canonical_info() {
        let info = License::new("CC-BY-4.0").canonical().unwrap();
        assert_eq!(info.name, "Creative Commons Attribution 4.0 International");
        assert!(info.url.contains("creativecommons.org"));
    }

    #[test]
    fn unknown_license_has_no_canonical_info() {
        assert!(License::new("Proprietary-EULA").canonical().is_none());
    }

    #[test]
    fn date_range_wire_value_joins_with_slash() {
        let range = DateValue::Range {
            from: Some("2025-01-01".into()),
            to: Some("2025-06-30".into()),
        };
        assert_eq!(range.wire_value(), "2025-01-01/2025-06-30");

        let open = DateValue::Range {
            from: Some("2025-01-01".into()),
            to: None,
        };
        assert_eq!(open.wire_value(), "2025-01-01/");
    }

    #[test]
    fn resource_roundtrips_through_serde() {
        let resource = minimal_resource();
        let json = serde_json::to_string(&resource).unwrap();
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(resource, back);
    }
}
