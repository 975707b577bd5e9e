//! # XML Projection
//!
//! Maps the aggregate into the DataCite kernel-4 XML document. Elements
//! are emitted in the order the kernel XSD defines: identifier,
//! creators, titles, publisher, publicationYear, resourceType, subjects,
//! contributors, dates, language, relatedIdentifiers, version,
//! rightsList, descriptions, geoLocations, fundingReferences.
//!
//! Like the JSON projection this is total: a resource without a DOI gets
//! an empty identifier element, missing optional collections are simply
//! omitted. The kernel contract check in `datapub-schema` owns
//! rejection.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use datapub_core::party::{partition_parties, Party};
use datapub_core::resource::Resource;

use crate::error::ExportError;

/// The fixed namespace of the kernel-4 wire format.
pub const KERNEL_NAMESPACE: &str = "http://datacite.org/schema/kernel-4";

const SCHEMA_LOCATION: &str =
    "http://datacite.org/schema/kernel-4 http://schema.datacite.org/meta/kernel-4.6/metadata.xsd";

type Xml = Writer<Vec<u8>>;

/// Project the aggregate into the kernel-4.6 XML document.
pub fn project_xml(resource: &Resource) -> Result<String, ExportError> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    wr(w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None))))?;

    let mut root = BytesStart::new("resource");
    root.push_attribute(("xmlns", KERNEL_NAMESPACE));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    wr(w.write_event(Event::Start(root)))?;

    // identifier -- legitimately empty before minting.
    match &resource.doi {
        Some(doi) => text_el(&mut w, "identifier", &[("identifierType", "DOI")], doi.as_str())?,
        None => empty_el(&mut w, "identifier", &[("identifierType", "DOI")])?,
    }

    let split = partition_parties(&resource.parties);

    start_el(&mut w, "creators")?;
    for party in &split.creators {
        party_el(&mut w, "creator", "creatorName", party, None)?;
    }
    end_el(&mut w, "creators")?;

    start_el(&mut w, "titles")?;
    for title in &resource.titles {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(title_type) = title.title_type.datacite_name() {
            attrs.push(("titleType", title_type));
        }
        if let Some(lang) = &title.lang {
            attrs.push(("xml:lang", lang.as_str()));
        }
        text_el(&mut w, "title", &attrs, &title.text)?;
    }
    end_el(&mut w, "titles")?;

    text_el(&mut w, "publisher", &[], crate::json::PUBLISHER)?;

    if let Some(year) = resource.publication_year {
        text_el(&mut w, "publicationYear", &[], &year.to_string())?;
    }

    let type_general = resource.resource_type.as_datacite();
    match &resource.resource_type_text {
        Some(text) => text_el(
            &mut w,
            "resourceType",
            &[("resourceTypeGeneral", type_general)],
            text,
        )?,
        None => empty_el(&mut w, "resourceType", &[("resourceTypeGeneral", type_general)])?,
    }

    if !resource.subjects.is_empty() {
        start_el(&mut w, "subjects")?;
        for subject in &resource.subjects {
            let mut attrs: Vec<(&str, &str)> = Vec::new();
            if let Some(scheme) = subject.scheme.scheme_name() {
                attrs.push(("subjectScheme", scheme));
            }
            if let Some(uri) = subject.scheme.scheme_uri() {
                attrs.push(("schemeURI", uri));
            }
            if let Some(uri) = &subject.value_uri {
                attrs.push(("valueURI", uri.as_str()));
            }
            text_el(&mut w, "subject", &attrs, &subject.term)?;
        }
        end_el(&mut w, "subjects")?;
    }

    if !split.contributors.is_empty() {
        start_el(&mut w, "contributors")?;
        for (party, role) in &split.contributors {
            party_el(
                &mut w,
                "contributor",
                "contributorName",
                party,
                role.contributor_type(),
            )?;
        }
        end_el(&mut w, "contributors")?;
    }

    if !resource.dates.is_empty() {
        start_el(&mut w, "dates")?;
        for date in &resource.dates {
            text_el(
                &mut w,
                "date",
                &[("dateType", date.date_type.as_datacite())],
                &date.value.wire_value(),
            )?;
        }
        end_el(&mut w, "dates")?;
    }

    if let Some(language) = &resource.language {
        text_el(&mut w, "language", &[], language)?;
    }

    if !resource.related_identifiers.is_empty() {
        start_el(&mut w, "relatedIdentifiers")?;
        for related in &resource.related_identifiers {
            text_el(
                &mut w,
                "relatedIdentifier",
                &[
                    ("relatedIdentifierType", related.identifier_type.as_datacite()),
                    ("relationType", related.relation_type.as_datacite()),
                ],
                &related.identifier,
            )?;
        }
        end_el(&mut w, "relatedIdentifiers")?;
    }

    if let Some(version) = &resource.version {
        text_el(&mut w, "version", &[], version)?;
    }

    if !resource.licenses.is_empty() {
        start_el(&mut w, "rightsList")?;
        for license in &resource.licenses {
            let mut attrs: Vec<(&str, &str)> = vec![
                ("rightsIdentifier", license.identifier.as_str()),
                ("rightsIdentifierScheme", "SPDX"),
            ];
            let rights_text = match license.canonical() {
                Some(info) => {
                    attrs.push(("rightsURI", info.url));
                    info.name
                }
                None => license.identifier.as_str(),
            };
            text_el(&mut w, "rights", &attrs, rights_text)?;
        }
        end_el(&mut w, "rightsList")?;
    }

    if !resource.descriptions.is_empty() {
        start_el(&mut w, "descriptions")?;
        for description in &resource.descriptions {
            let mut attrs: Vec<(&str, &str)> = vec![(
                "descriptionType",
                description.description_type.as_datacite(),
            )];
            if let Some(lang) = &description.lang {
                attrs.push(("xml:lang", lang.as_str()));
            }
            text_el(&mut w, "description", &attrs, &description.text)?;
        }
        end_el(&mut w, "descriptions")?;
    }

    if !resource.geo_locations.is_empty() {
        start_el(&mut w, "geoLocations")?;
        for geo in &resource.geo_locations {
            start_el(&mut w, "geoLocation")?;
            if let Some(place) = &geo.place {
                text_el(&mut w, "geoLocationPlace", &[], place)?;
            }
            if let Some(point) = &geo.point {
                start_el(&mut w, "geoLocationPoint")?;
                text_el(&mut w, "pointLatitude", &[], &point.latitude.to_string())?;
                text_el(&mut w, "pointLongitude", &[], &point.longitude.to_string())?;
                end_el(&mut w, "geoLocationPoint")?;
            }
            if let Some(bounding) = &geo.bounding_box {
                start_el(&mut w, "geoLocationBox")?;
                text_el(&mut w, "westBoundLongitude", &[], &bounding.west_longitude.to_string())?;
                text_el(&mut w, "eastBoundLongitude", &[], &bounding.east_longitude.to_string())?;
                text_el(&mut w, "southBoundLatitude", &[], &bounding.south_latitude.to_string())?;
                text_el(&mut w, "northBoundLatitude", &[], &bounding.north_latitude.to_string())?;
                end_el(&mut w, "geoLocationBox")?;
            }
            end_el(&mut w, "geoLocation")?;
        }
        end_el(&mut w, "geoLocations")?;
    }

    if !resource.funding_references.is_empty() {
        start_el(&mut w, "fundingReferences")?;
        for funding in &resource.funding_references {
            start_el(&mut w, "fundingReference")?;
            text_el(&mut w, "funderName", &[], &funding.funder_name)?;
            if let Some(identifier) = &funding.funder_identifier {
                let mut attrs: Vec<(&str, &str)> = Vec::new();
                if let Some(id_type) = &funding.funder_identifier_type {
                    attrs.push(("funderIdentifierType", id_type.as_datacite()));
                }
                text_el(&mut w, "funderIdentifier", &attrs, identifier)?;
            }
            if let Some(number) = &funding.award_number {
                text_el(&mut w, "awardNumber", &[], number)?;
            }
            if let Some(title) = &funding.award_title {
                text_el(&mut w, "awardTitle", &[], title)?;
            }
            end_el(&mut w, "fundingReference")?;
        }
        end_el(&mut w, "fundingReferences")?;
    }

    wr(w.write_event(Event::End(BytesEnd::new("resource"))))?;

    String::from_utf8(w.into_inner()).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Emit a creator or contributor element with its name parts and any
/// name identifier.
fn party_el(
    w: &mut Xml,
    element: &str,
    name_element: &str,
    party: &Party,
    contributor_type: Option<&str>,
) -> Result<(), ExportError> {
    let mut start = BytesStart::new(element);
    if let Some(contributor_type) = contributor_type {
        start.push_attribute(("contributorType", contributor_type));
    }
    wr(w.write_event(Event::Start(start)))?;

    text_el(
        w,
        name_element,
        &[("nameType", party.name_type())],
        &party.display_name(),
    )?;

    match party {
        Party::Person {
            given_name,
            family_name,
            orcid,
        } => {
            text_el(w, "givenName", &[], given_name)?;
            text_el(w, "familyName", &[], family_name)?;
            if let Some(orcid) = orcid {
                text_el(
                    w,
                    "nameIdentifier",
                    &[
                        ("nameIdentifierScheme", "ORCID"),
                        ("schemeURI", "https://orcid.org"),
                    ],
                    orcid,
                )?;
            }
        }
        Party::Institution { ror, .. } => {
            if let Some(ror) = ror {
                text_el(
                    w,
                    "nameIdentifier",
                    &[("nameIdentifierScheme", "ROR"), ("schemeURI", "https://ror.org")],
                    ror,
                )?;
            }
        }
    }

    wr(w.write_event(Event::End(BytesEnd::new(element))))
}

fn start_el(w: &mut Xml, name: &str) -> Result<(), ExportError> {
    wr(w.write_event(Event::Start(BytesStart::new(name))))
}

fn end_el(w: &mut Xml, name: &str) -> Result<(), ExportError> {
    wr(w.write_event(Event::End(BytesEnd::new(name))))
}

fn text_el(w: &mut Xml, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), ExportError> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        start.push_attribute((*key, *value));
    }
    wr(w.write_event(Event::Start(start)))?;
    wr(w.write_event(Event::Text(BytesText::new(text))))?;
    wr(w.write_event(Event::End(BytesEnd::new(name))))
}

fn empty_el(w: &mut Xml, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        start.push_attribute((*key, *value));
    }
    wr(w.write_event(Event::Empty(start)))
}

/// Writing into a `Vec` cannot fail for well-formed events; the error
/// type is still reduced here so no writer error escapes untyped.
fn wr<T, E: std::fmt::Display>(result: Result<T, E>) -> Result<(), ExportError> {
    result
        .map(|_| ())
        .map_err(|e| ExportError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use datapub_core::party::{PartyAssignment, PartyRole};
    use datapub_core::resource::{License, ResourceType, Title};
    use datapub_core::{Doi, ResourceId};

    fn example_resource() -> Resource {
        Resource {
            id: ResourceId::new(),
            doi: Some(Doi::parse("10.5072/test-1").unwrap()),
            publication_year: Some(2026),
            version: Some("1.2.0".into()),
            resource_type: ResourceType::Dataset,
            resource_type_text: Some("Census Data".into()),
            language: Some("en".into()),
            titles: vec![Title::main("Test Dataset")],
            parties: vec![
                PartyAssignment::new(
                    Party::Person {
                        given_name: "John".into(),
                        family_name: "Doe".into(),
                        orcid: None,
                    },
                    vec![PartyRole::Author],
                ),
                PartyAssignment::new(
                    Party::Institution {
                        name: "Example University".into(),
                        ror: None,
                    },
                    vec![PartyRole::DataCollector],
                ),
            ],
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
    fn root_element_carries_kernel_namespace() {
        let xml = project_xml(&example_resource()).unwrap();
        assert!(xml.contains(r#"xmlns="http://datacite.org/schema/kernel-4""#));
        assert!(xml.contains("kernel-4.6/metadata.xsd"));
    }

    #[test]
    fn elements_appear_in_kernel_order() {
        let xml = project_xml(&example_resource()).unwrap();
        let markers = [
            "<identifier",
            "<creators>",
            "<titles>",
            "<publisher>",
            "<publicationYear>",
            "<resourceType ",
            "<contributors>",
            "<language>",
            "<version>",
            "<rightsList>",
        ];
        let positions: Vec<usize> = markers
            .iter()
            .map(|m| xml.find(m).unwrap_or_else(|| panic!("missing {m}")))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "kernel element order violated:\n{xml}");
    }

    #[test]
    fn unregistered_resource_gets_empty_identifier() {
        let mut resource = example_resource();
        resource.doi = None;
        let xml = project_xml(&resource).unwrap();
        assert!(xml.contains(r#"<identifier identifierType="DOI"/>"#));
    }

    #[test]
    fn registered_resource_carries_its_doi() {
        let xml = project_xml(&example_resource()).unwrap();
        assert!(xml.contains(r#"<identifier identifierType="DOI">10.5072/test-1</identifier>"#));
    }

    #[test]
    fn contributor_is_tagged_with_role() {
        let xml = project_xml(&example_resource()).unwrap();
        assert!(xml.contains(r#"<contributor contributorType="DataCollector">"#));
        assert!(xml.contains(r#"<contributorName nameType="Organizational">Example University</contributorName>"#));
        // The author never shows up among the contributors.
        assert!(!xml.contains(r#"contributorType="ContactPerson""#));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut resource = example_resource();
        resource.titles = vec![Title::main("Salt & Water <Dataset>")];
        let xml = project_xml(&resource).unwrap();
        assert!(xml.contains("Salt &amp; Water &lt;Dataset&gt;"));
    }

    #[test]
    fn projection_is_deterministic() {
        let resource = example_resource();
        assert_eq!(
            project_xml(&resource).unwrap(),
            project_xml(&resource).unwrap()
        );
    }
}
