//! # JSON Projection
//!
//! Maps the aggregate into the DataCite REST API document shape:
//! `{ "data": { "type": "dois", "attributes": { ... } } }`.
//!
//! The projection is total: whatever the aggregate looks like, a
//! document comes out. Mandatory-field enforcement is the validator's
//! job. Absent optional data yields absent keys, never `null`.

use serde_json::{json, Map, Value};

use datapub_core::party::{partition_parties, Party, PartyRole};
use datapub_core::resource::Resource;
use datapub_schema::{SchemaValidator, ValidationReport};

use crate::error::ExportError;

/// The fixed publisher string carried by every exported resource.
pub const PUBLISHER: &str = "Open Research Data Repository";

/// Project the aggregate into the DataCite JSON document.
pub fn project_json(resource: &Resource) -> Value {
    let mut attributes = Map::new();

    if let Some(doi) = &resource.doi {
        attributes.insert("doi".into(), json!(doi.as_str()));
    }

    attributes.insert(
        "titles".into(),
        Value::Array(resource.titles.iter().map(title_json).collect()),
    );

    let split = partition_parties(&resource.parties);
    attributes.insert(
        "creators".into(),
        Value::Array(split.creators.iter().map(|p| party_json(p)).collect()),
    );
    if !split.contributors.is_empty() {
        attributes.insert(
            "contributors".into(),
            Value::Array(
                split
                    .contributors
                    .iter()
                    .map(|(party, role)| contributor_json(party, *role))
                    .collect(),
            ),
        );
    }

    attributes.insert("publisher".into(), json!(PUBLISHER));

    if let Some(year) = resource.publication_year {
        attributes.insert("publicationYear".into(), json!(year));
    }

    let mut types = Map::new();
    types.insert(
        "resourceTypeGeneral".into(),
        json!(resource.resource_type.as_datacite()),
    );
    if let Some(text) = &resource.resource_type_text {
        types.insert("resourceType".into(), json!(text));
    }
    attributes.insert("types".into(), Value::Object(types));

    if !resource.subjects.is_empty() {
        attributes.insert(
            "subjects".into(),
            Value::Array(
                resource
                    .subjects
                    .iter()
                    .map(|s| {
                        let mut subject = Map::new();
                        subject.insert("subject".into(), json!(s.term));
                        if let Some(scheme) = s.scheme.scheme_name() {
                            subject.insert("subjectScheme".into(), json!(scheme));
                        }
                        if let Some(uri) = s.scheme.scheme_uri() {
                            subject.insert("schemeUri".into(), json!(uri));
                        }
                        if let Some(uri) = &s.value_uri {
                            subject.insert("valueUri".into(), json!(uri));
                        }
                        Value::Object(subject)
                    })
                    .collect(),
            ),
        );
    }

    if !resource.dates.is_empty() {
        attributes.insert(
            "dates".into(),
            Value::Array(
                resource
                    .dates
                    .iter()
                    .map(|d| {
                        json!({
                            "date": d.value.wire_value(),
                            "dateType": d.date_type.as_datacite(),
                        })
                    })
                    .collect(),
            ),
        );
    }

    if let Some(language) = &resource.language {
        attributes.insert("language".into(), json!(language));
    }

    if !resource.related_identifiers.is_empty() {
        attributes.insert(
            "relatedIdentifiers".into(),
            Value::Array(
                resource
                    .related_identifiers
                    .iter()
                    .map(|r| {
                        json!({
                            "relatedIdentifier": r.identifier,
                            "relatedIdentifierType": r.identifier_type.as_datacite(),
                            "relationType": r.relation_type.as_datacite(),
                        })
                    })
                    .collect(),
            ),
        );
    }

    if let Some(version) = &resource.version {
        attributes.insert("version".into(), json!(version));
    }

    if !resource.licenses.is_empty() {
        attributes.insert(
            "rightsList".into(),
            Value::Array(
                resource
                    .licenses
                    .iter()
                    .map(|license| {
                        let mut rights = Map::new();
                        match license.canonical() {
                            Some(info) => {
                                rights.insert("rights".into(), json!(info.name));
                                rights.insert("rightsUri".into(), json!(info.url));
                            }
                            None => {
                                rights.insert("rights".into(), json!(license.identifier));
                            }
                        }
                        rights.insert("rightsIdentifier".into(), json!(license.identifier));
                        rights.insert("rightsIdentifierScheme".into(), json!("SPDX"));
                        Value::Object(rights)
                    })
                    .collect(),
            ),
        );
    }

    if !resource.descriptions.is_empty() {
        attributes.insert(
            "descriptions".into(),
            Value::Array(
                resource
                    .descriptions
                    .iter()
                    .map(|d| {
                        let mut description = Map::new();
                        description.insert("description".into(), json!(d.text));
                        description.insert(
                            "descriptionType".into(),
                            json!(d.description_type.as_datacite()),
                        );
                        if let Some(lang) = &d.lang {
                            description.insert("lang".into(), json!(lang));
                        }
                        Value::Object(description)
                    })
                    .collect(),
            ),
        );
    }

    if !resource.geo_locations.is_empty() {
        attributes.insert(
            "geoLocations".into(),
            Value::Array(
                resource
                    .geo_locations
                    .iter()
                    .map(|g| {
                        let mut geo = Map::new();
                        if let Some(place) = &g.place {
                            geo.insert("geoLocationPlace".into(), json!(place));
                        }
                        if let Some(point) = &g.point {
                            geo.insert(
                                "geoLocationPoint".into(),
                                json!({
                                    "pointLatitude": point.latitude,
                                    "pointLongitude": point.longitude,
                                }),
                            );
                        }
                        if let Some(b) = &g.bounding_box {
                            geo.insert(
                                "geoLocationBox".into(),
                                json!({
                                    "westBoundLongitude": b.west_longitude,
                                    "eastBoundLongitude": b.east_longitude,
                                    "southBoundLatitude": b.south_latitude,
                                    "northBoundLatitude": b.north_latitude,
                                }),
                            );
                        }
                        Value::Object(geo)
                    })
                    .collect(),
            ),
        );
    }

    if !resource.funding_references.is_empty() {
        attributes.insert(
            "fundingReferences".into(),
            Value::Array(
                resource
                    .funding_references
                    .iter()
                    .map(|f| {
                        let mut funding = Map::new();
                        funding.insert("funderName".into(), json!(f.funder_name));
                        if let Some(id) = &f.funder_identifier {
                            funding.insert("funderIdentifier".into(), json!(id));
                        }
                        if let Some(id_type) = &f.funder_identifier_type {
                            funding.insert(
                                "funderIdentifierType".into(),
                                json!(id_type.as_datacite()),
                            );
                        }
                        if let Some(number) = &f.award_number {
                            funding.insert("awardNumber".into(), json!(number));
                        }
                        if let Some(title) = &f.award_title {
                            funding.insert("awardTitle".into(), json!(title));
                        }
                        Value::Object(funding)
                    })
                    .collect(),
            ),
        );
    }

    json!({
        "data": {
            "type": "dois",
            "attributes": Value::Object(attributes),
        }
    })
}

fn title_json(title: &datapub_core::resource::Title) -> Value {
    let mut out = Map::new();
    out.insert("title".into(), json!(title.text));
    if let Some(name) = title.title_type.datacite_name() {
        out.insert("titleType".into(), json!(name));
    }
    if let Some(lang) = &title.lang {
        out.insert("lang".into(), json!(lang));
    }
    Value::Object(out)
}

/// Serialize a party in creator shape: name, nameType, person name parts
/// and any name identifiers.
fn party_json(party: &Party) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), json!(party.display_name()));
    out.insert("nameType".into(), json!(party.name_type()));

    match party {
        Party::Person {
            given_name,
            family_name,
            orcid,
        } => {
            out.insert("givenName".into(), json!(given_name));
            out.insert("familyName".into(), json!(family_name));
            if let Some(orcid) = orcid {
                out.insert(
                    "nameIdentifiers".into(),
                    json!([{
                        "nameIdentifier": orcid_uri(orcid),
                        "nameIdentifierScheme": "ORCID",
                        "schemeUri": "https://orcid.org",
                    }]),
                );
            }
        }
        Party::Institution { ror, .. } => {
            if let Some(ror) = ror {
                out.insert(
                    "nameIdentifiers".into(),
                    json!([{
                        "nameIdentifier": ror,
                        "nameIdentifierScheme": "ROR",
                        "schemeUri": "https://ror.org",
                    }]),
                );
            }
        }
    }

    Value::Object(out)
}

/// A contributor is a creator plus the `contributorType` tag.
fn contributor_json(party: &Party, role: PartyRole) -> Value {
    let mut out = party_json(party);
    if let (Some(map), Some(contributor_type)) =
        (out.as_object_mut(), role.contributor_type())
    {
        map.insert("contributorType".into(), json!(contributor_type));
    }
    out
}

/// ORCID iDs are curated either bare or as resolver URLs; the wire
/// format always carries the URL form.
fn orcid_uri(orcid: &str) -> String {
    if orcid.starts_with("http://") || orcid.starts_with("https://") {
        orcid.to_string()
    } else {
        format!("https://orcid.org/{orcid}")
    }
}

/// Build the registration request body for the registry client.
///
/// The plain export document is validated first — the registry never
/// sees an invalid payload — and then augmented with the registry-only
/// attributes: the DOI `prefix` for minting, the landing-page `url`, and
/// `event: "publish"`.
pub fn registration_document(
    resource: &Resource,
    validator: &SchemaValidator,
    prefix: Option<&str>,
) -> Result<Value, ExportError> {
    let mut document = project_json(resource);

    let issues = validator.validate_export(&document);
    if !issues.is_empty() {
        return Err(ExportError::SchemaValidation(ValidationReport::json_failure(
            issues,
        )));
    }

    let Some(attributes) = document
        .get_mut("data")
        .and_then(|data| data.get_mut("attributes"))
        .and_then(Value::as_object_mut)
    else {
        return Err(ExportError::Serialization(
            "projected document lost its attributes object".to_string(),
        ));
    };

    if let Some(prefix) = prefix {
        attributes.insert("prefix".into(), json!(prefix));
    }
    if let Some(landing_page) = &resource.landing_page {
        attributes.insert("url".into(), json!(landing_page.url));
    }
    attributes.insert("event".into(), json!("publish"));

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datapub_core::party::PartyAssignment;
    use datapub_core::resource::{
        DateEntry, DateType, DateValue, LandingPage, License, ResourceType, Title,
    };
    use datapub_core::ResourceId;

    fn person(given: &str, family: &str, roles: Vec<PartyRole>) -> PartyAssignment {
        PartyAssignment::new(
            Party::Person {
                given_name: given.into(),
                family_name: family.into(),
                orcid: None,
            },
            roles,
        )
    }

    fn example_resource() -> Resource {
        Resource {
            id: ResourceId::new(),
            doi: None,
            publication_year: Some(2026),
            version: None,
            resource_type: ResourceType::Dataset,
            resource_type_text: None,
            language: None,
            titles: vec![Title::main("Test Dataset")],
            parties: vec![person("John", "Doe", vec![PartyRole::Author])],
            licenses: vec![],
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
    fn example_scenario_projects_expected_creators() {
        let doc = project_json(&example_resource());
        assert_eq!(doc["data"]["type"], "dois");
        assert_eq!(doc["data"]["attributes"]["creators"][0]["name"], "Doe, John");
        assert_eq!(
            doc["data"]["attributes"]["creators"][0]["nameType"],
            "Personal"
        );
        assert_eq!(doc["data"]["attributes"]["publisher"], PUBLISHER);
        assert_eq!(doc["data"]["attributes"]["publicationYear"], 2026);
        assert_eq!(
            doc["data"]["attributes"]["types"]["resourceTypeGeneral"],
            "Dataset"
        );
    }

    #[test]
    fn author_with_contact_role_appears_only_in_creators() {
        let mut resource = example_resource();
        resource.parties = vec![person(
            "John",
            "Doe",
            vec![PartyRole::Author, PartyRole::ContactPerson],
        )];
        let doc = project_json(&resource);
        let attributes = &doc["data"]["attributes"];
        assert_eq!(attributes["creators"].as_array().unwrap().len(), 1);
        assert!(attributes.get("contributors").is_none());
    }

    #[test]
    fn data_collector_appears_only_in_contributors() {
        let mut resource = example_resource();
        resource.parties.push(person(
            "Jane",
            "Roe",
            vec![PartyRole::DataCollector],
        ));
        let doc = project_json(&resource);
        let attributes = &doc["data"]["attributes"];
        assert_eq!(attributes["creators"].as_array().unwrap().len(), 1);
        let contributors = attributes["contributors"].as_array().unwrap();
        assert_eq!(contributors.len(), 1);
        assert_eq!(contributors[0]["name"], "Roe, Jane");
        assert_eq!(contributors[0]["contributorType"], "DataCollector");
    }

    #[test]
    fn orcid_is_normalized_to_resolver_url() {
        let mut resource = example_resource();
        resource.parties = vec![PartyAssignment::new(
            Party::Person {
                given_name: "John".into(),
                family_name: "Doe".into(),
                orcid: Some("0000-0001-2345-6789".into()),
            },
            vec![PartyRole::Author],
        )];
        let doc = project_json(&resource);
        assert_eq!(
            doc["data"]["attributes"]["creators"][0]["nameIdentifiers"][0]["nameIdentifier"],
            "https://orcid.org/0000-0001-2345-6789"
        );
        assert_eq!(
            doc["data"]["attributes"]["creators"][0]["nameIdentifiers"][0]
                ["nameIdentifierScheme"],
            "ORCID"
        );
    }

    #[test]
    fn known_license_projects_canonical_rights() {
        let mut resource = example_resource();
        resource.licenses = vec![License::new("CC-BY-4.0")];
        let doc = project_json(&resource);
        let rights = &doc["data"]["attributes"]["rightsList"][0];
        assert_eq!(rights["rights"], "Creative Commons Attribution 4.0 International");
        assert_eq!(rights["rightsIdentifier"], "CC-BY-4.0");
        assert_eq!(rights["rightsIdentifierScheme"], "SPDX");
    }

    #[test]
    fn date_range_projects_slash_notation() {
        let mut resource = example_resource();
        resource.dates = vec![DateEntry {
            date_type: DateType::Collected,
            value: DateValue::Range {
                from: Some("2025-01-01".into()),
                to: Some("2025-06-30".into()),
            },
        }];
        let doc = project_json(&resource);
        assert_eq!(
            doc["data"]["attributes"]["dates"][0]["date"],
            "2025-01-01/2025-06-30"
        );
        assert_eq!(doc["data"]["attributes"]["dates"][0]["dateType"], "Collected");
    }

    #[test]
    fn absent_optional_data_yields_absent_keys() {
        let doc = project_json(&example_resource());
        let attributes = doc["data"]["attributes"].as_object().unwrap();
        for key in [
            "doi",
            "contributors",
            "subjects",
            "dates",
            "language",
            "relatedIdentifiers",
            "version",
            "rightsList",
            "descriptions",
            "geoLocations",
            "fundingReferences",
        ] {
            assert!(!attributes.contains_key(key), "unexpected key: {key}");
        }
    }

    #[test]
    fn projection_is_total_over_empty_aggregate() {
        let mut resource = example_resource();
        resource.titles.clear();
        resource.parties.clear();
        resource.publication_year = None;
        // Must not panic or reject; the validator owns rejection.
        let doc = project_json(&resource);
        assert_eq!(doc["data"]["attributes"]["titles"], json!([]));
        assert_eq!(doc["data"]["attributes"]["creators"], json!([]));
    }

    #[test]
    fn projection_is_deterministic() {
        let resource = example_resource();
        let first = serde_json::to_vec(&project_json(&resource)).unwrap();
        let second = serde_json::to_vec(&project_json(&resource)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn registration_document_adds_registry_attributes() {
        let mut resource = example_resource();
        resource.landing_page = Some(LandingPage {
            url: "https://data.example.org/r/1".into(),
            published: true,
        });
        let validator = SchemaValidator::new().unwrap();
        let doc = registration_document(&resource, &validator, Some("10.5072")).unwrap();
        assert_eq!(doc["data"]["attributes"]["prefix"], "10.5072");
        assert_eq!(doc["data"]["attributes"]["url"], "https://data.example.org/r/1");
        assert_eq!(doc["data"]["attributes"]["event"], "publish");
    }

    #[test]
    fn registration_document_refuses_invalid_resource() {
        let mut resource = example_resource();
        resource.publication_year = None;
        let validator = SchemaValidator::new().unwrap();
        let err = registration_document(&resource, &validator, Some("10.5072")).unwrap_err();
        match err {
            ExportError::SchemaValidation(report) => {
                assert_eq!(report.schema_version, "4.6");
                assert!(report
                    .errors
                    .iter()
                    .any(|e| e.path == "/data/attributes/publicationYear"));
            }
            other => panic!("expected SchemaValidation, got: {other}"),
        }
    }
}
