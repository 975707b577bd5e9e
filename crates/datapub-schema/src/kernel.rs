//! # Kernel Mandatory-Field Contract
//!
//! Pre-export checks for the XML format. No maintained Rust crate
//! performs full XSD validation, so the kernel-4.6 mandatory elements
//! are enforced directly over the aggregate and reduced to the same
//! issue shape as the JSON path.
//!
//! Blocking errors stop the export; advisory findings are returned as
//! warnings and never block anything.

use serde_json::json;

use datapub_core::party::partition_parties;
use datapub_core::resource::{DescriptionType, Resource, TitleType};

use crate::issue::ValidationIssue;

/// Result of the kernel contract check: blocking errors plus non-fatal
/// warnings, both in document order.
#[derive(Debug, Default)]
pub struct KernelCheck {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl KernelCheck {
    /// Whether the export must be refused.
    pub fn is_fatal(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Enforce the kernel-4.6 mandatory-field contract over an aggregate.
///
/// Checks mirror the kernel element order: identifier, creators, titles,
/// publicationYear. The identifier is special-cased — a missing DOI is a
/// warning, because the element is legitimately empty before minting.
pub fn check(resource: &Resource) -> KernelCheck {
    let mut out = KernelCheck::default();

    if resource.doi.is_none() {
        out.warnings.push(ValidationIssue::new(
            "/resource/identifier",
            "no DOI has been minted yet; the identifier element will be empty",
            "recommended",
            json!({}),
        ));
    }

    let split = partition_parties(&resource.parties);
    if split.creators.is_empty() {
        out.errors.push(ValidationIssue::new(
            "/resource/creators",
            "at least one creator (a party with the Author role) is required",
            "minOccurs",
            json!({ "minimum": 1 }),
        ));
    }

    if resource.titles.is_empty() {
        out.errors.push(ValidationIssue::new(
            "/resource/titles",
            "at least one title is required",
            "minOccurs",
            json!({ "minimum": 1 }),
        ));
    } else {
        let main_titles = resource
            .titles
            .iter()
            .filter(|t| t.title_type == TitleType::Main)
            .count();
        if main_titles == 0 {
            out.errors.push(ValidationIssue::new(
                "/resource/titles",
                "exactly one main title is required",
                "required",
                json!({ "titleType": "Main" }),
            ));
        } else if main_titles > 1 {
            out.errors.push(ValidationIssue::new(
                "/resource/titles",
                "more than one main title is present",
                "maxOccurs",
                json!({ "maximum": 1 }),
            ));
        }
    }

    match resource.publication_year {
        None => out.errors.push(ValidationIssue::new(
            "/resource/publicationYear",
            "publication year is required",
            "required",
            json!({}),
        )),
        Some(year) if !(1000..=2200).contains(&year) => out.errors.push(ValidationIssue::new(
            "/resource/publicationYear",
            "publication year must be a four-digit year",
            "pattern",
            json!({ "pattern": "[0-9]{4}" }),
        )),
        Some(_) => {}
    }

    if resource.licenses.is_empty() {
        out.warnings.push(ValidationIssue::new(
            "/resource/rightsList",
            "no license is attached; rightsList will be omitted",
            "recommended",
            json!({}),
        ));
    }

    let has_abstract = resource
        .descriptions
        .iter()
        .any(|d| d.description_type == DescriptionType::Abstract);
    if !has_abstract {
        out.warnings.push(ValidationIssue::new(
            "/resource/descriptions",
            "no abstract is attached",
            "recommended",
            json!({}),
        ));
    }

    out
}
