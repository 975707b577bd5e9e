//! # Named Parties and the Creator/Contributor Partition
//!
//! A party is a person or an institution attached to a resource through
//! one or more role assignments. The DataCite wire formats do not carry
//! roles directly: parties holding the `Author` role serialize as
//! *creators*, every other role holder serializes as a *contributor*
//! tagged with a `contributorType`.
//!
//! The partition is implemented once, here, as a pure function over the
//! role set ([`partition_parties`]) and shared by the JSON and XML
//! projectors so the two formats cannot diverge.

use serde::{Deserialize, Serialize};

/// A named party — the polymorphic base behind creators and contributors.
///
/// The two variants carry disjoint field sets; projection code matches on
/// the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Party {
    /// A natural person, optionally identified by an ORCID iD.
    Person {
        given_name: String,
        family_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        orcid: Option<String>,
    },
    /// An organization, optionally identified by a ROR identifier.
    Institution {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ror: Option<String>,
    },
}

impl Party {
    /// The display name in DataCite convention: `Family, Given` for
    /// persons, the plain name for institutions.
    pub fn display_name(&self) -> String {
        match self {
            Party::Person {
                given_name,
                family_name,
                ..
            } => format!("{family_name}, {given_name}"),
            Party::Institution { name, .. } => name.clone(),
        }
    }

    /// The DataCite `nameType` for this variant.
    pub fn name_type(&self) -> &'static str {
        match self {
            Party::Person { .. } => "Personal",
            Party::Institution { .. } => "Organizational",
        }
    }
}

/// A role a party holds on a resource.
///
/// `Author` is the only role that produces a creator; all others map to
/// a DataCite `contributorType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyRole {
    Author,
    ContactPerson,
    DataCollector,
    DataCurator,
    DataManager,
    ProjectLeader,
    ProjectManager,
    ProjectMember,
    RelatedPerson,
    Researcher,
    RightsHolder,
    Supervisor,
    Other,
}

impl PartyRole {
    /// The DataCite `contributorType` for a non-author role.
    ///
    /// Returns `None` for [`PartyRole::Author`] — authors never appear in
    /// the contributors list.
    pub fn contributor_type(&self) -> Option<&'static str> {
        match self {
            PartyRole::Author => None,
            PartyRole::ContactPerson => Some("ContactPerson"),
            PartyRole::DataCollector => Some("DataCollector"),
            PartyRole::DataCurator => Some("DataCurator"),
            PartyRole::DataManager => Some("DataManager"),
            PartyRole::ProjectLeader => Some("ProjectLeader"),
            PartyRole::ProjectManager => Some("ProjectManager"),
            PartyRole::ProjectMember => Some("ProjectMember"),
            PartyRole::RelatedPerson => Some("RelatedPerson"),
            PartyRole::Researcher => Some("Researcher"),
            PartyRole::RightsHolder => Some("RightsHolder"),
            PartyRole::Supervisor => Some("Supervisor"),
            PartyRole::Other => Some("Other"),
        }
    }
}

/// A party attached to a resource with its role set.
///
/// A party may hold several roles simultaneously (e.g. both `Author` and
/// `ContactPerson`). Duplicate roles are tolerated on input and collapsed
/// during partitioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAssignment {
    pub party: Party,
    pub roles: Vec<PartyRole>,
}

impl PartyAssignment {
    pub fn new(party: Party, roles: Vec<PartyRole>) -> Self {
        Self { party, roles }
    }

    /// Whether this assignment's role set includes `Author`.
    pub fn is_creator(&self) -> bool {
        self.roles.contains(&PartyRole::Author)
    }
}

/// The creator/contributor partition of a resource's party assignments.
#[derive(Debug)]
pub struct PartitionedParties<'a> {
    /// Parties whose role set includes `Author`, in assignment order.
    pub creators: Vec<&'a Party>,
    /// One entry per distinct non-author role of each non-author party,
    /// in assignment order.
    pub contributors: Vec<(&'a Party, PartyRole)>,
}

/// Partition party assignments into creators and contributors.
///
/// A party holding `Author` appears exactly once among the creators and
/// never among the contributors, regardless of its other roles. A party
/// without `Author` yields one contributor entry per distinct non-author
/// role, preserving assignment order.
pub fn partition_parties(assignments: &[PartyAssignment]) -> PartitionedParties<'_> {
    let mut creators = Vec::new();
    let mut contributors = Vec::new();

    for assignment in assignments {
        if assignment.is_creator() {
            creators.push(&assignment.party);
            continue;
        }
        let mut seen = Vec::new();
        for role in &assignment.roles {
            if role.contributor_type().is_some() && !seen.contains(role) {
                seen.push(*role);
                contributors.push((&assignment.party, *role));
            }
        }
    }

    PartitionedParties {
        creators,
        contributors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(family: &str) -> Party {
        Party::Person {
            given_name: "Jane".into(),
            family_name: family.into(),
            orcid: None,
        }
    }

    #[test]
    fn author_with_extra_roles_is_creator_only() {
        let assignments = vec![PartyAssignment::new(
            person("Doe"),
            vec![PartyRole::Author, PartyRole::ContactPerson],
        )];
        let split = partition_parties(&assignments);
        assert_eq!(split.creators.len(), 1);
        assert!(split.contributors.is_empty());
    }

    #[test]
    fn non_author_role_becomes_contributor() {
        let assignments = vec![PartyAssignment::new(
            person("Doe"),
            vec![PartyRole::DataCollector],
        )];
        let split = partition_parties(&assignments);
        assert!(split.creators.is_empty());
        assert_eq!(split.contributors.len(), 1);
        assert_eq!(
            split.contributors[0].1.contributor_type(),
            Some("DataCollector")
        );
    }

    #[test]
    fn multiple_non_author_roles_yield_one_entry_each() {
        let assignments = vec![PartyAssignment::new(
            person("Doe"),
            vec![PartyRole::DataCurator, PartyRole::ContactPerson],
        )];
        let split = partition_parties(&assignments);
        assert_eq!(split.contributors.len(), 2);
    }

    #[test]
    fn duplicate_roles_are_collapsed() {
        let assignments = vec![PartyAssignment::new(
            person("Doe"),
            vec![PartyRole::Researcher, PartyRole::Researcher],
        )];
        let split = partition_parties(&assignments);
        assert_eq!(split.contributors.len(), 1);
    }

    #[test]
    fn assignment_order_is_preserved() {
        let assignments = vec![
            PartyAssignment::new(person("First"), vec![PartyRole::Author]),
            PartyAssignment::new(person("Second"), vec![PartyRole::Author]),
        ];
        let split = partition_parties(&assignments);
        assert_eq!(split.creators[0].display_name(), "First, Jane");
        assert_eq!(split.creators[1].display_name(), "Second, Jane");
    }

    #[test]
    fn person_display_name_is_family_comma_given() {
        let p = Party::Person {
            given_name: "John".into(),
            family_name: "Doe".into(),
            orcid: None,
        };
        assert_eq!(p.display_name(), "Doe, John");
        assert_eq!(p.name_type(), "Personal");
    }

    #[test]
    fn institution_display_name_is_plain() {
        let p = Party::Institution {
            name: "Example University".into(),
            ror: Some("https://ror.org/04aj4c181".into()),
        };
        assert_eq!(p.display_name(), "Example University");
        assert_eq!(p.name_type(), "Organizational");
    }
}
