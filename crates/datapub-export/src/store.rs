//! # Resource Access
//!
//! The export service does not own persistence; it reads aggregates
//! through [`ResourceStore`]. The curation workflow supplies the real
//! backing store, [`MemoryStore`] covers the CLI and tests.

use std::collections::HashMap;

use datapub_core::{Resource, ResourceId};

/// Read access to resource aggregates.
pub trait ResourceStore {
    /// Load the aggregate for `id`, if it exists.
    fn load(&self, id: &ResourceId) -> Option<Resource>;
}

/// An in-memory store keyed by resource id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: HashMap<ResourceId, Resource>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource under its own id, replacing any previous copy.
    pub fn insert(&mut self, resource: Resource) {
        self.resources.insert(resource.id, resource);
    }
}

impl ResourceStore for MemoryStore {
    fn load(&self, id: &ResourceId) -> Option<Resource> {
        self.resources.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datapub_core::resource::{ResourceType, Title};

    fn resource() -> Resource {
        Resource {
            id: ResourceId::new(),
            doi: None,
            publication_year: Some(2026),
            version: None,
            resource_type: ResourceType::Dataset,
            resource_type_text: None,
            language: None,
            titles: vec![Title::main("Stored")],
            parties: vec![],
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
    fn insert_then_load_returns_the_resource() {
        let mut store = MemoryStore::new();
        let resource = resource();
        let id = resource.id;
        store.insert(resource);
        assert_eq!(store.load(&id).unwrap().titles[0].text, "Stored");
        assert!(store.load(&ResourceId::new()).is_none());
    }
}
