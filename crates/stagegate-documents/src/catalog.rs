use stagegate_types::{DocumentRequirement, RequirementId};

/// Read-only catalog of document requirements, consumed from the owning
/// master-data system. The core only ever looks requirements up by their
/// stable secondary UUID.
pub trait RequirementCatalog {
    fn find(&self, id: &RequirementId) -> Option<DocumentRequirement>;
}

/// In-memory requirement catalog for tests and the reference store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRequirementCatalog {
    requirements: Vec<DocumentRequirement>,
}

impl InMemoryRequirementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, requirement: DocumentRequirement) {
        self.requirements.push(requirement);
    }
}

impl RequirementCatalog for InMemoryRequirementCatalog {
    fn find(&self, id: &RequirementId) -> Option<DocumentRequirement> {
        self.requirements.iter().find(|r| r.id == *id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagegate_types::RegionScope;

    #[test]
    fn lookup_by_secondary_uuid() {
        let mut catalog = InMemoryRequirementCatalog::new();
        let id = RequirementId::new();
        catalog.add(DocumentRequirement {
            id,
            name: "Signed agreement".into(),
            region: RegionScope::Central,
        });

        assert!(catalog.find(&id).is_some());
        assert!(catalog.find(&RequirementId::new()).is_none());
    }
}
