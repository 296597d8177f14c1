//! In-memory project store with per-project serialization.
//!
//! The outer map lock is held only long enough to resolve a project to
//! its record handle; the per-project `Mutex` is the transactional
//! boundary — whoever holds it owns the ledger, the gates, and the
//! documents of that project for the duration of one unit of work.
//! Cross-project operations never contend.

use stagegate_ledger::PaymentLedger;
use stagegate_types::{
    CoreError, CoreResult, DocumentId, DocumentUpload, MilestoneGate, Project, ProjectId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// Everything the core persists for one project. Mutated only while the
/// owning `Mutex` is held.
#[derive(Clone, Debug)]
pub struct ProjectRecord {
    pub project: Project,
    pub ledger: PaymentLedger,
    pub gates: Vec<MilestoneGate>,
    pub documents: Vec<DocumentUpload>,
}

/// Keyed store of project records plus the document-to-project index the
/// document-status action needs to find its unit of work.
pub struct ProjectStore {
    projects: RwLock<HashMap<ProjectId, Arc<Mutex<ProjectRecord>>>>,
    document_index: RwLock<HashMap<DocumentId, ProjectId>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            document_index: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a freshly created project record.
    pub fn insert(&self, record: ProjectRecord) -> CoreResult<()> {
        let mut projects = self.projects.write().map_err(|_| CoreError::LockPoisoned)?;
        projects.insert(record.project.id, Arc::new(Mutex::new(record)));
        Ok(())
    }

    /// Resolve a project to its record handle. The caller locks the
    /// returned `Mutex` for the duration of its unit of work; soft-delete
    /// visibility is checked under that lock, not here.
    pub fn checkout(&self, id: &ProjectId) -> CoreResult<Arc<Mutex<ProjectRecord>>> {
        let projects = self.projects.read().map_err(|_| CoreError::LockPoisoned)?;
        projects
            .get(id)
            .cloned()
            .ok_or(CoreError::ProjectNotFound(*id))
    }

    /// Remember which project owns a document.
    pub fn index_document(&self, document: DocumentId, project: ProjectId) -> CoreResult<()> {
        let mut index = self
            .document_index
            .write()
            .map_err(|_| CoreError::LockPoisoned)?;
        index.insert(document, project);
        Ok(())
    }

    /// Find the project that owns a document.
    pub fn project_of_document(&self, document: &DocumentId) -> CoreResult<ProjectId> {
        let index = self
            .document_index
            .read()
            .map_err(|_| CoreError::LockPoisoned)?;
        index
            .get(document)
            .copied()
            .ok_or(CoreError::DocumentNotFound(*document))
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stagegate_types::{CompanyId, ContactId, PaymentTerm, ProductId, UserId};

    fn record() -> ProjectRecord {
        let id = ProjectId::new();
        ProjectRecord {
            project: Project {
                id,
                company: CompanyId::new("acme"),
                contact: ContactId::new("c1"),
                product: ProductId::new("p1"),
                sales_owner: UserId::new("seller"),
                active: true,
                deleted: false,
                created_at: Utc::now(),
            },
            ledger: PaymentLedger::new(id, 1_000, PaymentTerm::Installments),
            gates: vec![],
            documents: vec![],
        }
    }

    #[test]
    fn checkout_unknown_project_is_not_found() {
        let store = ProjectStore::new();
        let err = store.checkout(&ProjectId::new()).unwrap_err();
        assert!(matches!(err, CoreError::ProjectNotFound(_)));
    }

    #[test]
    fn insert_then_checkout() {
        let store = ProjectStore::new();
        let rec = record();
        let id = rec.project.id;
        store.insert(rec).unwrap();

        let handle = store.checkout(&id).unwrap();
        let guard = handle.lock().unwrap();
        assert_eq!(guard.project.id, id);
    }

    #[test]
    fn document_index_round_trip() {
        let store = ProjectStore::new();
        let doc = DocumentId::new();
        let project = ProjectId::new();
        store.index_document(doc, project).unwrap();
        assert_eq!(store.project_of_document(&doc).unwrap(), project);

        let err = store.project_of_document(&DocumentId::new()).unwrap_err();
        assert!(matches!(err, CoreError::DocumentNotFound(_)));
    }
}
