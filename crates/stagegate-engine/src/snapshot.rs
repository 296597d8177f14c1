//! Explicit input/output snapshots of the per-project state.
//!
//! Callers never see store internals — every action returns one of these
//! copies, taken under the same lock that performed the mutation.

use crate::store::ProjectRecord;
use serde::{Deserialize, Serialize};
use stagegate_types::{
    DocumentId, DocumentStatus, GateId, GateStatus, LedgerEntryId, PaymentTerm, ProductId,
    ProjectId, RequirementId, UserId,
};

/// One gate's externally visible state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub gate_id: GateId,
    pub step_order: u32,
    pub milestone: String,
    pub threshold_percent: u32,
    pub auto_generated: bool,
    pub status: GateStatus,
    pub assignee: Option<UserId>,
}

/// One document upload's externally visible state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub document_id: DocumentId,
    pub gate_id: GateId,
    pub requirement_id: RequirementId,
    pub status: DocumentStatus,
    pub file_ref: String,
    pub remarks: Option<String>,
    pub uploaded_by: UserId,
    pub reviewed_by: Option<UserId>,
}

/// Consistent view of a project: payment summary plus all non-deleted
/// gates (ascending step order) and documents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project_id: ProjectId,
    pub product: ProductId,
    pub total: i64,
    pub due: i64,
    pub paid: i64,
    pub term: PaymentTerm,
    pub approved: bool,
    pub gates: Vec<GateSnapshot>,
    pub documents: Vec<DocumentSnapshot>,
}

impl ProjectSnapshot {
    pub(crate) fn from_record(record: &ProjectRecord) -> Self {
        let mut gates: Vec<GateSnapshot> = record
            .gates
            .iter()
            .filter(|g| !g.deleted)
            .map(|g| GateSnapshot {
                gate_id: g.id,
                step_order: g.step.step_order,
                milestone: g.step.milestone.name.clone(),
                threshold_percent: g.step.threshold_percent,
                auto_generated: g.step.auto_generated,
                status: g.status,
                assignee: g.assignee.clone(),
            })
            .collect();
        gates.sort_by_key(|g| g.step_order);

        let documents = record
            .documents
            .iter()
            .filter(|d| !d.deleted)
            .map(DocumentSnapshot::from_upload)
            .collect();

        let summary = record.ledger.summary();
        Self {
            project_id: record.project.id,
            product: record.project.product.clone(),
            total: summary.total,
            due: summary.due,
            paid: summary.paid(),
            term: summary.term,
            approved: summary.approved,
            gates,
            documents,
        }
    }

    pub fn gate(&self, id: &GateId) -> Option<&GateSnapshot> {
        self.gates.iter().find(|g| g.gate_id == *id)
    }
}

impl DocumentSnapshot {
    pub(crate) fn from_upload(doc: &stagegate_types::DocumentUpload) -> Self {
        Self {
            document_id: doc.id,
            gate_id: doc.gate_id,
            requirement_id: doc.requirement_id,
            status: doc.status,
            file_ref: doc.file_ref.clone(),
            remarks: doc.remarks.clone(),
            uploaded_by: doc.uploaded_by.clone(),
            reviewed_by: doc.reviewed_by.clone(),
        }
    }
}

/// One gate that could not be assigned during re-evaluation. The payment
/// that triggered the scan still committed; the gate stays locked.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentFailure {
    pub gate_id: GateId,
    pub milestone: String,
    pub reason: String,
}

/// Result of a successful payment or refund: the appended entry, the
/// gates the scan unlocked, any per-gate assignment failures, and the
/// post-commit project view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub entry_id: LedgerEntryId,
    pub unlocked: Vec<GateId>,
    pub assignment_failures: Vec<AssignmentFailure>,
    pub snapshot: ProjectSnapshot,
}

/// Result of project creation, with the initial payment's outcome when
/// one accompanied the creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedProject {
    pub snapshot: ProjectSnapshot,
    pub initial_payment: Option<PaymentOutcome>,
}
