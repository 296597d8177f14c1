use crate::{DocumentId, DocumentStatus, GateId, ProjectId, RequirementId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic scope of a document requirement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionScope {
    Central,
    State(String),
    Country(String),
}

/// A product-scoped document requirement, consumed read-only.
///
/// The core addresses requirements by their stable secondary UUID
/// (`RequirementId`); the owning system's primary key never crosses the
/// boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRequirement {
    pub id: RequirementId,
    pub name: String,
    pub region: RegionScope,
}

/// One uploaded document against a (project, gate, requirement) triple.
///
/// Uniqueness invariant: at most one non-deleted upload exists per triple.
/// Rows are created directly in `Uploaded` and mutate only through the
/// verification state machine; `Verified` and `Rejected` are terminal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: DocumentId,
    pub project_id: ProjectId,
    pub gate_id: GateId,
    pub requirement_id: RequirementId,
    pub file_ref: String,
    pub status: DocumentStatus,
    /// Required (non-blank) when the status is `Rejected`, free otherwise.
    pub remarks: Option<String>,
    pub uploaded_by: UserId,
    /// Who made the terminal verification decision, if any.
    pub reviewed_by: Option<UserId>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentUpload {
    /// A fresh upload in `Uploaded` state.
    pub fn uploaded(
        project_id: ProjectId,
        gate_id: GateId,
        requirement_id: RequirementId,
        file_ref: impl Into<String>,
        uploaded_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            project_id,
            gate_id,
            requirement_id,
            file_ref: file_ref.into(),
            status: DocumentStatus::Uploaded,
            remarks: None,
            uploaded_by,
            reviewed_by: None,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
