//! Error taxonomy for the stagegate core.
//!
//! Every variant carries enough context (entity id, current vs. attempted
//! state, amounts) for a caller to decide between retrying with corrected
//! input and treating the failure as permanent. `kind()` buckets variants
//! into the coarse taxonomy the API layer maps to its own responses.

use crate::{
    DocumentId, DocumentStatus, GateId, GateStatus, ProductId, ProjectId, RequirementId, UserId,
};

/// Coarse classification of a core error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input — caller-correctable, never retried as-is.
    Validation,
    /// Referenced entity absent or soft-deleted.
    NotFound,
    /// The request contradicts current state (duplicates, overpayment, …).
    Conflict,
    /// Illegal gate or document status transition.
    StateTransition,
    /// The assignment fallback chain was exhausted.
    Assignment,
    /// Infrastructure failure inside the core (poisoned lock).
    Internal,
}

/// Errors that can occur in stagegate core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("transaction amount must be positive, got {amount}")]
    InvalidAmount { amount: i64 },

    #[error("payment of {attempted} exceeds outstanding due of {due}")]
    ExceedsDue { attempted: i64, due: i64 },

    #[error("project {project} is already fully paid under a single-installment term")]
    ProjectFullyPaid { project: ProjectId },

    #[error("refund of {attempted} exceeds paid amount of {paid}")]
    RefundExceedsPaid { attempted: i64, paid: i64 },

    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("milestone gate not found: {0}")]
    GateNotFound(GateId),

    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("document requirement not found: {0}")]
    RequirementNotFound(RequirementId),

    #[error("gate {gate} does not belong to project {project}")]
    GateMismatch { gate: GateId, project: ProjectId },

    #[error("gate {0} is still locked; documents cannot be uploaded yet")]
    GateLocked(GateId),

    #[error("a non-deleted upload already exists for gate {gate}, requirement {requirement}")]
    DuplicateUpload {
        gate: GateId,
        requirement: RequirementId,
    },

    #[error("document {document} is already {status}; same-state transition rejected")]
    NoOpTransition {
        document: DocumentId,
        status: DocumentStatus,
    },

    #[error("illegal document transition for {document}: {from} -> {to}")]
    InvalidDocumentTransition {
        document: DocumentId,
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("illegal gate transition for {gate}: {from} -> {to}")]
    InvalidGateTransition {
        gate: GateId,
        from: GateStatus,
        to: GateStatus,
    },

    #[error("rejecting a document requires non-empty remarks")]
    RemarksRequired,

    #[error("file reference '{file_ref}' is not an allow-listed URI (http, https, ftp)")]
    InvalidFileReference { file_ref: String },

    #[error("gate {gate} already has assignee {assignee}")]
    AssigneeAlreadySet { gate: GateId, assignee: UserId },

    #[error("no eligible assignee for milestone '{milestone}' on product {product}")]
    NoEligibleAssignee {
        product: ProductId,
        milestone: String,
    },

    #[error("core lock poisoned; unit of work aborted")]
    LockPoisoned,
}

impl CoreError {
    /// Map this error onto the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount { .. }
            | Self::GateMismatch { .. }
            | Self::RemarksRequired
            | Self::InvalidFileReference { .. } => ErrorKind::Validation,

            Self::ProjectNotFound(_)
            | Self::GateNotFound(_)
            | Self::DocumentNotFound(_)
            | Self::RequirementNotFound(_) => ErrorKind::NotFound,

            Self::ExceedsDue { .. }
            | Self::ProjectFullyPaid { .. }
            | Self::RefundExceedsPaid { .. }
            | Self::GateLocked(_)
            | Self::DuplicateUpload { .. }
            | Self::NoOpTransition { .. }
            | Self::AssigneeAlreadySet { .. } => ErrorKind::Conflict,

            Self::InvalidDocumentTransition { .. } | Self::InvalidGateTransition { .. } => {
                ErrorKind::StateTransition
            }

            Self::NoEligibleAssignee { .. } => ErrorKind::Assignment,

            Self::LockPoisoned => ErrorKind::Internal,
        }
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            CoreError::InvalidAmount { amount: -5 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CoreError::ExceedsDue {
                attempted: 1100,
                due: 1000
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CoreError::ProjectNotFound(ProjectId::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::InvalidGateTransition {
                gate: GateId::new(),
                from: GateStatus::Completed,
                to: GateStatus::InProgress,
            }
            .kind(),
            ErrorKind::StateTransition
        );
        assert_eq!(
            CoreError::NoEligibleAssignee {
                product: ProductId::new("p"),
                milestone: "Kickoff".into(),
            }
            .kind(),
            ErrorKind::Assignment
        );
    }

    #[test]
    fn messages_carry_context() {
        let err = CoreError::ExceedsDue {
            attempted: 110_000,
            due: 100_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("110000"));
        assert!(msg.contains("100000"));
    }
}
