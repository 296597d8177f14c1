use serde::{Deserialize, Serialize};

/// Lifecycle status of a milestone gate.
///
/// Every gate starts `Locked` and is unlocked by cumulative payment, never
/// by hand. The transition table itself lives in `stagegate-milestones`;
/// this enum only knows which states are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateStatus {
    Locked,
    Unlocked,
    InProgress,
    Completed,
    Rejected,
    OnHold,
}

impl GateStatus {
    /// Terminal states permit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Locked => "LOCKED",
            Self::Unlocked => "UNLOCKED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::OnHold => "ON_HOLD",
        };
        f.write_str(s)
    }
}

/// Verification status of an uploaded document.
///
/// `Pending` is a conceptual default only — uploads are always created
/// directly in `Uploaded`, and no persisted row ever carries `Pending` in
/// this flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Pending,
    Uploaded,
    Verified,
    Rejected,
}

impl DocumentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Uploaded => "UPLOADED",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Whether a ledger transaction adds to or restores the due amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Payment,
    Refund,
}

/// Payment terms agreed for a project.
///
/// `FullPayment` is a single-installment term: once due reaches zero, any
/// further payment is rejected as already fully paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentTerm {
    FullPayment,
    Installments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_terminal_states() {
        assert!(GateStatus::Completed.is_terminal());
        assert!(GateStatus::Rejected.is_terminal());
        assert!(!GateStatus::Locked.is_terminal());
        assert!(!GateStatus::Unlocked.is_terminal());
        assert!(!GateStatus::OnHold.is_terminal());
    }

    #[test]
    fn document_terminal_states() {
        assert!(DocumentStatus::Verified.is_terminal());
        assert!(DocumentStatus::Rejected.is_terminal());
        assert!(!DocumentStatus::Uploaded.is_terminal());
        assert!(!DocumentStatus::Pending.is_terminal());
    }

    #[test]
    fn display_matches_wire_vocabulary() {
        assert_eq!(GateStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(DocumentStatus::Uploaded.to_string(), "UPLOADED");
    }
}
