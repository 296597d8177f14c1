use crate::{LedgerEntryId, PaymentTerm, ProjectId, TransactionKind, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authoritative paid/due view of a project's payments.
///
/// Invariants (maintained by `stagegate-ledger`, checked after every
/// mutation): `due == total - signed_sum(entries)` and `0 <= due <= total`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub project_id: ProjectId,
    /// Total contract amount, in minor units (cents).
    pub total: i64,
    /// Outstanding amount, in minor units.
    pub due: i64,
    pub term: PaymentTerm,
    /// Approval state of the payment arrangement itself.
    pub approved: bool,
}

impl LedgerSummary {
    pub fn new(project_id: ProjectId, total: i64, term: PaymentTerm) -> Self {
        Self {
            project_id,
            total,
            due: total,
            term,
            approved: false,
        }
    }

    /// Amount paid so far.
    pub fn paid(&self) -> i64 {
        self.total - self.due
    }
}

/// One payment or refund against a project. Immutable once created.
///
/// The amount is stored signed: positive for payments, negative for
/// refunds, so the ledger invariant is a plain signed sum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentLedgerEntry {
    pub entry_id: LedgerEntryId,
    pub project_id: ProjectId,
    pub kind: TransactionKind,
    /// Signed amount in minor units.
    pub amount: i64,
    pub actor: UserId,
    /// Effective date supplied by the caller.
    pub effective_date: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_summary_is_fully_due() {
        let summary = LedgerSummary::new(ProjectId::new(), 100_000, PaymentTerm::Installments);
        assert_eq!(summary.due, 100_000);
        assert_eq!(summary.paid(), 0);
    }
}
