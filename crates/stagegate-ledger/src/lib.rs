//! Append-only payment ledger for one project.
//!
//! The ledger is the authoritative source of a project's paid/due
//! amounts. Entries are immutable once appended — no delete or modify
//! operations exist — and the summary's due amount is always derivable
//! from the signed sum of entries.
//!
//! Validation order for a new transaction:
//! 1. amount must be positive,
//! 2. a payment on a single-installment term with zero due is rejected
//!    as already fully paid,
//! 3. a payment may not exceed the outstanding due,
//! 4. a refund may not exceed the amount paid so far.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagegate_types::{
    CoreError, CoreResult, LedgerEntryId, LedgerSummary, PaymentLedgerEntry, PaymentTerm,
    ProjectId, TransactionKind, UserId,
};

/// The append-only ledger of one project, plus its derived summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentLedger {
    summary: LedgerSummary,
    entries: Vec<PaymentLedgerEntry>,
}

impl PaymentLedger {
    /// A fresh ledger with the full contract amount outstanding.
    pub fn new(project_id: ProjectId, total: i64, term: PaymentTerm) -> Self {
        Self {
            summary: LedgerSummary::new(project_id, total, term),
            entries: Vec::new(),
        }
    }

    pub fn summary(&self) -> &LedgerSummary {
        &self.summary
    }

    pub fn entries(&self) -> &[PaymentLedgerEntry] {
        &self.entries
    }

    pub fn total(&self) -> i64 {
        self.summary.total
    }

    pub fn due(&self) -> i64 {
        self.summary.due
    }

    pub fn paid(&self) -> i64 {
        self.summary.paid()
    }

    /// Signed sum of all entries (payments positive, refunds negative).
    pub fn signed_sum(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Mark the payment arrangement approved.
    pub fn approve(&mut self) {
        self.summary.approved = true;
    }

    /// Record a payment or refund. Appends an immutable entry and adjusts
    /// the due amount; never mutates existing entries. Returns a copy of
    /// the appended entry.
    pub fn record_transaction(
        &mut self,
        kind: TransactionKind,
        amount: i64,
        actor: UserId,
        effective_date: DateTime<Utc>,
    ) -> CoreResult<PaymentLedgerEntry> {
        if amount <= 0 {
            return Err(CoreError::InvalidAmount { amount });
        }

        match kind {
            TransactionKind::Payment => {
                if self.summary.term == PaymentTerm::FullPayment && self.summary.due == 0 {
                    return Err(CoreError::ProjectFullyPaid {
                        project: self.summary.project_id,
                    });
                }
                if amount > self.summary.due {
                    return Err(CoreError::ExceedsDue {
                        attempted: amount,
                        due: self.summary.due,
                    });
                }
            }
            TransactionKind::Refund => {
                if amount > self.summary.paid() {
                    return Err(CoreError::RefundExceedsPaid {
                        attempted: amount,
                        paid: self.summary.paid(),
                    });
                }
            }
        }

        let signed = match kind {
            TransactionKind::Payment => amount,
            TransactionKind::Refund => -amount,
        };

        let entry = PaymentLedgerEntry {
            entry_id: LedgerEntryId::new(),
            project_id: self.summary.project_id,
            kind,
            amount: signed,
            actor,
            effective_date,
            recorded_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        self.summary.due -= signed;

        debug_assert_eq!(self.summary.due, self.summary.total - self.signed_sum());
        debug_assert!(self.summary.due >= 0 && self.summary.due <= self.summary.total);

        Ok(entry)
    }
}
