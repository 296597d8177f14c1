//! Workflow orchestrator: the top-level coordinator of the stagegate core.
//!
//! Exposes the three transport-agnostic actions (record payment, upload
//! document, update document status) plus project creation, payment
//! arrangement approval, gate progression, and snapshot queries. Every action runs as one unit of
//! work under a per-project lock: the ledger write and the full gate
//! re-scan for a project are serialized against each other, while
//! independent projects proceed in parallel.
//!
//! The one deliberate crack in all-or-nothing semantics: an assignment
//! failure during gate re-evaluation never aborts the payment that
//! triggered it. The payment commits, the unassignable gate stays locked,
//! and the failure is reported to the caller for retry on the next
//! payment event.

#![deny(unsafe_code)]

mod orchestrator;
mod snapshot;
mod store;

pub use orchestrator::{InitialPayment, NewProject, Orchestrator};
pub use snapshot::{
    AssignmentFailure, CreatedProject, DocumentSnapshot, GateSnapshot, PaymentOutcome,
    ProjectSnapshot,
};
pub use store::{ProjectRecord, ProjectStore};
