//! Shared domain types for the stagegate workflow engine.
//!
//! This crate provides the type vocabulary every other stagegate crate
//! speaks: strongly typed IDs, status enums, the entities that make up a
//! project (ledger summary, milestone gates, document uploads), the
//! read-only directory views consumed from collaborating systems, and the
//! error taxonomy. No business logic lives here — the state machines and
//! the selector belong to their own crates.
//!
//! # Key Concepts
//!
//! - **Project**: the unit of fulfillment. Owns one payment ledger summary
//!   and one milestone gate per product-defined step.
//! - **MilestoneGate**: the workflow instance tracking one milestone's
//!   status for one project. Created `Locked`, unlocked by payment.
//! - **StepDefinition**: the product-level template behind a gate —
//!   ordered position, payment threshold, auto-generation flag, and the
//!   milestone's eligible departments.
//! - **DocumentUpload**: one uploaded document against a gate, governed by
//!   a strict verification state machine.
//! - **PaymentLedgerEntry**: an immutable signed payment/refund record.

#![deny(unsafe_code)]

mod directory;
mod document;
mod errors;
mod ids;
mod ledger;
mod project;
mod status;

pub use directory::*;
pub use document::*;
pub use errors::*;
pub use ids::*;
pub use ledger::*;
pub use project::*;
pub use status::*;
