//! Document verification state machine.
//!
//! Governs one uploaded document's lifecycle:
//! `Pending` -> `Uploaded` -> `Verified` | `Rejected`. `Pending` is a
//! conceptual default only — this flow creates rows directly in
//! `Uploaded`. `Verified` and `Rejected` are terminal; rejection requires
//! non-empty remarks. File references must use an allow-listed URI scheme.
//!
//! Duplicate detection and gate-ownership checks need visibility of the
//! project's stored rows, so they live with the orchestrator; this crate
//! holds the pure rules plus the requirement catalog seam.

#![deny(unsafe_code)]

mod catalog;
mod machine;

pub use catalog::{InMemoryRequirementCatalog, RequirementCatalog};
pub use machine::{DocumentStateMachine, ALLOWED_SCHEMES};
