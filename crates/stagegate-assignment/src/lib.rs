//! Assignee selection for newly unlocked milestone gates.
//!
//! A pure function over two read-only directory views. The fallback chain
//! is a strict priority order, first success wins:
//!
//! 1. best-rated available performer for the product within the
//!    milestone's eligible departments,
//! 2. the direct manager of the product's first workload record, if that
//!    manager is available and department-eligible,
//! 3. the first available admin in an eligible department,
//! 4. failure — the caller leaves the gate locked and retries on the next
//!    payment event.
//!
//! This is a priority fallback, not load balancing: a best-rated direct
//! performer always beats the organizational and administrative fallbacks.

#![deny(unsafe_code)]

mod mocks;
mod selector;
mod traits;

pub use mocks::InMemoryDirectory;
pub use selector::{AssignmentSelector, Selection, SelectionLevel};
pub use traits::{UserDirectory, WorkloadDirectory};
