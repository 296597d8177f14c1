//! Milestone gate lifecycle: the transition state machine and the
//! payment-threshold unlock evaluator.
//!
//! Unlocking is payment-driven, never completion-driven: a gate becomes
//! eligible the moment cumulative payment crosses its step's threshold,
//! regardless of whether earlier gates have completed. Multiple gates may
//! unlock from a single payment. This is a deliberate design decision —
//! do not add a completion dependency here.

#![deny(unsafe_code)]

mod evaluator;
mod transition;

pub use evaluator::{UnlockDecision, UnlockEvaluator};
pub use transition::GateStateMachine;
