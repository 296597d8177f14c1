//! Gate transition state machine.
//!
//! Enforces the transition graph for milestone gates. `Locked` can only be
//! left through `unlock` (the payment-driven path, which also records the
//! assignee); everything after `Unlocked` is externally triggered but must
//! still respect the graph: terminal states admit nothing, no state ever
//! regresses to `Locked`, and same-state transitions are rejected.

use chrono::{DateTime, Utc};
use stagegate_types::{CoreError, CoreResult, GateStatus, MilestoneGate, UserId};

/// Applies status transitions to milestone gates.
#[derive(Clone, Debug, Default)]
pub struct GateStateMachine;

impl GateStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Allowed target states from a given status. `Locked` is absent from
    /// every row — regression is unrepresentable.
    pub fn allowed_next(from: GateStatus) -> &'static [GateStatus] {
        match from {
            GateStatus::Locked => &[GateStatus::Unlocked],
            GateStatus::Unlocked => &[
                GateStatus::InProgress,
                GateStatus::OnHold,
                GateStatus::Rejected,
            ],
            GateStatus::InProgress => &[
                GateStatus::Completed,
                GateStatus::Rejected,
                GateStatus::OnHold,
            ],
            GateStatus::OnHold => &[GateStatus::InProgress, GateStatus::Rejected],
            GateStatus::Completed | GateStatus::Rejected => &[],
        }
    }

    /// Unlock a locked gate, recording the assignee.
    ///
    /// The assignee is set exactly here and never again; auto-generated
    /// steps pass `None` and stay unassigned for their whole lifecycle.
    pub fn unlock(
        &self,
        gate: &mut MilestoneGate,
        assignee: Option<UserId>,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        if gate.status != GateStatus::Locked {
            return Err(CoreError::InvalidGateTransition {
                gate: gate.id,
                from: gate.status,
                to: GateStatus::Unlocked,
            });
        }
        if let Some(existing) = &gate.assignee {
            return Err(CoreError::AssigneeAlreadySet {
                gate: gate.id,
                assignee: existing.clone(),
            });
        }

        gate.status = GateStatus::Unlocked;
        gate.assignee = assignee;
        gate.updated_at = now;
        Ok(())
    }

    /// Apply an externally triggered transition (start, complete, reject,
    /// hold, resume). `Unlocked` is not a valid target here — unlocking
    /// goes through `unlock` so the assignee rules cannot be bypassed.
    pub fn transition(
        &self,
        gate: &mut MilestoneGate,
        to: GateStatus,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        if to == GateStatus::Unlocked || to == GateStatus::Locked {
            return Err(CoreError::InvalidGateTransition {
                gate: gate.id,
                from: gate.status,
                to,
            });
        }
        if !Self::allowed_next(gate.status).contains(&to) {
            return Err(CoreError::InvalidGateTransition {
                gate: gate.id,
                from: gate.status,
                to,
            });
        }

        gate.status = to;
        gate.updated_at = now;
        Ok(())
    }
}
