use crate::{CompanyId, ContactId, DepartmentId, GateId, GateStatus, ProductId, ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fulfillment project. External references (company, contact, product,
/// sales owner) are opaque keys into collaborating systems.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub company: CompanyId,
    pub contact: ContactId,
    pub product: ProductId,
    pub sales_owner: UserId,
    pub active: bool,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// A milestone as the product defines it: a name plus the departments
/// whose members are eligible to be assigned to it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub eligible_departments: Vec<DepartmentId>,
}

/// Product-level template for one milestone step.
///
/// `step_order` is the persisted sort key for gate re-evaluation;
/// `threshold_percent` (0–100) is the cumulative-payment gate; steps with
/// `auto_generated` set unlock without going through manual assignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepDefinition {
    pub step_order: u32,
    pub threshold_percent: u32,
    pub auto_generated: bool,
    pub milestone: Milestone,
}

impl StepDefinition {
    pub fn new(step_order: u32, threshold_percent: u32, milestone: Milestone) -> Self {
        Self {
            step_order,
            threshold_percent,
            auto_generated: false,
            milestone,
        }
    }

    pub fn auto_generated(mut self) -> Self {
        self.auto_generated = true;
        self
    }
}

/// The workflow instance tracking one milestone's status for one project.
///
/// Created with the project in `Locked` with no assignee; one gate exists
/// per step definition and none are ever added afterward. The assignee is
/// recorded at most once, while unlocking, and stays `None` for
/// auto-generated steps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MilestoneGate {
    pub id: GateId,
    pub project_id: ProjectId,
    pub step: StepDefinition,
    pub status: GateStatus,
    pub assignee: Option<UserId>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MilestoneGate {
    /// A fresh, locked, unassigned gate for one step of a project.
    pub fn locked(project_id: ProjectId, step: StepDefinition, now: DateTime<Utc>) -> Self {
        Self {
            id: GateId::new(),
            project_id,
            step,
            status: GateStatus::Locked,
            assignee: None,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_gate_starts_unassigned() {
        let step = StepDefinition::new(
            1,
            30,
            Milestone {
                name: "Site survey".into(),
                eligible_departments: vec![DepartmentId::new("ops")],
            },
        );
        let gate = MilestoneGate::locked(ProjectId::new(), step, Utc::now());
        assert_eq!(gate.status, GateStatus::Locked);
        assert!(gate.assignee.is_none());
        assert!(!gate.deleted);
    }

    #[test]
    fn auto_generated_builder_sets_flag() {
        let step = StepDefinition::new(
            2,
            100,
            Milestone {
                name: "Handover".into(),
                eligible_departments: vec![],
            },
        )
        .auto_generated();
        assert!(step.auto_generated);
    }
}
