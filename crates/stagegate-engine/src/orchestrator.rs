//! The workflow orchestrator.
//!
//! On project creation it instantiates one locked gate per product step;
//! on every ledger mutation it re-scans all gates in ascending step order
//! and, for each newly eligible gate, invokes the assignment selector.
//! Document actions run against the same per-project unit of work.

use crate::snapshot::{
    AssignmentFailure, CreatedProject, DocumentSnapshot, PaymentOutcome, ProjectSnapshot,
};
use crate::store::{ProjectRecord, ProjectStore};
use chrono::{DateTime, Utc};
use stagegate_assignment::{AssignmentSelector, UserDirectory, WorkloadDirectory};
use stagegate_documents::{DocumentStateMachine, RequirementCatalog};
use stagegate_ledger::PaymentLedger;
use stagegate_milestones::{GateStateMachine, UnlockEvaluator};
use stagegate_types::{
    CompanyId, ContactId, CoreError, CoreResult, DocumentId, DocumentStatus, DocumentUpload,
    GateId, GateStatus, MilestoneGate, PaymentTerm, ProductId, Project, ProjectId,
    RequirementId, StepDefinition, TransactionKind, UserId,
};
use tracing::{debug, info, warn};

/// Input for project creation.
#[derive(Clone, Debug)]
pub struct NewProject {
    pub company: CompanyId,
    pub contact: ContactId,
    pub product: ProductId,
    pub sales_owner: UserId,
    /// Total contract amount in minor units.
    pub total: i64,
    pub term: PaymentTerm,
    /// Product-defined milestone steps; one locked gate is created per
    /// step, atomically with the project. Never extended afterward.
    pub steps: Vec<StepDefinition>,
    pub initial_payment: Option<InitialPayment>,
}

/// A payment accompanying project creation, recorded through the normal
/// ledger path (and therefore triggering the first gate scan).
#[derive(Clone, Debug)]
pub struct InitialPayment {
    pub amount: i64,
    pub actor: UserId,
    pub date: DateTime<Utc>,
}

/// Top-level coordinator over the store, the state machines, and the
/// read-only directories.
pub struct Orchestrator<U, W, R> {
    store: ProjectStore,
    users: U,
    workload: W,
    requirements: R,
    selector: AssignmentSelector,
    gates: GateStateMachine,
    documents: DocumentStateMachine,
    evaluator: UnlockEvaluator,
}

impl<U, W, R> Orchestrator<U, W, R>
where
    U: UserDirectory,
    W: WorkloadDirectory,
    R: RequirementCatalog,
{
    pub fn new(users: U, workload: W, requirements: R) -> Self {
        Self {
            store: ProjectStore::new(),
            users,
            workload,
            requirements,
            selector: AssignmentSelector::new(),
            gates: GateStateMachine::new(),
            documents: DocumentStateMachine::new(),
            evaluator: UnlockEvaluator::new(),
        }
    }

    /// Create a project with its ledger and one locked gate per step, in
    /// one atomic insert. An accompanying initial payment goes through
    /// the normal payment path afterwards.
    pub fn create_project(&self, spec: NewProject) -> CoreResult<CreatedProject> {
        if spec.total <= 0 {
            return Err(CoreError::InvalidAmount { amount: spec.total });
        }
        // Validate the accompanying payment before touching the store so
        // creation stays all-or-nothing.
        if let Some(p) = &spec.initial_payment {
            if p.amount <= 0 {
                return Err(CoreError::InvalidAmount { amount: p.amount });
            }
            if p.amount > spec.total {
                return Err(CoreError::ExceedsDue {
                    attempted: p.amount,
                    due: spec.total,
                });
            }
        }

        let now = Utc::now();
        let project_id = ProjectId::new();
        let project = Project {
            id: project_id,
            company: spec.company,
            contact: spec.contact,
            product: spec.product,
            sales_owner: spec.sales_owner,
            active: true,
            deleted: false,
            created_at: now,
        };

        let mut gates: Vec<MilestoneGate> = spec
            .steps
            .into_iter()
            .map(|step| MilestoneGate::locked(project_id, step, now))
            .collect();
        gates.sort_by_key(|g| g.step.step_order);

        let record = ProjectRecord {
            project,
            ledger: PaymentLedger::new(project_id, spec.total, spec.term),
            gates,
            documents: Vec::new(),
        };
        let snapshot = ProjectSnapshot::from_record(&record);
        self.store.insert(record)?;
        info!(project = %project_id, gates = snapshot.gates.len(), "project created");

        let initial_payment = match spec.initial_payment {
            Some(p) => Some(self.record_payment(
                &project_id,
                TransactionKind::Payment,
                p.amount,
                p.actor,
                p.date,
            )?),
            None => None,
        };

        // Re-read after the optional payment so the returned snapshot is
        // the post-creation truth either way.
        let snapshot = match &initial_payment {
            Some(outcome) => outcome.snapshot.clone(),
            None => snapshot,
        };

        Ok(CreatedProject {
            snapshot,
            initial_payment,
        })
    }

    /// Record a payment or refund, then re-evaluate every locked gate in
    /// ascending step order — all inside one per-project unit of work.
    ///
    /// Gate-level assignment failures do not abort the payment: they are
    /// collected into the outcome and the affected gates stay locked for
    /// retry on the next ledger mutation.
    pub fn record_payment(
        &self,
        project_id: &ProjectId,
        kind: TransactionKind,
        amount: i64,
        actor: UserId,
        date: DateTime<Utc>,
    ) -> CoreResult<PaymentOutcome> {
        let handle = self.store.checkout(project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(*project_id));
        }

        let entry = record.ledger.record_transaction(kind, amount, actor, date)?;
        info!(
            project = %project_id,
            entry = %entry.entry_id,
            ?kind,
            amount,
            due = record.ledger.due(),
            "transaction recorded"
        );

        let (unlocked, assignment_failures) = self.rescan_gates(&mut record)?;
        Ok(PaymentOutcome {
            entry_id: entry.entry_id,
            unlocked,
            assignment_failures,
            snapshot: ProjectSnapshot::from_record(&record),
        })
    }

    /// Mark the project's payment arrangement approved.
    pub fn approve_payment_arrangement(
        &self,
        project_id: &ProjectId,
    ) -> CoreResult<ProjectSnapshot> {
        let handle = self.store.checkout(project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(*project_id));
        }

        record.ledger.approve();
        info!(project = %project_id, "payment arrangement approved");
        Ok(ProjectSnapshot::from_record(&record))
    }

    /// Upload a document against a gate of this project.
    pub fn upload_document(
        &self,
        project_id: &ProjectId,
        gate_id: &GateId,
        requirement_id: &RequirementId,
        file_ref: &str,
        uploader: UserId,
    ) -> CoreResult<DocumentSnapshot> {
        let handle = self.store.checkout(project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(*project_id));
        }

        let gate = record
            .gates
            .iter()
            .find(|g| g.id == *gate_id && !g.deleted)
            .ok_or(CoreError::GateMismatch {
                gate: *gate_id,
                project: *project_id,
            })?;
        if gate.status == GateStatus::Locked {
            return Err(CoreError::GateLocked(*gate_id));
        }

        if self.requirements.find(requirement_id).is_none() {
            return Err(CoreError::RequirementNotFound(*requirement_id));
        }
        self.documents.validate_file_ref(file_ref)?;

        let duplicate = record.documents.iter().any(|d| {
            !d.deleted && d.gate_id == *gate_id && d.requirement_id == *requirement_id
        });
        if duplicate {
            return Err(CoreError::DuplicateUpload {
                gate: *gate_id,
                requirement: *requirement_id,
            });
        }

        let doc = DocumentUpload::uploaded(
            *project_id,
            *gate_id,
            *requirement_id,
            file_ref,
            uploader,
            Utc::now(),
        );
        let snapshot = DocumentSnapshot::from_upload(&doc);
        self.store.index_document(doc.id, *project_id)?;
        record.documents.push(doc);
        info!(project = %project_id, gate = %gate_id, document = %snapshot.document_id, "document uploaded");
        Ok(snapshot)
    }

    /// Apply a verification decision to a document.
    pub fn update_document_status(
        &self,
        document_id: &DocumentId,
        to: DocumentStatus,
        remarks: Option<String>,
        actor: UserId,
    ) -> CoreResult<DocumentSnapshot> {
        let project_id = self.store.project_of_document(document_id)?;
        let handle = self.store.checkout(&project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(project_id));
        }

        let doc = record
            .documents
            .iter_mut()
            .find(|d| d.id == *document_id && !d.deleted)
            .ok_or(CoreError::DocumentNotFound(*document_id))?;
        self.documents
            .update_status(doc, to, remarks, actor, Utc::now())?;
        info!(document = %document_id, status = %to, "document status updated");
        Ok(DocumentSnapshot::from_upload(doc))
    }

    /// Soft-delete a document, freeing its (gate, requirement) slot for a
    /// fresh upload.
    pub fn delete_document(&self, document_id: &DocumentId) -> CoreResult<()> {
        let project_id = self.store.project_of_document(document_id)?;
        let handle = self.store.checkout(&project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;

        let doc = record
            .documents
            .iter_mut()
            .find(|d| d.id == *document_id && !d.deleted)
            .ok_or(CoreError::DocumentNotFound(*document_id))?;
        doc.deleted = true;
        doc.updated_at = Utc::now();
        Ok(())
    }

    /// Apply an externally triggered gate transition (start, complete,
    /// reject, hold, resume). Unlocking is not reachable from here.
    pub fn transition_gate(
        &self,
        project_id: &ProjectId,
        gate_id: &GateId,
        to: GateStatus,
    ) -> CoreResult<ProjectSnapshot> {
        let handle = self.store.checkout(project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(*project_id));
        }

        let gate = record
            .gates
            .iter_mut()
            .find(|g| g.id == *gate_id && !g.deleted)
            .ok_or(CoreError::GateNotFound(*gate_id))?;
        self.gates.transition(gate, to, Utc::now())?;
        info!(project = %project_id, gate = %gate_id, status = %to, "gate transitioned");
        Ok(ProjectSnapshot::from_record(&record))
    }

    /// Current snapshot of a project.
    pub fn project(&self, project_id: &ProjectId) -> CoreResult<ProjectSnapshot> {
        let handle = self.store.checkout(project_id)?;
        let record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(*project_id));
        }
        Ok(ProjectSnapshot::from_record(&record))
    }

    /// Soft-delete a project together with its gates and documents.
    pub fn delete_project(&self, project_id: &ProjectId) -> CoreResult<()> {
        let handle = self.store.checkout(project_id)?;
        let mut record = handle.lock().map_err(|_| CoreError::LockPoisoned)?;
        if record.project.deleted {
            return Err(CoreError::ProjectNotFound(*project_id));
        }

        let now = Utc::now();
        record.project.deleted = true;
        record.project.active = false;
        for gate in &mut record.gates {
            gate.deleted = true;
            gate.updated_at = now;
        }
        for doc in &mut record.documents {
            doc.deleted = true;
            doc.updated_at = now;
        }
        info!(project = %project_id, "project soft-deleted");
        Ok(())
    }

    /// Re-evaluate every locked gate in ascending step order against the
    /// current paid amount. Idempotent: with no new payment the scan
    /// changes nothing.
    fn rescan_gates(
        &self,
        record: &mut ProjectRecord,
    ) -> CoreResult<(Vec<GateId>, Vec<AssignmentFailure>)> {
        let paid = record.ledger.paid();
        let total = record.ledger.total();
        let product = record.project.product.clone();

        let mut order: Vec<usize> = (0..record.gates.len()).collect();
        order.sort_by_key(|&i| record.gates[i].step.step_order);

        let mut unlocked = Vec::new();
        let mut failures = Vec::new();
        for i in order {
            let gate = &record.gates[i];
            if gate.deleted || gate.status != GateStatus::Locked {
                continue;
            }

            let decision = self.evaluator.evaluate(paid, total, &gate.step);
            debug!(gate = %gate.id, step = gate.step.step_order, ?decision, "gate evaluated");
            if !decision.is_eligible() {
                continue;
            }

            let assignee = if gate.step.auto_generated {
                None
            } else {
                match self
                    .selector
                    .select(&gate.step, &product, &self.users, &self.workload)
                {
                    Ok(selection) => Some(selection.user),
                    Err(err @ CoreError::NoEligibleAssignee { .. }) => {
                        warn!(gate = %gate.id, %err, "gate stays locked: no eligible assignee");
                        failures.push(AssignmentFailure {
                            gate_id: gate.id,
                            milestone: gate.step.milestone.name.clone(),
                            reason: err.to_string(),
                        });
                        continue;
                    }
                    Err(other) => return Err(other),
                }
            };

            let gate = &mut record.gates[i];
            self.gates.unlock(gate, assignee, Utc::now())?;
            info!(
                gate = %gate.id,
                step = gate.step.step_order,
                assignee = gate.assignee.as_ref().map(|a| a.0.as_str()).unwrap_or("-"),
                "gate unlocked"
            );
            unlocked.push(gate.id);
        }

        Ok((unlocked, failures))
    }
}
