use crate::traits::{UserDirectory, WorkloadDirectory};
use serde::{Deserialize, Serialize};
use stagegate_types::{CoreError, CoreResult, ProductId, StepDefinition, UserId, UserView};
use tracing::debug;

/// Which level of the fallback chain produced the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionLevel {
    DirectPerformer,
    Manager,
    Admin,
}

/// The outcome of a successful selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub user: UserId,
    pub level: SelectionLevel,
}

/// Maps (milestone step, product) to a single user via the three-level
/// fallback chain. Pure: reads the directories, mutates nothing.
#[derive(Clone, Debug, Default)]
pub struct AssignmentSelector;

impl AssignmentSelector {
    pub fn new() -> Self {
        Self
    }

    /// Select an assignee for a gate whose step targets the given
    /// milestone, on the given product.
    pub fn select(
        &self,
        step: &StepDefinition,
        product: &ProductId,
        users: &dyn UserDirectory,
        workload: &dyn WorkloadDirectory,
    ) -> CoreResult<Selection> {
        let eligible = &step.milestone.eligible_departments;
        let records = workload.records_for_product(product);

        // Level 1: best-rated available performer in an eligible department.
        // Ties on rating go to the first record in enumeration order, so a
        // strictly-greater comparison keeps the earlier record.
        let mut best: Option<(&stagegate_types::WorkloadRecord, u32)> = None;
        for record in &records {
            let Some(view) = users.find(&record.user) else {
                continue;
            };
            if !Self::available_and_eligible(&view, step) {
                continue;
            }
            if best.map_or(true, |(_, top)| record.rating > top) {
                best = Some((record, record.rating));
            }
        }
        if let Some((record, rating)) = best {
            debug!(user = %record.user, rating, "selected direct performer");
            return Ok(Selection {
                user: record.user.clone(),
                level: SelectionLevel::DirectPerformer,
            });
        }

        // Level 2: climb from the first workload record to its user's
        // direct manager.
        if let Some(first) = records.first() {
            if let Some(manager_id) = users.find(&first.user).and_then(|v| v.manager) {
                if let Some(manager) = users.find(&manager_id) {
                    if Self::available_and_eligible(&manager, step) {
                        debug!(user = %manager.id, "selected manager fallback");
                        return Ok(Selection {
                            user: manager.id,
                            level: SelectionLevel::Manager,
                        });
                    }
                }
            }
        }

        // Level 3: first available admin in an eligible department.
        for admin_id in users.admins() {
            let Some(admin) = users.find(&admin_id) else {
                continue;
            };
            if Self::available_and_eligible(&admin, step) {
                debug!(user = %admin.id, "selected admin fallback");
                return Ok(Selection {
                    user: admin.id,
                    level: SelectionLevel::Admin,
                });
            }
        }

        Err(CoreError::NoEligibleAssignee {
            product: product.clone(),
            milestone: step.milestone.name.clone(),
        })
    }

    fn available_and_eligible(view: &UserView, step: &StepDefinition) -> bool {
        view.active && view.in_any_department(&step.milestone.eligible_departments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::InMemoryDirectory;
    use stagegate_types::{DepartmentId, Milestone};

    fn step() -> StepDefinition {
        StepDefinition::new(
            1,
            30,
            Milestone {
                name: "Site survey".into(),
                eligible_departments: vec![DepartmentId::new("ops")],
            },
        )
    }

    fn product() -> ProductId {
        ProductId::new("solar-5kw")
    }

    fn ops() -> DepartmentId {
        DepartmentId::new("ops")
    }

    #[test]
    fn highest_rated_eligible_performer_wins() {
        let mut dir = InMemoryDirectory::new();
        dir.add_user(UserView::new(UserId::new("low")).in_department(ops()));
        dir.add_user(UserView::new(UserId::new("high")).in_department(ops()));
        dir.add_rating(UserId::new("low"), product(), 40);
        dir.add_rating(UserId::new("high"), product(), 90);

        let sel = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap();
        assert_eq!(sel.user, UserId::new("high"));
        assert_eq!(sel.level, SelectionLevel::DirectPerformer);
    }

    #[test]
    fn rating_tie_goes_to_first_record() {
        let mut dir = InMemoryDirectory::new();
        dir.add_user(UserView::new(UserId::new("first")).in_department(ops()));
        dir.add_user(UserView::new(UserId::new("second")).in_department(ops()));
        dir.add_rating(UserId::new("first"), product(), 70);
        dir.add_rating(UserId::new("second"), product(), 70);

        let sel = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap();
        assert_eq!(sel.user, UserId::new("first"));
    }

    #[test]
    fn inactive_and_wrong_department_performers_skipped() {
        let mut dir = InMemoryDirectory::new();
        dir.add_user(
            UserView::new(UserId::new("gone"))
                .in_department(ops())
                .inactive(),
        );
        dir.add_user(UserView::new(UserId::new("sales-only")).in_department(DepartmentId::new("sales")));
        dir.add_user(UserView::new(UserId::new("ok")).in_department(ops()));
        dir.add_rating(UserId::new("gone"), product(), 99);
        dir.add_rating(UserId::new("sales-only"), product(), 95);
        dir.add_rating(UserId::new("ok"), product(), 10);

        let sel = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap();
        assert_eq!(sel.user, UserId::new("ok"));
    }

    #[test]
    fn manager_fallback_when_no_eligible_performer() {
        let mut dir = InMemoryDirectory::new();
        // Rated user is in the wrong department, but their manager is in ops.
        dir.add_user(
            UserView::new(UserId::new("worker"))
                .in_department(DepartmentId::new("sales"))
                .with_manager(UserId::new("boss")),
        );
        dir.add_user(UserView::new(UserId::new("boss")).in_department(ops()));
        dir.add_rating(UserId::new("worker"), product(), 50);

        let sel = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap();
        assert_eq!(sel.user, UserId::new("boss"));
        assert_eq!(sel.level, SelectionLevel::Manager);
    }

    #[test]
    fn manager_fallback_climbs_from_first_record_only() {
        let mut dir = InMemoryDirectory::new();
        dir.add_user(
            UserView::new(UserId::new("w1")).in_department(DepartmentId::new("sales")),
        );
        dir.add_user(
            UserView::new(UserId::new("w2"))
                .in_department(DepartmentId::new("sales"))
                .with_manager(UserId::new("eligible-boss")),
        );
        dir.add_user(UserView::new(UserId::new("eligible-boss")).in_department(ops()));
        // w1 is the first record and has no manager, so the manager level
        // yields nothing even though w2's manager would qualify.
        dir.add_rating(UserId::new("w1"), product(), 10);
        dir.add_rating(UserId::new("w2"), product(), 20);

        let err = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap_err();
        assert!(matches!(err, CoreError::NoEligibleAssignee { .. }));
    }

    #[test]
    fn ineligible_manager_falls_through_to_admin() {
        let mut dir = InMemoryDirectory::new();
        dir.add_user(
            UserView::new(UserId::new("worker"))
                .in_department(DepartmentId::new("sales"))
                .with_manager(UserId::new("boss")),
        );
        dir.add_user(
            UserView::new(UserId::new("boss")).in_department(DepartmentId::new("sales")),
        );
        dir.add_user(
            UserView::new(UserId::new("root"))
                .in_department(ops())
                .admin(),
        );
        dir.add_rating(UserId::new("worker"), product(), 50);

        let sel = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap();
        assert_eq!(sel.user, UserId::new("root"));
        assert_eq!(sel.level, SelectionLevel::Admin);
    }

    #[test]
    fn admin_fallback_skips_unavailable_and_ineligible_admins() {
        let mut dir = InMemoryDirectory::new();
        dir.add_user(
            UserView::new(UserId::new("retired-admin"))
                .in_department(ops())
                .admin()
                .inactive(),
        );
        dir.add_user(
            UserView::new(UserId::new("finance-admin"))
                .in_department(DepartmentId::new("finance"))
                .admin(),
        );
        dir.add_user(
            UserView::new(UserId::new("ops-admin"))
                .in_department(ops())
                .admin(),
        );

        let sel = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap();
        assert_eq!(sel.user, UserId::new("ops-admin"));
        assert_eq!(sel.level, SelectionLevel::Admin);
    }

    #[test]
    fn exhausted_chain_fails_with_context() {
        let dir = InMemoryDirectory::new();
        let err = AssignmentSelector::new()
            .select(&step(), &product(), &dir, &dir)
            .unwrap_err();
        match err {
            CoreError::NoEligibleAssignee { product: p, milestone } => {
                assert_eq!(p, product());
                assert_eq!(milestone, "Site survey");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
