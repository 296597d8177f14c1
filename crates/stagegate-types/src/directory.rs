use crate::{DepartmentId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Read-only view of a user as the directory exposes it to the core:
/// enough to decide assignment eligibility, nothing more.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub active: bool,
    pub departments: Vec<DepartmentId>,
    pub manager: Option<UserId>,
    pub admin: bool,
}

impl UserView {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            active: true,
            departments: Vec::new(),
            manager: None,
            admin: false,
        }
    }

    pub fn in_department(mut self, dept: DepartmentId) -> Self {
        self.departments.push(dept);
        self
    }

    pub fn with_manager(mut self, manager: UserId) -> Self {
        self.manager = Some(manager);
        self
    }

    pub fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether this user belongs to at least one of the given departments.
    pub fn in_any_department(&self, departments: &[DepartmentId]) -> bool {
        self.departments.iter().any(|d| departments.contains(d))
    }
}

/// Per (user, product) workload rating, consumed read-only by the
/// assignment selector for ranking direct performers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkloadRecord {
    pub user: UserId,
    pub product: ProductId,
    pub rating: u32,
}
