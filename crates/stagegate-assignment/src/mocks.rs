use crate::traits::{UserDirectory, WorkloadDirectory};
use stagegate_types::{ProductId, UserId, UserView, WorkloadRecord};

/// In-memory user and workload directory for tests and the reference
/// store. Insertion order is the enumeration order, which makes the
/// selector's tie-break and "first record" semantics deterministic.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    users: Vec<UserView>,
    ratings: Vec<WorkloadRecord>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: UserView) {
        self.users.push(user);
    }

    pub fn add_rating(&mut self, user: UserId, product: ProductId, rating: u32) {
        self.ratings.push(WorkloadRecord {
            user,
            product,
            rating,
        });
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find(&self, id: &UserId) -> Option<UserView> {
        self.users.iter().find(|u| u.id == *id).cloned()
    }

    fn admins(&self) -> Vec<UserId> {
        self.users
            .iter()
            .filter(|u| u.admin)
            .map(|u| u.id.clone())
            .collect()
    }
}

impl WorkloadDirectory for InMemoryDirectory {
    fn records_for_product(&self, product: &ProductId) -> Vec<WorkloadRecord> {
        self.ratings
            .iter()
            .filter(|r| r.product == *product)
            .cloned()
            .collect()
    }
}
