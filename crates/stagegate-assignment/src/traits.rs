use stagegate_types::{ProductId, UserId, UserView, WorkloadRecord};

/// Read-only view of the user directory: by-id lookup, manager links,
/// department memberships, and the admin-role flag. Soft-deleted users
/// are simply absent or inactive.
pub trait UserDirectory {
    fn find(&self, id: &UserId) -> Option<UserView>;

    /// Users holding an administrative role, in the directory's stable
    /// enumeration order.
    fn admins(&self) -> Vec<UserId>;
}

/// Read-only view of per-product workload ratings. Implementations must
/// return only non-deleted records, in a stable enumeration order — that
/// order is the documented tie-break for equal top ratings and the source
/// of the "first record" used by the manager fallback.
pub trait WorkloadDirectory {
    fn records_for_product(&self, product: &ProductId) -> Vec<WorkloadRecord>;
}
