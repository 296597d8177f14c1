use serde::{Deserialize, Serialize};

/// Strong typed IDs used throughout stagegate.
///
/// Entities owned by the core (projects, gates, documents, ledger entries)
/// get freshly generated UUIDs. Entities owned by collaborating systems
/// (users, products, departments, companies) are opaque string keys — the
/// core never generates them, only carries them.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub uuid::Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateId(pub uuid::Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub uuid::Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerEntryId(pub uuid::Uuid);

/// Stable secondary key of a document requirement. The core addresses
/// requirements exclusively by this UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequirementId(pub uuid::Uuid);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub String);

macro_rules! uuid_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

macro_rules! string_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_id!(ProjectId, "prj");
uuid_id!(GateId, "gate");
uuid_id!(DocumentId, "doc");
uuid_id!(LedgerEntryId, "txn");
uuid_id!(RequirementId, "req");

string_id!(UserId, "usr");
string_id!(ProductId, "prod");
string_id!(DepartmentId, "dept");
string_id!(CompanyId, "co");
string_id!(ContactId, "ct");
