//! Roles and permissions as delivered by the API.

use serde::{Deserialize, Serialize};

use super::ids::{PermissionId, RoleId};

/// An atomic capability grant such as "create idea".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    /// Display name.
    pub permission: String,
}

impl Permission {
    pub fn new(id: impl Into<PermissionId>, permission: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            permission: permission.into(),
        }
    }
}

/// A named bundle of permissions assignable to a user.
///
/// The permission list is fixed input fetched from the API; the client never
/// edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Display name.
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(id: impl Into<RoleId>, role: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            permissions,
        }
    }

    /// Check if this role grants a specific permission.
    pub fn grants(&self, permission_id: PermissionId) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }

    /// Ids of the permissions this role grants, in catalog order.
    pub fn permission_ids(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.permissions.iter().map(|p| p.id)
    }
}
