//! Role catalog: the roles available in one form session and the indexes the
//! reconciliation passes need.

use std::collections::{HashMap, HashSet};

use crate::model::{Permission, PermissionId, Role, RoleId};

/// Flatten roles into a deduplicated permission list.
///
/// Order follows the roles, then each role's permissions; when a permission
/// appears under several roles the first occurrence wins.
pub fn flatten_permissions(roles: &[Role]) -> Vec<Permission> {
    let mut seen = HashSet::new();
    roles
        .iter()
        .flat_map(|role| role.permissions.iter())
        .filter(|permission| seen.insert(permission.id))
        .cloned()
        .collect()
}

/// Immutable snapshot of the roles fetched for a form session.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    role_index: HashMap<RoleId, usize>,
    /// Permission id -> granting role ids, in catalog order.
    grants: HashMap<PermissionId, Vec<RoleId>>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<Role>) -> Self {
        let permissions = flatten_permissions(&roles);

        let mut role_index = HashMap::with_capacity(roles.len());
        let mut grants: HashMap<PermissionId, Vec<RoleId>> = HashMap::new();
        for (index, role) in roles.iter().enumerate() {
            if role_index.contains_key(&role.id) {
                continue;
            }
            role_index.insert(role.id, index);
            for permission_id in role.permission_ids() {
                let granting = grants.entry(permission_id).or_default();
                if !granting.contains(&role.id) {
                    granting.push(role.id);
                }
            }
        }

        Self {
            roles,
            permissions,
            role_index,
            grants,
        }
    }

    /// All roles, in the order the API returned them.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Deduplicated permissions across all roles.
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.role_index.get(&id).map(|&index| &self.roles[index])
    }

    pub fn permission(&self, id: PermissionId) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.id == id)
    }

    pub fn contains_role(&self, id: RoleId) -> bool {
        self.role_index.contains_key(&id)
    }

    pub fn contains_permission(&self, id: PermissionId) -> bool {
        self.grants.contains_key(&id)
    }

    /// Roles granting a permission, in catalog order. Empty when no role grants it.
    pub fn granting_roles(&self, id: PermissionId) -> &[RoleId] {
        self.grants.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl From<Vec<Role>> for RoleCatalog {
    fn from(roles: Vec<Role>) -> Self {
        Self::new(roles)
    }
}
