//! Pure role/permission reconciliation.
//!
//! Both passes are total functions of their inputs: the selection container
//! calls exactly one of them per toggle and never chains them.

use std::collections::HashSet;
use std::hash::Hash;

use super::catalog::RoleCatalog;
use crate::model::{PermissionId, RoleId};

// ═══════════════════════════════════════════════════════════════════════════════
// ROLE-DRIVEN PASS
// ═══════════════════════════════════════════════════════════════════════════════

/// Permissions implied by a role selection.
///
/// The result replaces the previous permission selection wholesale: it is the
/// union of the selected roles' permissions, ordered by role selection order and
/// then by each role's own permission order. Unknown role ids contribute nothing.
pub fn derive_permissions(roles: &[RoleId], catalog: &RoleCatalog) -> Vec<PermissionId> {
    let mut seen = HashSet::new();
    roles
        .iter()
        .filter_map(|&id| catalog.role(id))
        .flat_map(|role| role.permission_ids())
        .filter(|id| seen.insert(*id))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// PERMISSION-DRIVEN PASS
// ═══════════════════════════════════════════════════════════════════════════════

/// Roles implied by a permission selection, given the role selection it replaces.
///
/// A selected permission that no previously selected role grants adds the last
/// role granting it in catalog order. A previously selected role is removed
/// once none of its permissions remain selected, which includes roles granting
/// nothing. Roles missing from the catalog are never removed.
///
/// Retained roles keep their previous order and added roles follow in discovery
/// order. Callers compare the result with `previous_roles` as a set.
pub fn derive_roles(
    permissions: &[PermissionId],
    catalog: &RoleCatalog,
    previous_roles: &[RoleId],
) -> Vec<RoleId> {
    let selected: HashSet<PermissionId> = permissions.iter().copied().collect();

    let mut added: Vec<RoleId> = Vec::new();
    for &permission_id in permissions {
        let granting = catalog.granting_roles(permission_id);
        if granting.iter().any(|id| previous_roles.contains(id)) {
            continue;
        }
        if let Some(&role_id) = granting.last() {
            if !added.contains(&role_id) {
                added.push(role_id);
            }
        }
    }

    previous_roles
        .iter()
        .copied()
        .filter(|&id| !fully_deselected(id, catalog, &selected))
        .chain(added)
        .collect()
}

fn fully_deselected(role_id: RoleId, catalog: &RoleCatalog, selected: &HashSet<PermissionId>) -> bool {
    catalog
        .role(role_id)
        .is_some_and(|role| role.permission_ids().all(|id| !selected.contains(&id)))
}

/// Set equality of two id lists, ignoring order and duplicates.
pub fn same_members<T: Eq + Hash>(left: &[T], right: &[T]) -> bool {
    let left: HashSet<&T> = left.iter().collect();
    let right: HashSet<&T> = right.iter().collect();
    left == right
}
