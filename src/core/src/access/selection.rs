//! Per-form role and permission selection.

use std::sync::Arc;

use serde::Serialize;

use super::catalog::RoleCatalog;
use super::reconcile::{derive_permissions, derive_roles, same_members};
use crate::model::{PermissionId, RoleId};

/// Which reconciliation pass a toggle ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePass {
    /// A role changed; permissions were recomputed from roles.
    RoleDriven,
    /// A permission changed; roles were recomputed from permissions.
    PermissionDriven,
}

/// Result of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub pass: ReconcilePass,
    /// Whether the opposing selection was replaced.
    pub changed: bool,
}

/// Read-only copy of a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub role_ids: Vec<RoleId>,
    pub permission_ids: Vec<PermissionId>,
}

/// Role and permission selection owned by one form.
///
/// Every toggle records the raw change and then runs exactly one pass in the
/// opposite dimension, so nothing is ever left pending between calls.
#[derive(Debug, Clone)]
pub struct AccessSelection {
    catalog: Arc<RoleCatalog>,
    roles: Vec<RoleId>,
    permissions: Vec<PermissionId>,
}

impl AccessSelection {
    pub fn new(catalog: Arc<RoleCatalog>) -> Self {
        Self {
            catalog,
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Install an existing selection (edit forms) without reconciling it.
    pub fn with_selection(
        catalog: Arc<RoleCatalog>,
        roles: impl IntoIterator<Item = RoleId>,
        permissions: impl IntoIterator<Item = PermissionId>,
    ) -> Self {
        let mut selection = Self::new(catalog);
        for id in roles {
            if !selection.roles.contains(&id) {
                selection.roles.push(id);
            }
        }
        for id in permissions {
            if !selection.permissions.contains(&id) {
                selection.permissions.push(id);
            }
        }
        selection
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn role_ids(&self) -> &[RoleId] {
        &self.roles
    }

    pub fn permission_ids(&self) -> &[PermissionId] {
        &self.permissions
    }

    pub fn is_role_selected(&self, id: RoleId) -> bool {
        self.roles.contains(&id)
    }

    pub fn is_permission_selected(&self, id: PermissionId) -> bool {
        self.permissions.contains(&id)
    }

    /// Check or uncheck a role, then recompute permissions from roles.
    pub fn toggle_role(&mut self, id: RoleId) -> ReconcileOutcome {
        toggle(&mut self.roles, id);

        let implied = derive_permissions(&self.roles, &self.catalog);
        let changed = !same_members(&implied, &self.permissions);
        if changed {
            self.permissions = implied;
        }

        tracing::debug!(
            role_id = %id,
            roles = self.roles.len(),
            permissions = self.permissions.len(),
            changed,
            "Role toggled"
        );

        ReconcileOutcome {
            pass: ReconcilePass::RoleDriven,
            changed,
        }
    }

    /// Check or uncheck a permission, then recompute roles from permissions.
    pub fn toggle_permission(&mut self, id: PermissionId) -> ReconcileOutcome {
        toggle(&mut self.permissions, id);

        let derived = derive_roles(&self.permissions, &self.catalog, &self.roles);
        let changed = !same_members(&derived, &self.roles);
        if changed {
            self.roles = derived;
        }

        tracing::debug!(
            permission_id = %id,
            roles = self.roles.len(),
            permissions = self.permissions.len(),
            changed,
            "Permission toggled"
        );

        ReconcileOutcome {
            pass: ReconcilePass::PermissionDriven,
            changed,
        }
    }

    /// Ensure a role is checked. Returns `None` when it already was.
    pub fn select_role(&mut self, id: RoleId) -> Option<ReconcileOutcome> {
        (!self.is_role_selected(id)).then(|| self.toggle_role(id))
    }

    /// Ensure a role is unchecked. Returns `None` when it already was.
    pub fn deselect_role(&mut self, id: RoleId) -> Option<ReconcileOutcome> {
        self.is_role_selected(id).then(|| self.toggle_role(id))
    }

    /// Ensure a permission is checked. Returns `None` when it already was.
    pub fn select_permission(&mut self, id: PermissionId) -> Option<ReconcileOutcome> {
        (!self.is_permission_selected(id)).then(|| self.toggle_permission(id))
    }

    /// Ensure a permission is unchecked. Returns `None` when it already was.
    pub fn deselect_permission(&mut self, id: PermissionId) -> Option<ReconcileOutcome> {
        self.is_permission_selected(id).then(|| self.toggle_permission(id))
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            role_ids: self.roles.clone(),
            permission_ids: self.permissions.clone(),
        }
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|existing| *existing == item) {
        Some(index) => {
            items.remove(index);
        }
        None => items.push(item),
    }
}
