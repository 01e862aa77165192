//! Integration tests for role/permission reconciliation.
//!
//! Tests cover:
//! - Catalog derivation
//! - Role-driven and permission-driven passes through the selection container
//! - Tie-break and auto-removal rules
//! - The full create-user walkthrough

use std::sync::Arc;

use ideabox_core::access::{
    derive_permissions, flatten_permissions, AccessSelection, ReconcilePass, RoleCatalog,
};
use ideabox_core::model::{Permission, PermissionId, Role, RoleId};

fn role_ids(ids: &[u64]) -> Vec<RoleId> {
    ids.iter().copied().map(RoleId).collect()
}

fn permission_ids(ids: &[u64]) -> Vec<PermissionId> {
    ids.iter().copied().map(PermissionId).collect()
}

fn admin_viewer_catalog() -> Arc<RoleCatalog> {
    Arc::new(RoleCatalog::new(vec![
        Role::new(
            1,
            "Admin",
            vec![Permission::new(1, "create"), Permission::new(2, "delete")],
        ),
        Role::new(2, "Viewer", vec![Permission::new(3, "read")]),
    ]))
}

fn shared_permission_catalog() -> Arc<RoleCatalog> {
    Arc::new(RoleCatalog::new(vec![
        Role::new(10, "Moderator", vec![Permission::new(7, "hide idea")]),
        Role::new(11, "Department head", vec![Permission::new(7, "hide idea")]),
    ]))
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_catalog_derivation_is_idempotent() {
    let roles = vec![
        Role::new(1, "A", vec![Permission::new(2, "x"), Permission::new(1, "y")]),
        Role::new(2, "B", vec![Permission::new(1, "y"), Permission::new(3, "z")]),
    ];

    let first = flatten_permissions(&roles);
    let second = flatten_permissions(&roles);

    assert_eq!(first, second);
    let ids: Vec<u64> = first.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

// ============================================================================
// Walkthrough
// ============================================================================

#[test]
fn test_create_user_walkthrough() {
    let mut selection = AccessSelection::new(admin_viewer_catalog());

    let outcome = selection.toggle_permission(PermissionId(3));
    assert_eq!(outcome.pass, ReconcilePass::PermissionDriven);
    assert_eq!(selection.role_ids(), role_ids(&[2]).as_slice());
    assert_eq!(selection.permission_ids(), permission_ids(&[3]).as_slice());

    // No selected role grants permission 1, so Admin is added.
    selection.toggle_permission(PermissionId(1));
    let mut roles = selection.role_ids().to_vec();
    roles.sort();
    assert_eq!(roles, role_ids(&[1, 2]));
    let mut permissions = selection.permission_ids().to_vec();
    permissions.sort();
    assert_eq!(permissions, permission_ids(&[1, 3]));

    // Unchecking Viewer replaces permissions with Admin's full set, dropping 3.
    let outcome = selection.toggle_role(RoleId(2));
    assert_eq!(outcome.pass, ReconcilePass::RoleDriven);
    assert!(outcome.changed);
    assert_eq!(selection.role_ids(), role_ids(&[1]).as_slice());
    assert_eq!(selection.permission_ids(), permission_ids(&[1, 2]).as_slice());
}

// ============================================================================
// Rule Tests
// ============================================================================

#[test]
fn test_last_granting_role_wins() {
    let mut selection = AccessSelection::new(shared_permission_catalog());
    selection.toggle_permission(PermissionId(7));
    assert_eq!(selection.role_ids(), role_ids(&[11]).as_slice());
}

#[test]
fn test_auto_removal_when_permission_unchecked() {
    let mut selection = AccessSelection::new(admin_viewer_catalog());
    selection.toggle_permission(PermissionId(3));
    assert_eq!(selection.role_ids(), role_ids(&[2]).as_slice());

    let outcome = selection.toggle_permission(PermissionId(3));
    assert!(outcome.changed);
    assert!(selection.role_ids().is_empty());
    assert!(selection.permission_ids().is_empty());
}

#[test]
fn test_role_granting_nothing_removed_by_permission_toggle() {
    let catalog = Arc::new(RoleCatalog::new(vec![
        Role::new(1, "Guest", vec![]),
        Role::new(2, "Viewer", vec![Permission::new(3, "read")]),
    ]));
    let mut selection = AccessSelection::new(catalog);

    selection.toggle_role(RoleId(1));
    assert_eq!(selection.role_ids(), role_ids(&[1]).as_slice());
    assert!(selection.permission_ids().is_empty());

    selection.toggle_permission(PermissionId(3));
    assert_eq!(selection.role_ids(), role_ids(&[2]).as_slice());

    selection.toggle_permission(PermissionId(3));
    assert!(selection.role_ids().is_empty());
    assert!(selection.permission_ids().is_empty());
}

#[test]
fn test_role_survives_while_one_permission_remains() {
    let mut selection = AccessSelection::new(admin_viewer_catalog());
    selection.toggle_role(RoleId(1));
    selection.toggle_permission(PermissionId(1));

    assert_eq!(selection.role_ids(), role_ids(&[1]).as_slice());
    assert_eq!(selection.permission_ids(), permission_ids(&[2]).as_slice());
}

#[test]
fn test_role_toggle_yields_exact_union() {
    let catalog = admin_viewer_catalog();
    let mut selection = AccessSelection::new(Arc::clone(&catalog));
    selection.toggle_role(RoleId(2));
    selection.toggle_role(RoleId(1));

    assert_eq!(
        selection.permission_ids(),
        derive_permissions(selection.role_ids(), &catalog).as_slice()
    );
    assert_eq!(selection.permission_ids(), permission_ids(&[3, 1, 2]).as_slice());
}

#[test]
fn test_each_toggle_runs_one_pass() {
    let mut selection = AccessSelection::new(admin_viewer_catalog());
    let passes = [
        selection.toggle_role(RoleId(1)).pass,
        selection.toggle_permission(PermissionId(2)).pass,
        selection.toggle_role(RoleId(2)).pass,
        selection.toggle_permission(PermissionId(3)).pass,
    ];

    assert_eq!(
        passes,
        [
            ReconcilePass::RoleDriven,
            ReconcilePass::PermissionDriven,
            ReconcilePass::RoleDriven,
            ReconcilePass::PermissionDriven,
        ]
    );
}

#[test]
fn test_unknown_ids_are_tolerated() {
    let mut selection = AccessSelection::new(admin_viewer_catalog());

    let outcome = selection.toggle_permission(PermissionId(99));
    assert!(!outcome.changed);
    assert!(selection.role_ids().is_empty());

    let outcome = selection.toggle_role(RoleId(42));
    // Unknown role implies nothing, so the stray permission is dropped.
    assert!(outcome.changed);
    assert!(selection.permission_ids().is_empty());
    assert_eq!(selection.role_ids(), role_ids(&[42]).as_slice());
}
