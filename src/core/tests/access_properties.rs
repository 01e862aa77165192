//! Property tests for role/permission reconciliation.

use std::collections::HashSet;
use std::sync::Arc;

use ideabox_core::access::{derive_permissions, AccessSelection, ReconcilePass, RoleCatalog};
use ideabox_core::model::{Permission, PermissionId, Role, RoleId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Toggle {
    Role(u64),
    Permission(u64),
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Role>> {
    prop::collection::vec(prop::collection::vec(1u64..12, 0..5), 1..6).prop_map(|roles| {
        roles
            .into_iter()
            .enumerate()
            .map(|(index, permissions)| {
                let permissions = permissions
                    .into_iter()
                    .map(|id| Permission::new(id, format!("p{id}")))
                    .collect();
                Role::new(index as u64 + 1, format!("r{index}"), permissions)
            })
            .collect()
    })
}

fn toggle_strategy() -> impl Strategy<Value = Toggle> {
    prop_oneof![
        (1u64..8).prop_map(Toggle::Role),
        (1u64..12).prop_map(Toggle::Permission),
    ]
}

proptest! {
    #[test]
    fn role_toggle_always_yields_union(
        roles in catalog_strategy(),
        toggles in prop::collection::vec(toggle_strategy(), 1..20),
    ) {
        let catalog = Arc::new(RoleCatalog::new(roles));
        let mut selection = AccessSelection::new(Arc::clone(&catalog));

        for toggle in toggles {
            match toggle {
                Toggle::Role(id) => {
                    let outcome = selection.toggle_role(RoleId(id));
                    prop_assert_eq!(outcome.pass, ReconcilePass::RoleDriven);

                    let implied: HashSet<PermissionId> =
                        derive_permissions(selection.role_ids(), &catalog).into_iter().collect();
                    let selected: HashSet<PermissionId> =
                        selection.permission_ids().iter().copied().collect();
                    prop_assert_eq!(selected, implied);
                }
                Toggle::Permission(id) => {
                    let was_selected = selection.is_permission_selected(PermissionId(id));
                    let outcome = selection.toggle_permission(PermissionId(id));
                    prop_assert_eq!(outcome.pass, ReconcilePass::PermissionDriven);
                    // The permission toggle itself is never undone.
                    prop_assert_eq!(selection.is_permission_selected(PermissionId(id)), !was_selected);
                    // Every remaining catalog role still has a selected permission.
                    for role in selection.role_ids().iter().filter_map(|&id| catalog.role(id)) {
                        prop_assert!(
                            role.permission_ids().any(|p| selection.is_permission_selected(p)),
                            "role {} kept with nothing selected", role.id
                        );
                    }
                }
            }

            let roles: HashSet<RoleId> = selection.role_ids().iter().copied().collect();
            prop_assert_eq!(roles.len(), selection.role_ids().len());
            let permissions: HashSet<PermissionId> =
                selection.permission_ids().iter().copied().collect();
            prop_assert_eq!(permissions.len(), selection.permission_ids().len());
        }
    }

    #[test]
    fn selected_permission_is_granted_by_a_selected_role(
        roles in catalog_strategy(),
        permissions in prop::collection::vec(1u64..12, 1..10),
    ) {
        let catalog = Arc::new(RoleCatalog::new(roles));
        let mut selection = AccessSelection::new(Arc::clone(&catalog));

        for id in permissions {
            selection.select_permission(PermissionId(id));
        }

        for &permission in selection.permission_ids() {
            if catalog.granting_roles(permission).is_empty() {
                continue;
            }
            let granted = selection
                .role_ids()
                .iter()
                .filter_map(|&id| catalog.role(id))
                .any(|role| role.grants(permission));
            prop_assert!(granted, "permission {} has no granting role selected", permission);
        }
    }
}
