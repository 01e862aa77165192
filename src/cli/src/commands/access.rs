//! Role and permission listings.

use anyhow::Result;
use ideabox_core::access::RoleCatalog;
use ideabox_core::model::Permission;
use ideabox_core::session::Session;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Permissions")]
    permissions: String,
}

#[derive(Debug, Serialize, Tabled)]
struct PermissionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Permission")]
    permission: String,
    #[tabled(rename = "Granted By")]
    granted_by: String,
}

fn role_rows(catalog: &RoleCatalog) -> Vec<RoleRow> {
    catalog
        .roles()
        .iter()
        .map(|role| RoleRow {
            id: role.id.get(),
            role: role.role.clone(),
            permissions: output::names(role.permissions.iter().map(|p| p.permission.as_str())),
        })
        .collect()
}

fn permission_rows(permissions: &[Permission], catalog: &RoleCatalog) -> Vec<PermissionRow> {
    permissions
        .iter()
        .map(|permission| PermissionRow {
            id: permission.id.get(),
            permission: permission.permission.clone(),
            granted_by: output::names(
                catalog
                    .granting_roles(permission.id)
                    .iter()
                    .filter_map(|id| catalog.role(*id))
                    .map(|role| role.role.as_str()),
            ),
        })
        .collect()
}

pub async fn roles(session: &Session, format: OutputFormat) -> Result<()> {
    let catalog = session.role_catalog().await?;
    output::print_list(&role_rows(&catalog), format)
}

/// Every permission with the roles that grant it.
pub async fn permissions(session: &Session, format: OutputFormat) -> Result<()> {
    let (permissions, catalog) = tokio::try_join!(
        async { session.record(session.client().list_permissions().await) },
        session.role_catalog(),
    )?;
    output::print_list(&permission_rows(&permissions, &catalog), format)
}
