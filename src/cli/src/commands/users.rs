//! User administration.
//!
//! `create` and `update` fill a [`UserForm`] the way the admin form would:
//! every `--role` and `--permission` flag is one checkbox click, so the
//! opposite selection is reconciled after each of them.

use anyhow::Result;
use clap::{Args, Subcommand};
use ideabox_core::forms::UserForm;
use ideabox_core::model::{DepartmentId, PermissionId, RoleId, User, UserId};
use ideabox_core::session::Session;
use serde::Serialize;
use tabled::Tabled;

use super::{confirmed, ensure_valid};
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show one user
    Show {
        /// User ID
        id: u64,
    },

    /// Create a user
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[command(flatten)]
        fields: UserFields,
    },

    /// Update a user; toggles apply to the user's current selection
    Update {
        /// User ID
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[command(flatten)]
        fields: UserFields,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: u64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Ban a user
    Ban {
        /// User ID
        id: u64,
    },

    /// Lift a ban
    Unban {
        /// User ID
        id: u64,
    },
}

/// Toggles and the photo URL shared by create and update.
#[derive(Args, Debug, Default)]
pub struct UserFields {
    /// Toggle a role (repeatable, applied in order)
    #[arg(long = "role")]
    roles: Vec<u64>,

    /// Toggle a permission (repeatable, applied after roles)
    #[arg(long = "permission")]
    permissions: Vec<u64>,

    /// Toggle a department (repeatable)
    #[arg(long = "department")]
    departments: Vec<u64>,

    /// URL of an already hosted profile photo; pass "" to clear it
    #[arg(long)]
    photo: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Departments")]
    departments: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Banned")]
    banned: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            email: user.email.clone(),
            departments: output::names(user.departments.iter().map(|d| d.name.as_str())),
            roles: output::names(user.roles.iter().map(|r| r.role.as_str())),
            banned: output::yes_no(user.is_banned),
        }
    }
}

/// Apply the flags to the form: roles, then permissions, then departments.
fn apply_fields(form: &mut UserForm, fields: UserFields) {
    for id in fields.roles {
        form.toggle_role(RoleId(id));
    }
    for id in fields.permissions {
        form.toggle_permission(PermissionId(id));
    }
    for id in fields.departments {
        form.toggle_department(DepartmentId(id));
    }
    if let Some(url) = fields.photo {
        form.set_photo(Some(url));
    }
}

/// Print the selection the form will submit, by name.
fn print_access(form: &UserForm) {
    let access = form.access();
    let catalog = access.catalog();

    output::print_header("Access");
    output::print_detail(
        "Roles",
        &output::names(
            access
                .role_ids()
                .iter()
                .filter_map(|id| catalog.role(*id))
                .map(|r| r.role.as_str()),
        ),
    );
    output::print_detail(
        "Permissions",
        &output::names(
            access
                .permission_ids()
                .iter()
                .filter_map(|id| catalog.permission(*id))
                .map(|p| p.permission.as_str()),
        ),
    );
    println!();
}

async fn submit(session: &Session, form: &UserForm, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Table = format {
        print_access(form);
    }
    ensure_valid(form, "User")?;

    let user = session.submit_user_form(form).await?;
    match format {
        OutputFormat::Table => {
            let verb = if form.user_id().is_some() { "updated" } else { "created" };
            output::print_success(&format!("User #{} {}: {}", user.id, verb, user.name));
        }
        _ => output::print_item(&user, format)?,
    }
    Ok(())
}

pub async fn execute(cmd: UserCommands, session: &Session, format: OutputFormat) -> Result<()> {
    let client = session.client();

    match cmd {
        UserCommands::List { page } => {
            let users = session.record(client.list_users(page).await)?;
            let rows: Vec<UserRow> = users.data.iter().map(UserRow::from).collect();
            output::print_list(&rows, format)?;
            if let OutputFormat::Table = format {
                output::print_page_footer(&users.meta);
            }
        }

        UserCommands::Show { id } => {
            let user = session.record(client.get_user(UserId(id)).await)?;

            match format {
                OutputFormat::Table => {
                    output::print_header(&format!("User #{}: {}", user.id, user.name));
                    output::print_detail("Email", &user.email);
                    output::print_detail(
                        "Departments",
                        &output::names(user.departments.iter().map(|d| d.name.as_str())),
                    );
                    output::print_detail(
                        "Roles",
                        &output::names(user.roles.iter().map(|r| r.role.as_str())),
                    );
                    output::print_detail(
                        "Permissions",
                        &output::names(user.permissions.iter().map(|p| p.permission.as_str())),
                    );
                    output::print_detail("Banned", &output::yes_no(user.is_banned));
                    if let Some(photo) = &user.photo {
                        output::print_detail("Photo", photo);
                    }
                }
                _ => output::print_item(&user, format)?,
            }
        }

        UserCommands::Create { name, email, fields } => {
            let mut form = session.new_user_form().await?;
            form.set_name(name);
            form.set_email(email);
            apply_fields(&mut form, fields);
            submit(session, &form, format).await?;
        }

        UserCommands::Update {
            id,
            name,
            email,
            fields,
        } => {
            let mut form = session.edit_user_form(UserId(id)).await?;
            if let Some(name) = name {
                form.set_name(name);
            }
            if let Some(email) = email {
                form.set_email(email);
            }
            apply_fields(&mut form, fields);
            submit(session, &form, format).await?;
        }

        UserCommands::Delete { id, force } => {
            if !confirmed(force, &format!("permanently delete user #{}", id)) {
                return Ok(());
            }
            let ack = session.record(client.delete_user(UserId(id)).await)?;
            output::print_success(ack.message_or("User deleted"));
        }

        UserCommands::Ban { id } => {
            let ack = session.record(client.ban_user(UserId(id)).await)?;
            output::print_success(ack.message_or("User banned"));
        }

        UserCommands::Unban { id } => {
            let ack = session.record(client.unban_user(UserId(id)).await)?;
            output::print_success(ack.message_or("User unbanned"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideabox_core::access::RoleCatalog;
    use ideabox_core::model::{Permission, Role};
    use std::sync::Arc;

    fn form() -> UserForm {
        UserForm::new(Arc::new(RoleCatalog::new(vec![
            Role::new(1u64, "Admin", vec![Permission::new(1u64, "manage users"), Permission::new(3u64, "moderate")]),
            Role::new(2u64, "Moderator", vec![Permission::new(3u64, "moderate")]),
        ])))
    }

    #[test]
    fn test_permission_flag_selects_last_granting_role() {
        let mut form = form();
        let fields = UserFields {
            permissions: vec![3],
            ..UserFields::default()
        };
        apply_fields(&mut form, fields);

        assert_eq!(form.access().role_ids(), &[RoleId(2)]);
        assert_eq!(form.access().permission_ids(), &[PermissionId(3)]);
    }

    #[test]
    fn test_role_flags_apply_before_permission_flags() {
        let mut form = form();
        let fields = UserFields {
            roles: vec![1],
            permissions: vec![1],
            departments: vec![4],
            photo: None,
        };
        apply_fields(&mut form, fields);

        // Role 1 grants 1 and 3; unchecking 1 leaves 3, still granted by role 1.
        assert_eq!(form.access().role_ids(), &[RoleId(1)]);
        assert_eq!(form.access().permission_ids(), &[PermissionId(3)]);
        assert_eq!(form.department_ids(), &[DepartmentId(4)]);
    }

    #[test]
    fn test_photo_flag_sets_url() {
        let mut form = form();
        let fields = UserFields {
            photo: Some(" https://media.example.com/ada.png ".into()),
            ..UserFields::default()
        };
        apply_fields(&mut form, fields);
        assert_eq!(form.photo(), Some("https://media.example.com/ada.png"));
    }

    #[test]
    fn test_empty_photo_flag_clears_url() {
        let mut form = form();
        form.set_photo(Some("https://media.example.com/ada.png".into()));
        let fields = UserFields {
            photo: Some(String::new()),
            ..UserFields::default()
        };
        apply_fields(&mut form, fields);
        assert_eq!(form.photo(), None);
    }
}
