//! Department and category administration.
//!
//! Both are plain named records with the same four operations, so one
//! subcommand set serves both.

use anyhow::Result;
use clap::Subcommand;
use ideabox_core::model::{CategoryId, DepartmentId};
use ideabox_core::session::Session;
use serde::Serialize;
use tabled::Tabled;

use super::confirmed;
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum OrgCommands {
    /// List all records
    List,

    /// Create a record
    Create {
        /// Display name
        name: String,
    },

    /// Rename a record
    Rename {
        /// Record ID
        id: u64,
        /// New display name
        name: String,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: u64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Which collection an [`OrgCommands`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgKind {
    Department,
    Category,
}

impl OrgKind {
    fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Category => "Category",
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct NamedRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

async fn list(kind: OrgKind, session: &Session) -> Result<Vec<NamedRow>> {
    let client = session.client();
    let rows = match kind {
        OrgKind::Department => session
            .record(client.list_departments().await)?
            .into_iter()
            .map(|d| NamedRow { id: d.id.get(), name: d.name })
            .collect(),
        OrgKind::Category => session
            .record(client.list_categories().await)?
            .into_iter()
            .map(|c| NamedRow { id: c.id.get(), name: c.name })
            .collect(),
    };
    Ok(rows)
}

async fn create(kind: OrgKind, session: &Session, name: &str) -> Result<NamedRow> {
    let client = session.client();
    let row = match kind {
        OrgKind::Department => {
            let d = session.record(client.create_department(name).await)?;
            NamedRow { id: d.id.get(), name: d.name }
        }
        OrgKind::Category => {
            let c = session.record(client.create_category(name).await)?;
            NamedRow { id: c.id.get(), name: c.name }
        }
    };
    Ok(row)
}

async fn rename(kind: OrgKind, session: &Session, id: u64, name: &str) -> Result<NamedRow> {
    let client = session.client();
    let row = match kind {
        OrgKind::Department => {
            let d = session.record(client.update_department(DepartmentId(id), name).await)?;
            NamedRow { id: d.id.get(), name: d.name }
        }
        OrgKind::Category => {
            let c = session.record(client.update_category(CategoryId(id), name).await)?;
            NamedRow { id: c.id.get(), name: c.name }
        }
    };
    Ok(row)
}

pub async fn execute(
    kind: OrgKind,
    cmd: OrgCommands,
    session: &Session,
    format: OutputFormat,
) -> Result<()> {
    match cmd {
        OrgCommands::List => {
            let rows = list(kind, session).await?;
            output::print_list(&rows, format)?;
        }

        OrgCommands::Create { name } => {
            let row = create(kind, session, &name).await?;
            match format {
                OutputFormat::Table => output::print_success(&format!(
                    "{} #{} created: {}",
                    kind.label(),
                    row.id,
                    row.name
                )),
                _ => output::print_item(&row, format)?,
            }
        }

        OrgCommands::Rename { id, name } => {
            let row = rename(kind, session, id, &name).await?;
            match format {
                OutputFormat::Table => output::print_success(&format!(
                    "{} #{} renamed to {}",
                    kind.label(),
                    row.id,
                    row.name
                )),
                _ => output::print_item(&row, format)?,
            }
        }

        OrgCommands::Delete { id, force } => {
            let action = format!("permanently delete {} #{}", kind.label().to_lowercase(), id);
            if !confirmed(force, &action) {
                return Ok(());
            }

            let client = session.client();
            let ack = match kind {
                OrgKind::Department => {
                    session.record(client.delete_department(DepartmentId(id)).await)?
                }
                OrgKind::Category => session.record(client.delete_category(CategoryId(id)).await)?,
            };
            output::print_success(ack.message_or(&format!("{} deleted", kind.label())));
        }
    }

    Ok(())
}
