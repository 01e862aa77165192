//! Role and permission selection with bidirectional reconciliation.
//!
//! A role toggle recomputes permissions from the selected roles; a permission
//! toggle recomputes roles from the selected permissions. Each toggle runs
//! one pass, so the two directions can never feed each other.
//!
//! ```
//! use std::sync::Arc;
//! use ideabox_core::access::{AccessSelection, RoleCatalog};
//! use ideabox_core::model::{Permission, PermissionId, Role, RoleId};
//!
//! let catalog = RoleCatalog::new(vec![
//!     Role::new(1, "Admin", vec![Permission::new(1, "create"), Permission::new(2, "delete")]),
//!     Role::new(2, "Viewer", vec![Permission::new(3, "read")]),
//! ]);
//! let mut selection = AccessSelection::new(Arc::new(catalog));
//!
//! selection.toggle_permission(PermissionId(3));
//! assert_eq!(selection.role_ids(), &[RoleId(2)]);
//! ```

pub mod catalog;
pub mod reconcile;
pub mod selection;

pub use catalog::{flatten_permissions, RoleCatalog};
pub use reconcile::{derive_permissions, derive_roles, same_members};
pub use selection::{AccessSelection, ReconcileOutcome, ReconcilePass, SelectionSnapshot};
