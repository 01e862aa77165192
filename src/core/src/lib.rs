#![allow(clippy::result_large_err)]
//! # Idea Box Core
//!
//! Client core for the staff idea box: users submit ideas, vote and comment;
//! administrators manage departments, categories, users, roles and
//! permissions, and moderate content.
//!
//! ## Architecture
//!
//! - **Access**: role catalog plus the two pure reconciliation passes that keep
//!   a user's roles and permissions consistent while either is edited
//! - **Forms**: user and idea form state with field-level validation
//! - **Listing**: the idea list query state machine, search debouncing and
//!   stale-response protection
//! - **API**: typed REST client with per-operation default error messages
//! - **Session**: per-login container for the client and the shared error slot
//! - **Telemetry**: structured logging with secret redaction

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod listing;
pub mod model;
pub mod session;
pub mod telemetry;
pub mod validation;

pub use error::{ErrorCode, ErrorContext, ErrorDetails, ErrorSeverity, IdeaBoxError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::access::{
        derive_permissions, derive_roles, flatten_permissions, AccessSelection, ReconcileOutcome,
        ReconcilePass, RoleCatalog, SelectionSnapshot,
    };
    pub use crate::api::{Acknowledgement, ApiClient};
    pub use crate::config::{ApiConfig, Config, ListingConfig};
    pub use crate::error::{ErrorCode, ErrorContext, ErrorDetails, ErrorSeverity, IdeaBoxError, Result};
    pub use crate::forms::{IdeaDraft, UserForm, UserSubmission};
    pub use crate::listing::{
        Completion, FetchRequest, IdeaListController, IdeaListParams, IdeaListQuery, IdeaSource,
        IdeaTab, ListingEvent, ListingState, RequestToken, SortMode,
    };
    pub use crate::model::{
        Category, CategoryId, Comment, CommentId, Department, DepartmentId, Idea, IdeaId,
        IdeaStatus, Page, PageMeta, Permission, PermissionId, Role, RoleId, User, UserId,
        UserSummary, VoteKind,
    };
    pub use crate::session::Session;
    pub use crate::validation::{Validate, ValidationErrors, ValidationResult};
}
