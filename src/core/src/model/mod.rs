//! Idea box domain model: typed ids and the records exchanged with the API.

pub mod access;
pub mod idea;
pub mod ids;
pub mod org;
pub mod page;
pub mod user;

pub use access::{Permission, Role};
pub use idea::{Comment, Idea, IdeaStatus, VoteKind};
pub use ids::{join_ids, CategoryId, CommentId, DepartmentId, IdeaId, PermissionId, RoleId, UserId};
pub use org::{Category, Department, NamePayload};
pub use page::{Page, PageMeta};
pub use user::{User, UserSummary};
