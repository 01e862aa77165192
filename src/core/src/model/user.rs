//! Staff user records.

use serde::{Deserialize, Serialize};

use super::access::{Permission, Role};
use super::ids::UserId;
use super::org::Department;

/// The short author form embedded in ideas and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// A staff user as returned by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Permissions granted to the user, including any added beyond role defaults.
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub is_banned: bool,
}
