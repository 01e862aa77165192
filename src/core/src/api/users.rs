//! User administration plus the role and permission catalogs.

use serde::Serialize;

use super::client::{Acknowledgement, ApiClient};
use crate::error::Result;
use crate::forms::UserSubmission;
use crate::model::{Page, Permission, Role, User, UserId};

#[derive(Serialize)]
struct PageQuery {
    page: u32,
}

impl ApiClient {
    pub async fn list_users(&self, page: u32) -> Result<Page<User>> {
        self.get_page("/users", &PageQuery { page: page.max(1) }, "Failed to load users")
            .await
    }

    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.get(&format!("/users/{id}"), "Failed to load user").await
    }

    /// `POST /users` as multipart.
    pub async fn create_user(&self, submission: &UserSubmission) -> Result<User> {
        let form = submission.to_multipart()?;
        self.post_multipart("/users", form, "Failed to create user").await
    }

    /// `PUT /users/{id}` as multipart.
    pub async fn update_user(&self, id: UserId, submission: &UserSubmission) -> Result<User> {
        let form = submission.to_multipart()?;
        self.put_multipart(&format!("/users/{id}"), form, "Failed to update user")
            .await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<Acknowledgement> {
        self.delete(&format!("/users/{id}"), "Failed to delete user").await
    }

    pub async fn ban_user(&self, id: UserId) -> Result<Acknowledgement> {
        self.post_action::<()>(&format!("/users/{id}/ban"), None, "Failed to ban user")
            .await
    }

    pub async fn unban_user(&self, id: UserId) -> Result<Acknowledgement> {
        self.post_action::<()>(&format!("/users/{id}/unban"), None, "Failed to unban user")
            .await
    }

    /// All roles with their permissions.
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.get("/roles", "Failed to load roles").await
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        self.get("/permissions", "Failed to load permissions").await
    }
}
