//! Department and category administration.

use super::client::{Acknowledgement, ApiClient};
use crate::error::{IdeaBoxError, Result};
use crate::model::{Category, CategoryId, Department, DepartmentId, NamePayload};

fn checked_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(IdeaBoxError::validation("Name is required"));
    }
    Ok(name)
}

impl ApiClient {
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        self.get("/departments", "Failed to load departments").await
    }

    pub async fn create_department(&self, name: &str) -> Result<Department> {
        let name = checked_name(name)?;
        self.post("/departments", &NamePayload { name }, "Failed to create department")
            .await
    }

    pub async fn update_department(&self, id: DepartmentId, name: &str) -> Result<Department> {
        let name = checked_name(name)?;
        self.put(
            &format!("/departments/{id}"),
            &NamePayload { name },
            "Failed to update department",
        )
        .await
    }

    pub async fn delete_department(&self, id: DepartmentId) -> Result<Acknowledgement> {
        self.delete(&format!("/departments/{id}"), "Failed to delete department")
            .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get("/categories", "Failed to load categories").await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let name = checked_name(name)?;
        self.post("/categories", &NamePayload { name }, "Failed to create category")
            .await
    }

    pub async fn update_category(&self, id: CategoryId, name: &str) -> Result<Category> {
        let name = checked_name(name)?;
        self.put(
            &format!("/categories/{id}"),
            &NamePayload { name },
            "Failed to update category",
        )
        .await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<Acknowledgement> {
        self.delete(&format!("/categories/{id}"), "Failed to delete category")
            .await
    }
}
