//! Departments and idea categories.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, DepartmentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Body for creating or renaming a department or category.
#[derive(Debug, Clone, Serialize)]
pub struct NamePayload<'a> {
    pub name: &'a str,
}
