//! Create/edit user form.

use std::sync::Arc;

use reqwest::multipart::Form;
use serde::Serialize;

use crate::access::{AccessSelection, ReconcileOutcome, RoleCatalog};
use crate::error::Result;
use crate::model::{join_ids, DepartmentId, PermissionId, RoleId, User, UserId};
use crate::validation::{
    validate_field, validate_request, Email, MinItems, Required, Url, Validate, ValidationResult,
};

/// State of one create or edit user form.
///
/// Owns the access selection for its lifetime; dropping the form discards it.
#[derive(Debug, Clone)]
pub struct UserForm {
    user_id: Option<UserId>,
    name: String,
    email: String,
    /// URL of an already hosted profile photo.
    photo: Option<String>,
    departments: Vec<DepartmentId>,
    access: AccessSelection,
}

impl UserForm {
    /// Empty form for creating a user.
    pub fn new(catalog: Arc<RoleCatalog>) -> Self {
        Self {
            user_id: None,
            name: String::new(),
            email: String::new(),
            photo: None,
            departments: Vec::new(),
            access: AccessSelection::new(catalog),
        }
    }

    /// Form preloaded with an existing user's details.
    pub fn edit(user: &User, catalog: Arc<RoleCatalog>) -> Self {
        let access = AccessSelection::with_selection(
            catalog,
            user.roles.iter().map(|role| role.id),
            user.permissions.iter().map(|permission| permission.id),
        );

        let mut departments = Vec::with_capacity(user.departments.len());
        for department in &user.departments {
            if !departments.contains(&department.id) {
                departments.push(department.id);
            }
        }

        Self {
            user_id: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            photo: user.photo.clone(),
            departments,
            access,
        }
    }

    /// Id of the user being edited, `None` for a create form.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    /// Set or clear the photo URL. Blank input clears it.
    pub fn set_photo(&mut self, photo: Option<String>) {
        self.photo = photo
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
    }

    pub fn department_ids(&self) -> &[DepartmentId] {
        &self.departments
    }

    /// Check or uncheck a department. Returns whether it is now selected.
    pub fn toggle_department(&mut self, id: DepartmentId) -> bool {
        match self.departments.iter().position(|&d| d == id) {
            Some(index) => {
                self.departments.remove(index);
                false
            }
            None => {
                self.departments.push(id);
                true
            }
        }
    }

    pub fn access(&self) -> &AccessSelection {
        &self.access
    }

    pub fn access_mut(&mut self) -> &mut AccessSelection {
        &mut self.access
    }

    pub fn toggle_role(&mut self, id: RoleId) -> ReconcileOutcome {
        self.access.toggle_role(id)
    }

    pub fn toggle_permission(&mut self, id: PermissionId) -> ReconcileOutcome {
        self.access.toggle_permission(id)
    }

    /// Validate and build the request body.
    pub fn submission(&self) -> ValidationResult<UserSubmission> {
        self.validate()?;

        Ok(UserSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            photo: self.photo.clone(),
            role_ids: self.access.role_ids().to_vec(),
            department_ids: self.departments.clone(),
            permission_ids: self.access.permission_ids().to_vec(),
        })
    }
}

impl Validate for UserForm {
    fn validate(&self) -> ValidationResult<()> {
        let role_ids = self.access.role_ids().to_vec();
        let permission_ids = self.access.permission_ids().to_vec();

        validate_request()
            .field(validate_field("name", &self.name).rule_with_message(Required, "Name is required"))
            .field(
                validate_field("email", &self.email)
                    .stop_on_first()
                    .rule_with_message(Required, "Email is required")
                    .rule_with_message(Email, "Email must be a valid email address"),
            )
            .field(
                validate_field("photo", &self.photo)
                    .rule_with_message(Url, "Photo must be a valid URL"),
            )
            .field(
                validate_field("role_ids", &role_ids)
                    .rule_with_message(MinItems(1), "Select at least one role"),
            )
            .field(
                validate_field("permission_ids", &permission_ids)
                    .rule_with_message(MinItems(1), "Select at least one permission"),
            )
            .field(
                validate_field("department_ids", &self.departments)
                    .rule_with_message(MinItems(1), "Select at least one department"),
            )
            .result()
    }
}

/// Validated body for `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub role_ids: Vec<RoleId>,
    pub department_ids: Vec<DepartmentId>,
    pub permission_ids: Vec<PermissionId>,
}

impl UserSubmission {
    /// Text fields of the multipart body, ids comma-joined in selection order.
    /// `photo` is only sent when the form has one.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.name.clone()), ("email", self.email.clone())];
        if let Some(photo) = &self.photo {
            fields.push(("photo", photo.clone()));
        }
        fields.extend([
            ("role_ids", join_ids(&self.role_ids)),
            ("department_ids", join_ids(&self.department_ids)),
            ("permission_ids", join_ids(&self.permission_ids)),
        ]);
        fields
    }

    pub fn to_multipart(&self) -> Result<Form> {
        Ok(self
            .fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, Permission, Role};

    fn catalog() -> Arc<RoleCatalog> {
        Arc::new(RoleCatalog::new(vec![
            Role::new(
                1,
                "Admin",
                vec![Permission::new(1, "create"), Permission::new(2, "delete")],
            ),
            Role::new(2, "Viewer", vec![Permission::new(3, "read")]),
        ]))
    }

    fn filled_form() -> UserForm {
        let mut form = UserForm::new(catalog());
        form.set_name("Ada Lovelace");
        form.set_email("ada@example.com");
        form.toggle_role(RoleId(1));
        form.toggle_department(DepartmentId(4));
        form
    }

    #[test]
    fn test_empty_form_reports_each_field() {
        let form = UserForm::new(catalog());
        let errors = form.validate().unwrap_err();

        for field in ["name", "email", "role_ids", "permission_ids", "department_ids"] {
            assert!(errors.has_errors(field), "missing error for {field}");
        }
        assert_eq!(errors.get("email").map(Vec::len), Some(1));
    }

    #[test]
    fn test_invalid_email() {
        let mut form = filled_form();
        form.set_email("not-an-email");
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.field_count(), 1);
        assert_eq!(
            errors.get("email").unwrap()[0].message,
            "Email must be a valid email address"
        );
    }

    #[test]
    fn test_submission_fields_are_comma_joined() {
        let mut form = filled_form();
        form.toggle_department(DepartmentId(2));
        let submission = form.submission().unwrap();

        let fields = submission.fields();
        assert!(fields.contains(&("role_ids", "1".to_string())));
        assert!(fields.contains(&("permission_ids", "1,2".to_string())));
        assert!(fields.contains(&("department_ids", "4,2".to_string())));
        assert!(submission.to_multipart().is_ok());
    }

    #[test]
    fn test_toggle_department() {
        let mut form = UserForm::new(catalog());
        assert!(form.toggle_department(DepartmentId(1)));
        assert!(!form.toggle_department(DepartmentId(1)));
        assert!(form.department_ids().is_empty());
    }

    fn grace(photo: Option<&str>) -> User {
        User {
            id: UserId(9),
            name: "Grace".into(),
            email: "grace@example.com".into(),
            photo: photo.map(str::to_string),
            departments: vec![Department {
                id: DepartmentId(3),
                name: "Ops".into(),
            }],
            roles: vec![Role::new(2, "Viewer", vec![Permission::new(3, "read")])],
            permissions: vec![Permission::new(3, "read"), Permission::new(1, "create")],
            is_banned: false,
        }
    }

    #[test]
    fn test_edit_preloads_without_reconciling() {
        let form = UserForm::edit(&grace(None), catalog());
        assert_eq!(form.user_id(), Some(UserId(9)));
        assert_eq!(form.access().role_ids(), &[RoleId(2)]);
        assert_eq!(
            form.access().permission_ids(),
            &[PermissionId(3), PermissionId(1)]
        );
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_edit_submission_keeps_photo_url() {
        let form = UserForm::edit(&grace(Some("https://media.example.com/grace.png")), catalog());
        assert_eq!(form.photo(), Some("https://media.example.com/grace.png"));

        let fields = form.submission().unwrap().fields();
        assert!(fields.contains(&("photo", "https://media.example.com/grace.png".to_string())));
    }

    #[test]
    fn test_photo_omitted_when_unset() {
        let mut form = filled_form();
        form.set_photo(Some("   ".into()));
        assert_eq!(form.photo(), None);

        let fields = form.submission().unwrap().fields();
        assert!(fields.iter().all(|(name, _)| *name != "photo"));
    }

    #[test]
    fn test_invalid_photo_url_rejected() {
        let mut form = filled_form();
        form.set_photo(Some("grace.png".into()));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_count(), 1);
        assert_eq!(errors.get("photo").unwrap()[0].message, "Photo must be a valid URL");
    }
}
