//! New idea form.

use serde::{Deserialize, Serialize};

use crate::model::CategoryId;
use crate::validation::{
    validate_field, validate_request, MaxLength, MinItems, Required, UniqueItems, Validate,
    ValidationResult,
};

pub const MAX_TITLE_LENGTH: usize = 255;

/// Body for `POST /ideas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub category_ids: Vec<CategoryId>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl IdeaDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        for id in ids {
            if !self.category_ids.contains(&id) {
                self.category_ids.push(id);
            }
        }
        self
    }

    pub fn anonymous(mut self, is_anonymous: bool) -> Self {
        self.is_anonymous = is_anonymous;
        self
    }

    /// Check or uncheck a category. Returns whether it is now selected.
    pub fn toggle_category(&mut self, id: CategoryId) -> bool {
        match self.category_ids.iter().position(|&c| c == id) {
            Some(index) => {
                self.category_ids.remove(index);
                false
            }
            None => {
                self.category_ids.push(id);
                true
            }
        }
    }
}

impl Validate for IdeaDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_request()
            .field(
                validate_field("title", &self.title)
                    .stop_on_first()
                    .rule_with_message(Required, "Title is required")
                    .rule(MaxLength(MAX_TITLE_LENGTH)),
            )
            .field(
                validate_field("description", &self.description)
                    .rule_with_message(Required, "Description is required"),
            )
            .field(
                validate_field("category_ids", &self.category_ids)
                    .stop_on_first()
                    .rule_with_message(MinItems(1), "Select at least one category")
                    .rule(UniqueItems),
            )
            .result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_valid_draft() {
        let draft = IdeaDraft::new("Quiet room", "A room without meetings")
            .with_categories([CategoryId(2), CategoryId(2)]);
        assert!(draft.is_valid());
        assert_eq!(draft.category_ids, vec![CategoryId(2)]);
    }

    #[test]
    fn test_missing_fields() {
        let errors = IdeaDraft::default().validate().unwrap_err();
        assert!(errors.has_errors("title"));
        assert!(errors.has_errors("description"));
        assert!(errors.has_errors("category_ids"));
    }

    #[test]
    fn test_title_too_long() {
        let draft = IdeaDraft::new("x".repeat(256), "body").with_categories([CategoryId(1)]);
        let errors = draft.validate().unwrap_err();
        assert!(matches!(
            errors.get("title").unwrap()[0].kind,
            ValidationErrorKind::MaxLength { max: 255, .. }
        ));
    }

    #[test]
    fn test_duplicate_categories_rejected() {
        let mut draft = IdeaDraft::new("t", "d");
        draft.category_ids = vec![CategoryId(1), CategoryId(1)];
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get("category_ids").unwrap()[0].kind,
            ValidationErrorKind::DuplicateItems
        );
    }

    #[test]
    fn test_serializes_category_ids_as_array() {
        let draft = IdeaDraft::new("t", "d")
            .with_categories([CategoryId(1), CategoryId(3)])
            .anonymous(true);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["category_ids"], serde_json::json!([1, 3]));
        assert_eq!(json["is_anonymous"], true);
    }

    #[test]
    fn test_toggle_category() {
        let mut draft = IdeaDraft::default();
        assert!(draft.toggle_category(CategoryId(5)));
        assert!(!draft.toggle_category(CategoryId(5)));
    }
}
