//! Validation rules used by the idea box forms.
//!
//! - Required field validation
//! - String length constraints
//! - Format validation (email, URL)
//! - Collection size and uniqueness constraints

use crate::validation::error::{FieldError, ValidationErrorKind};
use regex::Regex;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::LazyLock;

// ═══════════════════════════════════════════════════════════════════════════════
// Pre-compiled Regex Patterns
// ═══════════════════════════════════════════════════════════════════════════════

/// Email validation regex (RFC 5322 simplified).
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("Invalid email regex")
});

/// URL validation regex.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:localhost\b|(?:www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b)(?:[-a-zA-Z0-9()@:%_\+.~#?&/=]*)$"
    ).expect("Invalid URL regex")
});

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Rule Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// A validation rule that can be applied to a value.
pub trait ValidationRule<T> {
    /// Validate the value and return any errors.
    fn validate(&self, value: &T) -> Option<FieldError>;

    /// Get a description of this rule.
    fn description(&self) -> String;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Required Field Rule
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates a field is present and non-empty.
#[derive(Debug, Clone)]
pub struct Required;

impl ValidationRule<String> for Required {
    fn validate(&self, value: &String) -> Option<FieldError> {
        if value.trim().is_empty() {
            Some(FieldError::new(ValidationErrorKind::Required))
        } else {
            None
        }
    }

    fn description(&self) -> String {
        "field is required".to_string()
    }
}

impl<T> ValidationRule<Vec<T>> for Required {
    fn validate(&self, value: &Vec<T>) -> Option<FieldError> {
        if value.is_empty() {
            Some(FieldError::new(ValidationErrorKind::Required))
        } else {
            None
        }
    }

    fn description(&self) -> String {
        "field is required".to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// String Length Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates string maximum length.
#[derive(Debug, Clone)]
pub struct MaxLength(pub usize);

impl ValidationRule<String> for MaxLength {
    fn validate(&self, value: &String) -> Option<FieldError> {
        let len = value.chars().count();
        if len > self.0 {
            Some(FieldError::new(ValidationErrorKind::MaxLength {
                max: self.0,
                actual: len,
            }))
        } else {
            None
        }
    }

    fn description(&self) -> String {
        format!("maximum length: {}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Format Validation Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates email format. Empty values pass; pair with `Required`.
#[derive(Debug, Clone, Default)]
pub struct Email;

impl ValidationRule<String> for Email {
    fn validate(&self, value: &String) -> Option<FieldError> {
        if value.is_empty() || EMAIL_REGEX.is_match(value.trim()) {
            None
        } else {
            Some(FieldError::new(ValidationErrorKind::InvalidEmail))
        }
    }

    fn description(&self) -> String {
        "valid email format".to_string()
    }
}

/// Rule that validates URL format.
#[derive(Debug, Clone, Default)]
pub struct Url;

impl ValidationRule<String> for Url {
    fn validate(&self, value: &String) -> Option<FieldError> {
        if value.is_empty() || URL_REGEX.is_match(value) {
            None
        } else {
            Some(FieldError::new(ValidationErrorKind::InvalidUrl))
        }
    }

    fn description(&self) -> String {
        "valid URL format".to_string()
    }
}

impl ValidationRule<Option<String>> for Url {
    fn validate(&self, value: &Option<String>) -> Option<FieldError> {
        match value {
            Some(s) => <Url as ValidationRule<String>>::validate(self, s),
            None => None,
        }
    }

    fn description(&self) -> String {
        "valid URL format".to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Collection Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates minimum number of items in a collection.
#[derive(Debug, Clone)]
pub struct MinItems(pub usize);

impl<T> ValidationRule<Vec<T>> for MinItems {
    fn validate(&self, value: &Vec<T>) -> Option<FieldError> {
        if value.len() < self.0 {
            Some(FieldError::new(ValidationErrorKind::MinItems {
                min: self.0,
                actual: value.len(),
            }))
        } else {
            None
        }
    }

    fn description(&self) -> String {
        format!("minimum {} items", self.0)
    }
}

/// Rule that validates no duplicate items in a collection.
#[derive(Debug, Clone, Default)]
pub struct UniqueItems;

impl<T: Eq + Hash> ValidationRule<Vec<T>> for UniqueItems {
    fn validate(&self, value: &Vec<T>) -> Option<FieldError> {
        let set: HashSet<&T> = value.iter().collect();
        if set.len() != value.len() {
            Some(FieldError::new(ValidationErrorKind::DuplicateItems))
        } else {
            None
        }
    }

    fn description(&self) -> String {
        "unique items only".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string_trims() {
        assert!(Required.validate(&"   ".to_string()).is_some());
        assert!(Required.validate(&"Ada".to_string()).is_none());
    }

    #[test]
    fn test_required_vec() {
        let empty: Vec<u64> = vec![];
        assert!(Required.validate(&empty).is_some());
        assert!(Required.validate(&vec![1u64]).is_none());
    }

    #[test]
    fn test_email() {
        assert!(Email.validate(&"staff@example.com".to_string()).is_none());
        assert!(Email.validate(&"not-an-email".to_string()).is_some());
        assert!(Email.validate(&String::new()).is_none());
    }

    #[test]
    fn test_url_optional() {
        assert!(Url.validate(&None::<String>).is_none());
        assert!(Url
            .validate(&Some("https://media.example.com/u/1.png".to_string()))
            .is_none());
        assert!(Url.validate(&Some("ftp:/nope".to_string())).is_some());
        assert!(Url.validate(&"http://localhost:8000/api".to_string()).is_none());
    }

    #[test]
    fn test_max_length_counts_chars() {
        assert!(MaxLength(3).validate(&"héé".to_string()).is_none());
        assert!(MaxLength(2).validate(&"héé".to_string()).is_some());
    }

    #[test]
    fn test_unique_items() {
        assert!(UniqueItems.validate(&vec![1, 2, 3]).is_none());
        assert!(UniqueItems.validate(&vec![1, 2, 1]).is_some());
    }
}
