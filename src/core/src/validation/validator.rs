//! Validator trait and builders.
//!
//! - `Validate` trait for synchronous validation
//! - `FieldValidator` for building field-level validation chains
//! - `RequestValidator` for validating whole forms

use crate::validation::error::{FieldError, ValidationErrors, ValidationResult};
use crate::validation::rules::ValidationRule;

// ═══════════════════════════════════════════════════════════════════════════════
// Validate Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait for types that can be validated.
pub trait Validate {
    /// Validate this object and return any validation errors.
    fn validate(&self) -> ValidationResult<()>;

    /// Check if this object is valid without returning detailed errors.
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// A builder for validating a single field with multiple rules.
pub struct FieldValidator<'a, T> {
    field_name: &'a str,
    value: &'a T,
    errors: Vec<FieldError>,
    stop_on_first_error: bool,
}

impl<'a, T> FieldValidator<'a, T> {
    /// Create a new field validator.
    pub fn new(field_name: &'a str, value: &'a T) -> Self {
        Self {
            field_name,
            value,
            errors: Vec::new(),
            stop_on_first_error: false,
        }
    }

    /// Stop validation on the first error (fail-fast mode).
    pub fn stop_on_first(mut self) -> Self {
        self.stop_on_first_error = true;
        self
    }

    /// Apply a validation rule.
    pub fn rule<R: ValidationRule<T>>(mut self, rule: R) -> Self {
        if self.stop_on_first_error && !self.errors.is_empty() {
            return self;
        }

        if let Some(error) = rule.validate(self.value) {
            self.errors.push(error);
        }
        self
    }

    /// Apply a validation rule, replacing its message with one written for the form.
    pub fn rule_with_message<R: ValidationRule<T>>(mut self, rule: R, message: &str) -> Self {
        if self.stop_on_first_error && !self.errors.is_empty() {
            return self;
        }

        if let Some(error) = rule.validate(self.value) {
            self.errors.push(FieldError::with_message(error.kind, message));
        }
        self
    }

    /// Get the field name.
    pub fn field_name(&self) -> &str {
        self.field_name
    }

    /// Check if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the validator and return the errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Convert to a ValidationResult.
    pub fn result(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            let mut validation_errors = ValidationErrors::new();
            for error in self.errors {
                validation_errors.add(self.field_name, error);
            }
            Err(validation_errors)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Request Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// A builder for validating entire forms with multiple fields.
pub struct RequestValidator {
    errors: ValidationErrors,
}

impl RequestValidator {
    /// Create a new request validator.
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    /// Validate a field and collect any errors.
    pub fn field<T>(mut self, validator: FieldValidator<'_, T>) -> Self {
        let field_name = validator.field_name().to_string();
        for error in validator.into_errors() {
            self.errors.add(&field_name, error);
        }
        self
    }

    /// Check if validation passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to a ValidationResult.
    pub fn result(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Start validating a single field.
pub fn validate_field<'a, T>(field_name: &'a str, value: &'a T) -> FieldValidator<'a, T> {
    FieldValidator::new(field_name, value)
}

/// Start validating a whole form.
pub fn validate_request() -> RequestValidator {
    RequestValidator::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{Email, MaxLength, Required};
    use crate::validation::error::ValidationErrorKind;

    struct Signup {
        name: String,
        email: String,
    }

    impl Validate for Signup {
        fn validate(&self) -> ValidationResult<()> {
            validate_request()
                .field(validate_field("name", &self.name).rule(Required).rule(MaxLength(10)))
                .field(validate_field("email", &self.email).rule(Required).rule(Email))
                .result()
        }
    }

    #[test]
    fn test_collects_errors_per_field() {
        let form = Signup {
            name: String::new(),
            email: "nope".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has_errors("name"));
        assert!(errors.has_errors("email"));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_stop_on_first() {
        let value = String::new();
        let errors = validate_field("name", &value)
            .stop_on_first()
            .rule(Required)
            .rule(Email)
            .into_errors();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_rule_with_message_overrides_text() {
        let roles: Vec<u64> = vec![];
        let errors = validate_field("role_ids", &roles)
            .rule_with_message(Required, "Please select at least one role")
            .result()
            .unwrap_err();
        let (_, first) = errors.first_error().unwrap();
        assert_eq!(first.message, "Please select at least one role");
        assert_eq!(first.kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_valid_form_passes() {
        let form = Signup {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
