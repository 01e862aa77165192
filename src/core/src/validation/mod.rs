//! Field-level validation for the idea box forms.
//!
//! - **Rules**: required fields, length limits, email/URL formats, collection
//!   size and uniqueness
//! - **Validators**: `Validate` trait, `FieldValidator` for chaining rules on a
//!   single field, `RequestValidator` for whole forms
//! - **Errors**: `ValidationErrors` keyed by field name, so each message can be
//!   shown next to the input that caused it
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ideabox_core::validation::{validate_field, validate_request, Email, Required, Validate, ValidationResult};
//!
//! impl Validate for InviteForm {
//!     fn validate(&self) -> ValidationResult<()> {
//!         validate_request()
//!             .field(validate_field("email", &self.email).rule(Required).rule(Email))
//!             .result()
//!     }
//! }
//! ```

pub mod error;
pub mod rules;
pub mod validator;

pub use error::{FieldError, ValidationErrorKind, ValidationErrors, ValidationResult};
pub use rules::{Email, MaxLength, MinItems, Required, UniqueItems, Url, ValidationRule};
pub use validator::{validate_field, validate_request, FieldValidator, RequestValidator, Validate};
