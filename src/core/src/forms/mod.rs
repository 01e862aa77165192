//! Form state for the user and idea editors.

pub mod idea;
pub mod user;

pub use idea::{IdeaDraft, MAX_TITLE_LENGTH};
pub use user::{UserForm, UserSubmission};
