//! Subcommand implementations.

pub mod access;
pub mod config;
pub mod ideas;
pub mod org;
pub mod users;

use anyhow::{bail, Result};
use ideabox_core::validation::Validate;

use crate::output;

/// Print every field error of a form and stop before anything is sent.
pub(crate) fn ensure_valid<T: Validate>(form: &T, what: &str) -> Result<()> {
    if let Err(errors) = form.validate() {
        for message in errors.to_flat_messages() {
            output::print_error(&message);
        }
        bail!("{} not submitted: {} field error(s)", what, errors.error_count());
    }
    Ok(())
}

/// Destructive commands only run with `--force`.
pub(crate) fn confirmed(force: bool, action: &str) -> bool {
    if !force {
        output::print_info(&format!("This will {}. Use --force to confirm.", action));
    }
    force
}
