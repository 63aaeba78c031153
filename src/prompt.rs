//! Confirmation gate for destructive operations.
//!
//! Branch deletion, file discard, hard resets, and commit squash/uncommit all
//! pass through here before any mutation. Empty input accepts; a declined
//! prompt aborts the whole operation.

use crate::error::{Result, TwigError};
use dialoguer::Confirm;

/// Ask the user to confirm a destructive operation.
///
/// Returns `Ok(())` on acceptance (the default) and [`TwigError::Aborted`]
/// on decline, so callers can simply `?` before mutating.
pub fn confirm(message: &str) -> Result<()> {
    let accepted = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()
        .map_err(|e| TwigError::User(format!("cannot prompt for confirmation: {}", e)))?;

    if accepted { Ok(()) } else { Err(TwigError::Aborted) }
}
