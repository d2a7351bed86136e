//! Cross-cutting error types for Pulse.
//!
//! Storage errors (`DatabaseError`) and delivery errors (`NotifyError`) live in
//! their own crates. `pulse-server` maps all of them onto HTTP responses.

use thiserror::Error;

/// Errors that can be raised by any Pulse crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller's role does not allow the action.
    #[error("Forbidden: requires role {required}")]
    Forbidden { required: String },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
