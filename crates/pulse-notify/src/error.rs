//! Notification error types.

use thiserror::Error;

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail API returned a non-success status code.
    #[error("mail API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the mail API.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The recording sink was told to refuse deliveries.
    #[error("delivery refused: {0}")]
    Refused(String),
}
