//! # pulse-notify
//!
//! Best-effort delivery of plain-text notices to a list of addresses.
//!
//! Callers treat every error from [`Mailer::send`] as non-fatal: log it and
//! move on. Nothing here retries.
//!
//! Transports:
//! - [`Mailer::Http`] posts to a mail API when `mail.api_url` and
//!   `mail.api_key` are configured.
//! - [`Mailer::Log`] writes the would-be message to the log. This is the
//!   degraded mode used when credentials are missing and is not an error.
//! - [`Mailer::Recording`] keeps messages in memory.

mod error;
mod http;
mod outbox;

pub use error::NotifyError;
pub use http::HttpMailer;
pub use outbox::{Outbox, OutgoingMessage};

use pulse_config::MailConfig;

/// What happened to a message handed to [`Mailer::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the transport.
    Sent,
    /// Written to the log because no transport is configured.
    Logged,
    /// Not attempted: no recipients.
    Skipped,
}

#[derive(Debug, Clone)]
pub enum Mailer {
    Log,
    Http(HttpMailer),
    Recording(Outbox),
}

impl Mailer {
    /// Pick the transport for a mail configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        if config.is_configured() {
            Ok(Self::Http(HttpMailer::new(config)?))
        } else {
            tracing::warn!("mail transport not configured; notifications will be logged");
            Ok(Self::Log)
        }
    }

    /// Deliver one message to every address in `to`.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if the transport rejects the message.
    pub async fn send(
        &self,
        to: &[String],
        subject: &str,
        body: &str,
    ) -> Result<Delivery, NotifyError> {
        if to.is_empty() {
            tracing::debug!(subject, "no recipients; notification skipped");
            return Ok(Delivery::Skipped);
        }

        match self {
            Self::Log => {
                tracing::info!(to = ?to, subject, body, "notification (mail not configured)");
                Ok(Delivery::Logged)
            }
            Self::Http(mailer) => {
                mailer.deliver(to, subject, body).await?;
                tracing::debug!(recipients = to.len(), subject, "notification sent");
                Ok(Delivery::Sent)
            }
            Self::Recording(outbox) => {
                outbox.push(to, subject, body)?;
                Ok(Delivery::Sent)
            }
        }
    }
}
