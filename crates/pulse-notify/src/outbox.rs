//! In-process sink that keeps every message it is given.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::NotifyError;

/// A message as handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Shared record of delivered messages. Clones observe the same list.
///
/// An outbox built with [`Outbox::refusing`] rejects every delivery, which is
/// how callers exercise their failure paths.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    messages: Arc<Mutex<Vec<OutgoingMessage>>>,
    refuse: bool,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything delivered so far.
    #[must_use]
    pub fn messages(&self) -> Vec<OutgoingMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn push(&self, to: &[String], subject: &str, body: &str) -> Result<(), NotifyError> {
        if self.refuse {
            return Err(NotifyError::Refused(format!("{} recipient(s)", to.len())));
        }
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(OutgoingMessage {
                to: to.to_vec(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
