//! Message store — client-side cache of the remote guestbook list.
//!
//! DESIGN
//! ======
//! The cache is replaced wholesale on every successful read and never merged.
//! A failed read leaves it untouched, so the store is either without a
//! confirmed snapshot (initial) or holding the most recent one.
//!
//! ERROR HANDLING
//! ==============
//! Writes are fire-and-forget: a dispatched write is reported as submitted
//! even when the transport fails, because the failure says nothing about
//! whether the row landed. Only validation failures (before any request)
//! and explicit rejections from an acknowledging endpoint are errors. The
//! delayed re-read scheduled by the page is what reveals the true state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::endpoint::MessageEndpoint;
use crate::entry::{Entry, MessageList};
use crate::error::{ErrorCode, FetchError, SubmitError, WriteError};

/// Outcome of a dispatched write. Both variants mean "submitted" to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgment {
    Sent,
    /// The transport reported a failure, which carries no server verdict.
    SentDespiteTransportError(String),
}

pub struct MessageStore {
    endpoint: Arc<dyn MessageEndpoint>,
    snapshot: RwLock<Option<MessageList>>,
}

impl MessageStore {
    #[must_use]
    pub fn new(endpoint: Arc<dyn MessageEndpoint>) -> Self {
        Self { endpoint, snapshot: RwLock::new(None) }
    }

    /// Read the remote list and replace the cache with it.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport or decode failure, or when the
    /// server reports `success: false`. The cache is left as it was.
    pub async fn fetch_all(&self) -> Result<MessageList, FetchError> {
        let response = match self.endpoint.read().await {
            Ok(response) => response,
            Err(e) => {
                warn!(code = e.error_code(), retryable = e.retryable(), error = %e, "failed to load messages");
                return Err(e);
            }
        };

        if !response.success {
            let err = FetchError::server(response.error);
            warn!(code = err.error_code(), error = %err, "failed to load messages");
            return Err(err);
        }

        let list: MessageList = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Entry::from)
            .collect();

        *self.snapshot.write().await = Some(list.clone());
        info!(count = list.len(), "messages loaded");
        Ok(list)
    }

    /// Validate and dispatch one entry.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Validation`] without touching the network when
    /// either field is empty after trimming, or [`SubmitError::Rejected`]
    /// when an acknowledging endpoint refuses the write.
    pub async fn append(&self, entry: Entry) -> Result<Acknowledgment, SubmitError> {
        let entry = entry.validated()?;

        match self.endpoint.write(&entry).await {
            Ok(()) => {
                info!(name = %entry.name, "message sent");
                Ok(Acknowledgment::Sent)
            }
            Err(e) => {
                warn!(code = e.error_code(), retryable = e.retryable(), error = %e, name = %entry.name, "write failed");
                match e {
                    WriteError::Transport(reason) => Ok(Acknowledgment::SentDespiteTransportError(reason)),
                    WriteError::Rejected { status, body } => Err(SubmitError::Rejected { status, body }),
                }
            }
        }
    }

    /// Current cached list; empty before the first successful read.
    pub async fn entries(&self) -> MessageList {
        self.snapshot.read().await.clone().unwrap_or_default()
    }

    /// Whether any read has succeeded yet.
    pub async fn has_snapshot(&self) -> bool {
        self.snapshot.read().await.is_some()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
