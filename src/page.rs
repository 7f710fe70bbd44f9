//! Guestbook page controller.
//!
//! DESIGN
//! ======
//! Composes the store, the renderer and an injected `PageView`. `load`
//! draws a loading placeholder, reads, then draws either the rows or an
//! error placeholder. `submit` takes the form drafts, dispatches one write,
//! clears the form and schedules exactly one delayed `load` to reconcile
//! with whatever the endpoint actually stored.
//!
//! TRADE-OFFS
//! ==========
//! Reconciliation timers are independent and cannot be cancelled. Two quick
//! submissions start two timers, and each one reloads. Loads are serialized
//! behind `refresh`, held across the fetch and the redraw, so the view always
//! ends on the snapshot the store holds and an older read can never be drawn
//! over a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::GuestbookConfig;
use crate::entry::Entry;
use crate::error::{FetchError, SubmitError, ValidationError};
use crate::render::{Row, render};
use crate::store::{Acknowledgment, MessageStore};

// =============================================================================
// VIEW
// =============================================================================

/// What the list area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Rows(Vec<Row>),
    Error(String),
}

/// Sink for list-area updates.
pub trait PageView: Send + Sync {
    fn show(&self, state: ViewState);
}

// =============================================================================
// FORM
// =============================================================================

/// Draft input for the next submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub name: String,
    pub message: String,
    /// True while a write is in flight.
    pub sending: bool,
}

/// Result of a dispatched submission.
#[derive(Debug)]
pub struct Submission {
    pub outcome: Result<Acknowledgment, SubmitError>,
    /// The delayed reload; resolves once the reconciliation read finished.
    pub reconciliation: JoinHandle<Result<(), FetchError>>,
}

// =============================================================================
// PAGE
// =============================================================================

pub struct GuestbookPage {
    store: Arc<MessageStore>,
    view: Arc<dyn PageView>,
    min_rows: usize,
    reconcile_delay: Duration,
    form: Mutex<SubmissionForm>,
    refresh: AsyncMutex<()>,
}

impl GuestbookPage {
    #[must_use]
    pub fn new(store: Arc<MessageStore>, view: Arc<dyn PageView>, min_rows: usize, reconcile_delay: Duration) -> Self {
        Self {
            store,
            view,
            min_rows,
            reconcile_delay,
            form: Mutex::new(SubmissionForm::default()),
            refresh: AsyncMutex::new(()),
        }
    }

    #[must_use]
    pub fn from_config(store: Arc<MessageStore>, view: Arc<dyn PageView>, config: &GuestbookConfig) -> Self {
        Self::new(store, view, config.min_rows, config.reconcile_delay)
    }

    #[must_use]
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Snapshot of the current form drafts.
    #[must_use]
    pub fn form(&self) -> SubmissionForm {
        self.lock_form().clone()
    }

    pub fn set_name(&self, name: &str) {
        name.clone_into(&mut self.lock_form().name);
    }

    pub fn set_message(&self, message: &str) {
        message.clone_into(&mut self.lock_form().message);
    }

    /// Reload the list and redraw it.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] after drawing the error placeholder.
    pub async fn load(&self) -> Result<(), FetchError> {
        let _refresh = self.refresh.lock().await;
        self.view.show(ViewState::Loading);
        match self.store.fetch_all().await {
            Ok(list) => {
                self.view.show(ViewState::Rows(render(&list, self.min_rows)));
                Ok(())
            }
            Err(e) => {
                self.view.show(ViewState::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Submit the current form drafts.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a draft is empty after trimming;
    /// the form is left as typed and nothing is sent or scheduled.
    pub async fn submit(self: &Arc<Self>) -> Result<Submission, ValidationError> {
        let entry = {
            let mut form = self.lock_form();
            let entry = Entry::new(&form.name, &form.message)?;
            form.sending = true;
            entry
        };

        let outcome = self.store.append(entry).await;

        {
            let mut form = self.lock_form();
            form.name.clear();
            form.message.clear();
            form.sending = false;
        }

        let reconciliation = self.schedule_reconciliation();
        Ok(Submission { outcome, reconciliation })
    }

    /// Fill the form and submit it in one step.
    ///
    /// # Errors
    ///
    /// Same as [`GuestbookPage::submit`].
    pub async fn submit_entry(self: &Arc<Self>, name: &str, message: &str) -> Result<Submission, ValidationError> {
        self.set_name(name);
        self.set_message(message);
        self.submit().await
    }

    fn schedule_reconciliation(self: &Arc<Self>) -> JoinHandle<Result<(), FetchError>> {
        let page = Arc::clone(self);
        let delay = self.reconcile_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(?delay, "reconciling after submission");
            page.load().await
        })
    }

    fn lock_form(&self) -> MutexGuard<'_, SubmissionForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
