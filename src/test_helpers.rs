//! Shared test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::endpoint::MessageEndpoint;
use crate::entry::{Entry, ReadResponse, RemoteEntry};
use crate::error::{FetchError, WriteError};

/// In-memory append-only sheet standing in for the remote endpoint.
#[derive(Default)]
pub struct MemorySheet {
    pub rows: Mutex<Vec<Entry>>,
    /// When set, reads answer `success: false` with this reason.
    pub read_failure: Mutex<Option<Option<String>>>,
    /// When set, reads fail before any body arrives.
    pub read_transport_error: Mutex<Option<String>>,
    /// When set, reads park on this gate until it is notified.
    pub read_gate: Mutex<Option<Arc<Notify>>>,
    /// When set, writes fail at the transport level (after the row lands
    /// if `land_on_transport_error` is true).
    pub write_transport_error: Mutex<Option<String>>,
    pub land_on_transport_error: Mutex<bool>,
    /// When set, writes are refused with this status and nothing lands.
    pub write_rejection: Mutex<Option<u16>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl MemorySheet {
    #[must_use]
    pub fn with_rows(rows: Vec<Entry>) -> Self {
        Self { rows: Mutex::new(rows), ..Self::default() }
    }

    pub fn fail_reads(&self, reason: Option<&str>) {
        *self.read_failure.lock().unwrap() = Some(reason.map(str::to_owned));
    }

    pub fn fail_reads_in_transport(&self, reason: &str) {
        *self.read_transport_error.lock().unwrap() = Some(reason.to_owned());
    }

    pub fn heal_reads(&self) {
        *self.read_failure.lock().unwrap() = None;
        *self.read_transport_error.lock().unwrap() = None;
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MessageEndpoint for MemorySheet {
    async fn read(&self) -> Result<ReadResponse, FetchError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let transport_error = self.read_transport_error.lock().unwrap().clone();
        if let Some(reason) = transport_error {
            return Err(FetchError::Transport(reason));
        }
        if let Some(reason) = self.read_failure.lock().unwrap().clone() {
            return Ok(ReadResponse { success: false, data: None, error: reason });
        }
        let data = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|entry| RemoteEntry { nome: entry.name.clone(), mensagem: entry.message.clone() })
            .collect();
        Ok(ReadResponse { success: true, data: Some(data), error: None })
    }

    async fn write(&self, entry: &Entry) -> Result<(), WriteError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.write_rejection.lock().unwrap() {
            return Err(WriteError::Rejected { status, body: String::new() });
        }
        let transport_error = self.write_transport_error.lock().unwrap().clone();
        if transport_error.is_none() || *self.land_on_transport_error.lock().unwrap() {
            self.rows.lock().unwrap().push(entry.clone());
        }
        match transport_error {
            Some(reason) => Err(WriteError::Transport(reason)),
            None => Ok(()),
        }
    }
}
