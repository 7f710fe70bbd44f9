//! Guestbook entries and the endpoint's JSON wire shapes.
//!
//! DESIGN
//! ======
//! `Entry` is the in-memory model (`name`, `message`). The wire uses the
//! spreadsheet's column names `nome` and `mensagem` verbatim; the renaming
//! happens only here. Spreadsheet cells come back loosely typed (missing,
//! null, numbers), so decoding is lenient and never fails on a cell.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

// =============================================================================
// ENTRY
// =============================================================================

/// One guestbook submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub name: String,
    pub message: String,
}

/// Ordered snapshot of entries, oldest first, as returned by the endpoint.
pub type MessageList = Vec<Entry>;

impl Entry {
    /// Build a submission from raw form input, trimming both fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming whichever field is empty after
    /// trimming.
    pub fn new(name: &str, message: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let message = message.trim();
        match (name.is_empty(), message.is_empty()) {
            (true, true) => Err(ValidationError::EmptyNameAndMessage),
            (true, false) => Err(ValidationError::EmptyName),
            (false, true) => Err(ValidationError::EmptyMessage),
            (false, false) => Ok(Self { name: name.to_owned(), message: message.to_owned() }),
        }
    }

    /// Re-check an already constructed entry. Entries built by hand (or
    /// decoded from a read) skip [`Entry::new`].
    ///
    /// # Errors
    ///
    /// Same as [`Entry::new`].
    pub fn validated(self) -> Result<Self, ValidationError> {
        Self::new(&self.name, &self.message)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// One row of the read response's `data` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteEntry {
    #[serde(default, deserialize_with = "cell_text")]
    pub nome: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub mensagem: String,
}

impl From<RemoteEntry> for Entry {
    fn from(remote: RemoteEntry) -> Self {
        Self { name: remote.nome, message: remote.mensagem }
    }
}

/// Body of `GET <endpoint>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<RemoteEntry>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST <endpoint>`.
#[derive(Debug, Clone, Serialize)]
pub struct WriteRequest<'a> {
    pub nome: &'a str,
    pub mensagem: &'a str,
}

impl<'a> From<&'a Entry> for WriteRequest<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self { nome: &entry.name, mensagem: &entry.message }
    }
}

/// Spreadsheet cells may be missing, null, or typed; render them as text.
fn cell_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
