//! Guestbook client for a spreadsheet-backed message endpoint.
//!
//! DESIGN
//! ======
//! `MessageStore` keeps the last confirmed snapshot of the remote list,
//! `render` projects it onto numbered sheet rows, and `GuestbookPage` wires
//! both to a view, a submission form and the delayed reconciliation read.
//! `PlayerControls` drives an optional background media player handed in
//! once its widget is ready.

pub mod config;
pub mod endpoint;
pub mod entry;
pub mod error;
pub mod page;
pub mod player;
pub mod render;
pub mod store;

#[cfg(test)]
pub mod test_helpers;

pub use config::{GuestbookConfig, WriteMode};
pub use endpoint::{HttpEndpoint, MessageEndpoint};
pub use entry::{Entry, MessageList};
pub use error::{ConfigError, ErrorCode, FetchError, SubmitError, ValidationError, report};
pub use page::{GuestbookPage, PageView, Submission, ViewState};
pub use player::{MediaPlayer, PlayerControls, PlayerState, ToggleIcon};
pub use render::{Row, format_table, render};
pub use store::{Acknowledgment, MessageStore};
