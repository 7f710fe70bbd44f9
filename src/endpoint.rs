//! Remote message endpoint: the spreadsheet-backed HTTP JSON API.
//!
//! DESIGN
//! ======
//! `MessageEndpoint` is the seam between the store and the network so the
//! store can be driven by an in-memory endpoint in tests. `HttpEndpoint` is
//! a thin `reqwest` wrapper: `GET` reads the whole list, `POST` appends one
//! entry. Decoding lives in `parse_read_body` for testability.
//!
//! In `WriteMode::FireAndForget` the write response is dropped without
//! reading status or body, matching an endpoint whose responses are not
//! observable to the caller.

use std::time::Duration;

use tracing::debug;

use crate::config::{GuestbookConfig, HttpTimeouts, WriteMode};
use crate::entry::{Entry, ReadResponse, WriteRequest};
use crate::error::{ConfigError, FetchError, WriteError};

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait MessageEndpoint: Send + Sync {
    /// Read the full ordered list. Returns the decoded body; judging the
    /// `success` flag is left to the caller.
    async fn read(&self) -> Result<ReadResponse, FetchError>;

    /// Append one entry.
    async fn write(&self, entry: &Entry) -> Result<(), WriteError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpEndpoint {
    http: reqwest::Client,
    url: String,
    write_mode: WriteMode,
}

impl HttpEndpoint {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(url: impl Into<String>, write_mode: WriteMode, timeouts: HttpTimeouts) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into(), write_mode })
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &GuestbookConfig) -> Result<Self, ConfigError> {
        Self::new(config.endpoint.clone(), config.write_mode, config.timeouts)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }
}

#[async_trait::async_trait]
impl MessageEndpoint for HttpEndpoint {
    async fn read(&self) -> Result<ReadResponse, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(status, bytes = text.len(), "read response received");

        parse_read_body(&text)
    }

    async fn write(&self, entry: &Entry) -> Result<(), WriteError> {
        let response = self
            .http
            .post(&self.url)
            .json(&WriteRequest::from(entry))
            .send()
            .await
            .map_err(|e| WriteError::Transport(e.to_string()))?;

        match self.write_mode {
            WriteMode::FireAndForget => Ok(()),
            WriteMode::Acknowledged => {
                let status = response.status();
                if status.is_success() {
                    return Ok(());
                }
                let body = response.text().await.unwrap_or_default();
                Err(WriteError::Rejected { status: status.as_u16(), body })
            }
        }
    }
}

/// Decode a read body. The HTTP status is not consulted: only the body's
/// `success` flag decides the outcome.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the body is not a JSON object of the
/// expected shape.
pub fn parse_read_body(text: &str) -> Result<ReadResponse, FetchError> {
    serde_json::from_str::<ReadResponse>(text).map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod tests;
