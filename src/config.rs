//! Guestbook configuration parsed from environment variables.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENDPOINT_VAR: &str = "GUESTBOOK_ENDPOINT";
pub const MIN_ROWS_VAR: &str = "GUESTBOOK_MIN_ROWS";
pub const RECONCILE_DELAY_VAR: &str = "GUESTBOOK_RECONCILE_DELAY_MS";
pub const WRITE_MODE_VAR: &str = "GUESTBOOK_WRITE_MODE";
pub const REQUEST_TIMEOUT_VAR: &str = "GUESTBOOK_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "GUESTBOOK_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_MIN_ROWS: usize = 50;
/// Upper bound on the padded row count; larger values are a typo, not a sheet.
pub const MAX_MIN_ROWS: usize = 10_000;
pub const DEFAULT_RECONCILE_DELAY_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// How writes are dispatched to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Send and drop the response unread. Every dispatched write counts as
    /// submitted; reconciliation reveals the real outcome.
    #[default]
    FireAndForget,
    /// Read the response status and report explicit rejections.
    Acknowledged,
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "fire_and_forget" => Ok(Self::FireAndForget),
            "acknowledged" => Ok(Self::Acknowledged),
            other => Err(ConfigError::Invalid {
                var: WRITE_MODE_VAR,
                value: other.to_owned(),
                reason: "expected 'fire_and_forget' or 'acknowledged'".into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestbookConfig {
    pub endpoint: String,
    pub min_rows: usize,
    pub reconcile_delay: Duration,
    pub write_mode: WriteMode,
    pub timeouts: HttpTimeouts,
}

impl GuestbookConfig {
    /// Config with defaults for everything but the endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            min_rows: DEFAULT_MIN_ROWS,
            reconcile_delay: Duration::from_millis(DEFAULT_RECONCILE_DELAY_MS),
            write_mode: WriteMode::default(),
            timeouts: HttpTimeouts::default(),
        }
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `GUESTBOOK_ENDPOINT`: URL serving both reads (GET) and writes (POST)
    ///
    /// Optional:
    /// - `GUESTBOOK_MIN_ROWS`: default 50
    /// - `GUESTBOOK_RECONCILE_DELAY_MS`: default 1000
    /// - `GUESTBOOK_WRITE_MODE`: `fire_and_forget` (default) or `acknowledged`
    /// - `GUESTBOOK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GUESTBOOK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing or any set value fails to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = match std::env::var(ENDPOINT_VAR) {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
            _ => return Err(ConfigError::Missing { var: ENDPOINT_VAR }),
        };
        Self::new(endpoint).with_env_overrides()
    }

    /// Apply the optional variables on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if any set value fails to parse.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        self.min_rows = check_min_rows(env_parse(MIN_ROWS_VAR, self.min_rows)?)?;
        let delay_ms = env_parse(RECONCILE_DELAY_VAR, duration_millis(self.reconcile_delay))?;
        self.reconcile_delay = Duration::from_millis(delay_ms);
        if let Ok(raw) = std::env::var(WRITE_MODE_VAR) {
            self.write_mode = raw.parse()?;
        }
        self.timeouts = HttpTimeouts {
            request_secs: env_parse(REQUEST_TIMEOUT_VAR, self.timeouts.request_secs)?,
            connect_secs: env_parse(CONNECT_TIMEOUT_VAR, self.timeouts.connect_secs)?,
        };
        Ok(self)
    }
}

/// Accept a minimum row count only up to [`MAX_MIN_ROWS`].
///
/// # Errors
///
/// Returns `ConfigError::Invalid` naming `GUESTBOOK_MIN_ROWS` when `value`
/// exceeds the bound.
pub fn check_min_rows(value: usize) -> Result<usize, ConfigError> {
    if value > MAX_MIN_ROWS {
        return Err(ConfigError::Invalid {
            var: MIN_ROWS_VAR,
            value: value.to_string(),
            reason: format!("must be at most {MAX_MIN_ROWS}"),
        });
    }
    Ok(value)
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            var: key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
