//! Error taxonomy for the guestbook client.
//!
//! DESIGN
//! ======
//! One enum per concern. `ValidationError` is raised before any network
//! call. `FetchError` is surfaced as an error placeholder in place of the
//! list. Write outcomes fold to success in fire-and-forget mode, so
//! `SubmitError` only carries validation failures and (in acknowledged mode)
//! explicit rejections.

/// Stable machine-readable code attached to every error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// One-line operator report: `CODE: message`, flagged when a retry may help.
#[must_use]
pub fn report<E: ErrorCode + ?Sized>(err: &E) -> String {
    if err.retryable() {
        format!("{}: {err} (retryable)", err.error_code())
    } else {
        format!("{}: {err}", err.error_code())
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A submission with an empty field after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("name and message must not be empty")]
    EmptyNameAndMessage,
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        "E_VALIDATION"
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// Fallback reason when the server reports failure without one.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// A read that produced no new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a readable body.
    #[error("request failed: {0}")]
    Transport(String),

    /// The body was not a structurally valid read response.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The server answered with `success: false`.
    #[error("{0}")]
    Server(String),
}

impl FetchError {
    /// Build a server failure from the optional `error` field of the response.
    #[must_use]
    pub fn server(reason: Option<String>) -> Self {
        match reason {
            Some(reason) if !reason.trim().is_empty() => Self::Server(reason),
            _ => Self::Server(UNKNOWN_ERROR.to_owned()),
        }
    }
}

impl ErrorCode for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_FETCH_TRANSPORT",
            Self::Decode(_) => "E_FETCH_DECODE",
            Self::Server(_) => "E_FETCH_SERVER",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

// =============================================================================
// WRITE
// =============================================================================

/// Endpoint-level write failure. Only the store decides what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("write rejected: status {status}")]
    Rejected { status: u16, body: String },
}

impl ErrorCode for WriteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_WRITE_TRANSPORT",
            Self::Rejected { .. } => "E_WRITE_REJECTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Rejected { status: 429 | 500..=599, .. })
    }
}

/// A submission that did not reach the point of dispatch, or was explicitly
/// rejected by an acknowledging endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("write rejected: status {status}")]
    Rejected { status: u16, body: String },
}

impl ErrorCode for SubmitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Rejected { .. } => "E_WRITE_REJECTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Rejected { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },

    #[error("invalid {var} value '{value}': {reason}")]
    Invalid { var: &'static str, value: String, reason: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "E_CONFIG_MISSING",
            Self::Invalid { .. } => "E_CONFIG_INVALID",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
