//! Error Handling Module
//!
//! Classified failures for calls against the maildesk backend API. Every
//! outcome of an outbound request maps onto exactly one variant, and the
//! retry executor keys its decisions off [`ApiError::is_retryable`].
//!
//! # Example
//!
//! ```rust
//! use maildesk::error::ApiError;
//!
//! let error = ApiError::status(404, "not found");
//! assert_eq!(error.status_code(), Some(404));
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Classified failure of a single API request.
///
/// `retry_count` is the 0-based index of the attempt that produced the
/// failure, stamped by the retry executor. It is the attempt index, not the
/// number of calls made.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport could not be established.
    #[error("cannot connect to API: {message}")]
    Connection { message: String, retry_count: u32 },

    /// No response within the per-attempt timeout.
    #[error("request timed out: {message}")]
    Timeout { message: String, retry_count: u32 },

    /// The server answered with a 5xx status.
    #[error("server error {code}: {message}")]
    ServerStatus {
        code: u16,
        message: String,
        retry_count: u32,
    },

    /// The server answered with a non-5xx error status. Never retried.
    #[error("API error {code}: {message}")]
    ClientStatus {
        code: u16,
        message: String,
        retry_count: u32,
    },

    /// Any other request failure (DNS, malformed request, body decode).
    #[error("request failed: {message}")]
    Transport { message: String, retry_count: u32 },
}

impl ApiError {
    /// Connection failure (transport could not be established).
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            retry_count: 0,
        }
    }

    /// Per-attempt timeout elapsed without a response.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            retry_count: 0,
        }
    }

    /// HTTP status failure, split into server (5xx) and client (everything
    /// else) variants.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        if code >= 500 {
            Self::ServerStatus {
                code,
                message: message.into(),
                retry_count: 0,
            }
        } else {
            Self::ClientStatus {
                code,
                message: message.into(),
                retry_count: 0,
            }
        }
    }

    /// Generic transport failure not covered by the other categories.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retry_count: 0,
        }
    }

    /// Whether the retry executor may attempt the operation again.
    ///
    /// Everything except a client status error is transient: connection and
    /// timeout failures may clear, 5xx responses may recover, and generic
    /// transport errors get the benefit of the doubt.
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::ClientStatus { .. })
    }

    /// The HTTP status code, when the failure carries one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServerStatus { code, .. } | Self::ClientStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 0-based index of the attempt that produced this failure.
    pub const fn retry_count(&self) -> u32 {
        match self {
            Self::Connection { retry_count, .. }
            | Self::Timeout { retry_count, .. }
            | Self::ServerStatus { retry_count, .. }
            | Self::ClientStatus { retry_count, .. }
            | Self::Transport { retry_count, .. } => *retry_count,
        }
    }

    /// Stamp the attempt index that produced this failure.
    #[must_use]
    pub fn with_retry_count(mut self, attempt: u32) -> Self {
        match &mut self {
            Self::Connection { retry_count, .. }
            | Self::Timeout { retry_count, .. }
            | Self::ServerStatus { retry_count, .. }
            | Self::ClientStatus { retry_count, .. }
            | Self::Transport { retry_count, .. } => *retry_count = attempt,
        }
        self
    }
}
