//! Error types for the Leakguard request pipeline
//!
//! Every failure leaving the pipeline is one of four classified kinds:
//! Network (no usable response), Http (response received, status signals
//! failure), Business (well-formed response with a false success flag), and
//! Unknown (anything else). Callers never see raw transport errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No usable response was obtained (timeout, DNS, connection refused)
    Network,
    /// A response arrived but its HTTP status signals failure
    Http,
    /// HTTP succeeded but the envelope's success flag is false
    Business,
    /// Anything that matches none of the other kinds
    Unknown,
}

/// The single error type surfaced by the pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure, no response obtained
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// HTTP status >= 300 or transport reported a non-2xx response
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Server envelope carried a non-success business code
    #[error("{message}")]
    Business { code: i64, message: String },

    /// Response shape or failure did not match any known convention
    #[error("{message}")]
    Unknown { message: String },
}

/// Convenience type alias for Results using the pipeline error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network { .. } => ErrorKind::Network,
            Error::Http { .. } => ErrorKind::Http,
            Error::Business { .. } => ErrorKind::Business,
            Error::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Numeric code carried by this error
    ///
    /// HTTP errors carry the status code, business errors the envelope code.
    /// Network and unknown failures report -1, matching the wire convention
    /// for "no server-assigned code".
    pub fn code(&self) -> i64 {
        match self {
            Error::Http { status, .. } => i64::from(*status),
            Error::Business { code, .. } => *code,
            Error::Network { .. } | Error::Unknown { .. } => -1,
        }
    }

    /// User-facing message for this error
    pub fn message(&self) -> &str {
        match self {
            Error::Network { message, .. }
            | Error::Http { message, .. }
            | Error::Business { message, .. }
            | Error::Unknown { message } => message,
        }
    }

    /// Build an Unknown error from an arbitrary failure description
    pub fn unknown(message: impl Into<String>) -> Self {
        Error::Unknown {
            message: message.into(),
        }
    }

    /// Whether this failure means the session has expired
    ///
    /// Matches the auth-expired code on both the HTTP and the business
    /// level. Such a failure aborts any remaining retries and triggers the
    /// default credential wipe.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self.kind(), ErrorKind::Business | ErrorKind::Http)
            && self.code() == crate::config::business_code::TOKEN_EXPIRED
    }
}
