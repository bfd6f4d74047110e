//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Liturgy service error with status context
    #[error("Liturgy service error: {message}")]
    Service {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response body could not be decoded
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
        /// Leading part of the offending body, when available.
        body: Option<String>,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

/// How much of an undecodable body is kept for the log.
const BODY_EXCERPT_LEN: usize = 200;

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a liturgy service error with HTTP status
    pub fn service_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("The service rejected the day/month pair"),
            404 => Some("No liturgy is published for this date"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Liturgy service error - try again later"),
            _ => None,
        };
        Self::Service {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error, keeping a short excerpt of the body
    pub fn parse(message: impl Into<String>, body: Option<&str>) -> Self {
        Self::Parse {
            message: message.into(),
            body: body.map(|b| b.chars().take(BODY_EXCERPT_LEN).collect()),
        }
    }

    /// HTTP status attached to this error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn service_status_provides_hints() {
        let err = Error::service_status("Not Found", 404);
        match err {
            Error::Service { hint: Some(h), status: Some(404), .. } => {
                assert!(h.contains("No liturgy"));
            }
            _ => panic!("Expected Service error with hint"),
        }
    }

    #[test]
    fn service_status_without_known_hint() {
        let err = Error::service_status("Teapot", 418);
        assert!(matches!(err, Error::Service { hint: None, .. }));
        assert_eq!(err.status(), Some(418));
    }

    #[test]
    fn parse_error_truncates_body() {
        let body = "x".repeat(1000);
        match Error::parse("bad json", Some(&body)) {
            Error::Parse { body: Some(b), .. } => assert_eq!(b.len(), BODY_EXCERPT_LEN),
            other => panic!("unexpected {other:?}"),
        }
    }
}
