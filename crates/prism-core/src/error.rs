//! Configuration errors.

use thiserror::Error;

/// Errors raised while validating a [`ConnectionConfig`](crate::ConnectionConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Host was empty.
    #[error("Host must not be empty")]
    EmptyHost,

    /// Host contains characters that cannot appear in a URL authority.
    #[error("Invalid host '{0}'")]
    InvalidHost(String),

    /// Port 0 is not a connectable TCP port.
    #[error("Port must be non-zero")]
    InvalidPort,

    /// A zero timeout would fail every request immediately.
    #[error("Timeout must be at least one second")]
    InvalidTimeout,

    /// The composed base URL could not be parsed.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Only http and https are supported.
    #[error("Unsupported scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Errors raised while turning a [`RequestBody`](crate::RequestBody) into a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyError {
    /// Only text has a byte form without JSON encoding.
    #[error("A JSON {0} body cannot be sent without encoding; pass text or enable JSON encoding")]
    NotText(&'static str),
}
