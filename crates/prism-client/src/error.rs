//! Error types for the API client.

use std::error::Error as StdError;

use prism_core::{BodyError, ConfigError};
use thiserror::Error;

/// Errors that can occur when using the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration does not describe a usable server.
    #[error("construction failed: {0}")]
    Construction(#[from] ConfigError),

    /// The HTTP transport could not be built.
    #[error("transport setup failed: {0}")]
    TransportSetup(String),

    /// DNS failure, refused connection, TLS handshake failure or a dropped
    /// connection.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Connecting or completing the request took longer than the timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response, raised by [`ApiResponse::error_for_status`](crate::ApiResponse::error_for_status).
    #[error("HTTP {status}")]
    Http { status: u16, body: String },

    /// The request could not be formed (e.g. the endpoint produced a bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The POST body could not be turned into a payload.
    #[error("invalid body: {0}")]
    InvalidBody(#[from] BodyError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Status code for [`ClientError::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = describe(&err);

        // A connect timeout reports both is_timeout and is_connect, so the
        // timeout check must come first. Statuses never arrive here: the
        // client does not call reqwest's error_for_status.
        if err.is_timeout() {
            Self::Timeout(message)
        } else if err.is_connect() {
            Self::Connection(message)
        } else if err.is_builder() {
            Self::InvalidRequest(message)
        } else if err.is_decode() {
            Self::Serialization(message)
        } else {
            Self::Connection(message)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Flatten an error and its sources into one line.
fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        text: &'static str,
        inner: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.inner.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_describe_walks_sources() {
        let err = Layer {
            text: "error sending request",
            inner: Some(Box::new(Layer {
                text: "client error (Connect)",
                inner: Some(Box::new(Layer {
                    text: "Connection refused (os error 111)",
                    inner: None,
                })),
            })),
        };
        assert_eq!(
            describe(&err),
            "error sending request: client error (Connect): Connection refused (os error 111)"
        );
    }

    #[test]
    fn test_config_error_is_construction() {
        let err = ClientError::from(ConfigError::EmptyHost);
        assert!(matches!(err, ClientError::Construction(ConfigError::EmptyHost)));
        assert_eq!(err.to_string(), "construction failed: Host must not be empty");
    }

    #[test]
    fn test_http_status_accessor() {
        let err = ClientError::Http {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP 503");
        assert_eq!(ClientError::Timeout("slow".into()).status(), None);
    }

    #[test]
    fn test_body_error_conversion() {
        let err = ClientError::from(BodyError::NotText("object"));
        assert!(matches!(err, ClientError::InvalidBody(BodyError::NotText("object"))));
    }
}
