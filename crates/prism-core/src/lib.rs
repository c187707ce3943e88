//! Prism Core Types
//!
//! This crate contains the pure connection and request types used by the
//! Prism REST client, with no dependencies on:
//! - Network/HTTP transports
//! - Async runtimes
//!
//! Everything needed to describe *where* and *how* a request is sent lives
//! here; `prism-client` performs the actual I/O.

pub mod body;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;

// Re-export commonly used types
pub use body::RequestBody;
pub use config::{
    ConnectionConfig, Scheme, DEFAULT_API_VERSION, DEFAULT_BASE_PATH, DEFAULT_PORT,
    DEFAULT_TIMEOUT_SECS, V3_BASE_PATH,
};
pub use credentials::Credentials;
pub use endpoint::Endpoint;
pub use error::{BodyError, ConfigError};
