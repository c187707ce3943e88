//! Basic-auth REST client for the Prism management API.
//!
//! One [`ApiClient`] talks to one server. It sends every request with
//! `Accept`/`Content-Type: application/json` and a Basic `Authorization`
//! header, applies the configured timeout to both connecting and the whole
//! request, and hands back the raw response for the caller to decode.
//!
//! ```no_run
//! use prism_client::{ApiClient, ConnectionConfig, V3_BASE_PATH};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), prism_client::ClientError> {
//! let config = ConnectionConfig::new("admin", "secret", "10.0.0.5").with_base_path(V3_BASE_PATH);
//! let client = ApiClient::new(config)?;
//!
//! let clusters = client.get("clusters").await?.error_for_status()?;
//! println!("{}", clusters.body);
//!
//! let vms = client.post("vms/list", json!({"kind": "vm"}), true).await?;
//! println!("{} {}", vms.status_code, vms.content_type);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod response;

pub use error::ClientError;
pub use http::ApiClient;
pub use response::ApiResponse;

pub use prism_core::{
    BodyError, ConfigError, ConnectionConfig, Endpoint, RequestBody, Scheme, DEFAULT_BASE_PATH,
    V3_BASE_PATH,
};
