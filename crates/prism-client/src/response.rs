//! Raw API responses.

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// A completed HTTP exchange. The body is left undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code.
    pub status_code: u16,

    /// `Content-Type` header value, empty if the server sent none.
    pub content_type: String,

    /// Response body as text.
    pub body: String,
}

impl ApiResponse {
    /// Read the status, content type and full body of a transport response.
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self, ClientError> {
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get_all(CONTENT_TYPE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");
        let body = response.text().await?;

        Ok(Self {
            status_code,
            content_type,
            body,
        })
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Turn a non-2xx response into [`ClientError::Http`].
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Http {
                status: self.status_code,
                body: self.body,
            })
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(ClientError::from)
    }
}
