//! HTTP client for the REST API.

use prism_core::{ConnectionConfig, Endpoint, RequestBody, Scheme};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::response::ApiResponse;

/// Client bound to a single server.
///
/// The configuration, base URL and Authorization header are fixed when the
/// client is built. Cloning shares the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    config: ConnectionConfig,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// Fails with [`ClientError::Construction`] when the configuration is
    /// invalid, or [`ClientError::TransportSetup`] when the transport cannot
    /// be built.
    pub fn new(config: ConnectionConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // "Basic " plus base64 is always visible ASCII; the error arm is unreachable.
        let mut authorization = HeaderValue::from_str(&config.credentials().basic_auth_header())
            .map_err(|e| ClientError::TransportSetup(e.to_string()))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .cookie_store(config.cookie_store());

        if !config.verify_tls() {
            if config.scheme() == Scheme::Https {
                warn!(
                    host = %config.host(),
                    "TLS certificate and hostname verification disabled"
                );
            }
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| ClientError::TransportSetup(e.to_string()))?;

        debug!(
            base_url = %base_url,
            username = %config.username(),
            timeout_secs = config.timeout_secs(),
            "API client created"
        );

        Ok(Self {
            inner,
            config,
            base_url,
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// `{scheme}://{host}:{port}{base_path}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL an endpoint resolves to.
    pub fn url_for(&self, endpoint: impl Into<Endpoint>) -> String {
        endpoint.into().join(&self.base_url)
    }

    /// GET an endpoint. `None` or `""` requests the base path itself.
    pub async fn get(&self, endpoint: impl Into<Endpoint>) -> Result<ApiResponse, ClientError> {
        self.request(Method::GET, endpoint.into(), None).await
    }

    /// POST to an endpoint.
    ///
    /// With `encode_as_json` the body is sent as its JSON text; otherwise a
    /// text body is sent unchanged.
    pub async fn post(
        &self,
        endpoint: impl Into<Endpoint>,
        body: impl Into<RequestBody>,
        encode_as_json: bool,
    ) -> Result<ApiResponse, ClientError> {
        let payload = body.into().into_payload(encode_as_json)?;
        self.request(Method::POST, endpoint.into(), Some(payload))
            .await
    }

    /// POST any serializable value as JSON.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: impl Into<Endpoint>,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        let body = RequestBody::json(body)?;
        self.post(endpoint, body, true).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: Endpoint,
        payload: Option<String>,
    ) -> Result<ApiResponse, ClientError> {
        let url = endpoint.join(&self.base_url);
        debug!(%method, url = %url, "Sending request");

        let mut request = self.inner.request(method.clone(), url.as_str());
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%method, url = %url, error = %e, "Request failed");
                return Err(e.into());
            }
        };

        debug!(%method, url = %url, status = %response.status(), "Received response");
        ApiResponse::from_response(response).await
    }
}
