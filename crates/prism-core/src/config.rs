//! Connection configuration.
//!
//! A [`ConnectionConfig`] describes one target server: credentials, address,
//! base path and transport options. It is assembled with the `with_*`
//! builder methods (or deserialized) and then handed to the client, which
//! never mutates it.
//!
//! TLS verification is OFF for configs built with [`ConnectionConfig::new`].
//! Management appliances usually ship self-signed certificates and the
//! legacy client trusted everything. Use [`ConnectionConfig::secure`] or
//! [`ConnectionConfig::with_tls_verification`] for anything else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::credentials::Credentials;
use crate::error::ConfigError;

/// Default Prism gateway port.
pub const DEFAULT_PORT: u16 = 9440;

/// Default connect and request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Base path of the v1 Prism gateway API.
pub const DEFAULT_BASE_PATH: &str = "/PrismGateway/services/rest/v1";

/// Base path of the v3 API.
pub const V3_BASE_PATH: &str = "/api/nutanix/v3";

/// Reserved API version label.
pub const DEFAULT_API_VERSION: &str = "v3";

/// URL scheme used to reach the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP, for local gateways and test doubles.
    Http,
    /// HTTPS.
    #[default]
    Https,
}

impl Scheme {
    /// Scheme name as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a single target server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(flatten)]
    credentials: Credentials,

    host: String,

    #[serde(default = "default_port")]
    port: u16,

    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    #[serde(default = "default_base_path")]
    base_path: String,

    #[serde(default = "default_api_version")]
    api_version: String,

    #[serde(default)]
    method: Option<String>,

    #[serde(default)]
    scheme: Scheme,

    #[serde(default)]
    verify_tls: bool,

    #[serde(default = "default_cookie_store")]
    cookie_store: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_cookie_store() -> bool {
    true
}

impl ConnectionConfig {
    /// Create a config with the legacy defaults, TLS verification disabled.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            host: host.into(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_path: default_base_path(),
            api_version: default_api_version(),
            method: None,
            scheme: Scheme::Https,
            verify_tls: false,
            cookie_store: true,
        }
    }

    /// Create a config with the legacy defaults but TLS verification enabled.
    pub fn secure(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self::new(username, password, host).with_tls_verification(true)
    }

    /// Build a config from a complete base URI such as
    /// `https://10.0.0.5:9440/api/nutanix/v3`.
    ///
    /// A missing port falls back to the scheme's well-known port.
    pub fn from_base_uri(
        username: impl Into<String>,
        password: impl Into<String>,
        uri: &str,
    ) -> Result<Self, ConfigError> {
        let parsed = Url::parse(uri).map_err(|e| ConfigError::InvalidBaseUrl {
            url: uri.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                url: uri.to_string(),
                reason: "base URI must not carry a query or fragment".to_string(),
            });
        }

        let scheme = Scheme::parse(parsed.scheme())?;
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::EmptyHost)?;
        let port = parsed.port_or_known_default().ok_or(ConfigError::InvalidPort)?;

        let config = Self::new(username, password, host)
            .with_scheme(scheme)
            .with_port(port)
            .with_base_path(parsed.path().trim_end_matches('/'));
        config.validate()?;
        Ok(config)
    }

    /// Builder method to set the TCP port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set the connect and request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Builder method to set the base path. A leading `/` is added if missing.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = normalize_base_path(base_path.into());
        self
    }

    /// Builder method to set the reserved API version label.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Builder method to set the reserved method label.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Builder method to set the URL scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Builder method to enable or disable TLS certificate and hostname checks.
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Builder method to enable or disable the per-client cookie store.
    pub fn with_cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    /// Basic auth credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Account name.
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Target host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Target port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Timeout in whole seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Timeout applied to connection establishment and to the whole request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base path prefixed to every request.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Reserved API version label. Not used when dispatching requests.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Reserved method label. Not used when dispatching requests.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// URL scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Whether TLS certificates and hostnames are verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Whether the client keeps cookies between requests.
    pub fn cookie_store(&self) -> bool {
        self.cookie_store
    }

    /// Check that the config describes a reachable URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url().map(|_| ())
    }

    /// Compose `{scheme}://{host}:{port}{base_path}`.
    ///
    /// IPv6 literals are wrapped in brackets.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if host
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '@') || c.is_whitespace())
        {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let authority_host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };

        let url = format!(
            "{}://{}:{}{}",
            self.scheme,
            authority_host,
            self.port,
            normalize_base_path(self.base_path.clone())
        );

        let parsed = Url::parse(&url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }

        Ok(url)
    }
}

fn normalize_base_path(base_path: String) -> String {
    if base_path.is_empty() || base_path.starts_with('/') {
        base_path
    } else {
        format!("/{}", base_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::new("admin", "secret", "10.0.0.5");

        assert_eq!(config.port(), 9440);
        assert_eq!(config.timeout_secs(), 3);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.base_path(), "/PrismGateway/services/rest/v1");
        assert_eq!(config.api_version(), "v3");
        assert_eq!(config.method(), None);
        assert_eq!(config.scheme(), Scheme::Https);
        assert!(!config.verify_tls());
        assert!(config.cookie_store());
    }

    #[test]
    fn test_secure_enables_verification() {
        let config = ConnectionConfig::secure("admin", "secret", "prism.example.com");
        assert!(config.verify_tls());
        assert_eq!(config.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_base_url_exact() {
        let config = ConnectionConfig::new("admin", "secret", "10.0.0.5");
        assert_eq!(
            config.base_url().unwrap(),
            "https://10.0.0.5:9440/PrismGateway/services/rest/v1"
        );

        let v3 = ConnectionConfig::new("admin", "secret", "prism.local")
            .with_port(443)
            .with_base_path(V3_BASE_PATH);
        assert_eq!(v3.base_url().unwrap(), "https://prism.local:443/api/nutanix/v3");
    }

    #[test]
    fn test_base_path_gets_leading_slash() {
        let config = ConnectionConfig::new("a", "b", "host").with_base_path("api/v3");
        assert_eq!(config.base_path(), "/api/v3");
        assert_eq!(config.base_url().unwrap(), "https://host:9440/api/v3");
    }

    #[test]
    fn test_empty_base_path() {
        let config = ConnectionConfig::new("a", "b", "host").with_base_path("");
        assert_eq!(config.base_url().unwrap(), "https://host:9440");
    }

    #[test]
    fn test_ipv6_host_bracketed() {
        let config = ConnectionConfig::new("a", "b", "fd00::5").with_base_path("/api/v3");
        assert_eq!(config.base_url().unwrap(), "https://[fd00::5]:9440/api/v3");

        let bracketed = ConnectionConfig::new("a", "b", "[fd00::5]").with_base_path("/api/v3");
        assert_eq!(bracketed.base_url().unwrap(), "https://[fd00::5]:9440/api/v3");
    }

    #[test]
    fn test_invalid_hosts_rejected() {
        assert_eq!(
            ConnectionConfig::new("a", "b", "").validate(),
            Err(ConfigError::EmptyHost)
        );
        assert_eq!(
            ConnectionConfig::new("a", "b", "   ").validate(),
            Err(ConfigError::EmptyHost)
        );
        assert!(matches!(
            ConnectionConfig::new("a", "b", "evil.com/path").validate(),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(matches!(
            ConnectionConfig::new("a", "b", "user@host").validate(),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(matches!(
            ConnectionConfig::new("a", "b", "bad host").validate(),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(matches!(
            ConnectionConfig::new("a", "b", "not:an:ipv6::::addr").validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_zero_port_and_timeout_rejected() {
        let base = ConnectionConfig::new("a", "b", "host");
        assert_eq!(base.clone().with_port(0).validate(), Err(ConfigError::InvalidPort));
        assert_eq!(
            base.with_timeout_secs(0).validate(),
            Err(ConfigError::InvalidTimeout)
        );
    }

    #[test]
    fn test_reserved_fields_stored() {
        let config = ConnectionConfig::new("a", "b", "host")
            .with_method("GET")
            .with_api_version("v4");
        assert_eq!(config.method(), Some("GET"));
        assert_eq!(config.api_version(), "v4");
        assert_eq!(config.base_url().unwrap(), "https://host:9440/PrismGateway/services/rest/v1");
    }

    #[test]
    fn test_from_base_uri() {
        let config =
            ConnectionConfig::from_base_uri("admin", "secret", "https://10.0.0.5:9440/api/nutanix/v3/")
                .unwrap();
        assert_eq!(config.host(), "10.0.0.5");
        assert_eq!(config.port(), 9440);
        assert_eq!(config.base_path(), "/api/nutanix/v3");
        assert_eq!(config.scheme(), Scheme::Https);
        assert!(!config.verify_tls());
        assert_eq!(config.base_url().unwrap(), "https://10.0.0.5:9440/api/nutanix/v3");
    }

    #[test]
    fn test_from_base_uri_default_port() {
        let config = ConnectionConfig::from_base_uri("a", "b", "http://gateway.local").unwrap();
        assert_eq!(config.scheme(), Scheme::Http);
        assert_eq!(config.port(), 80);
        assert_eq!(config.base_path(), "");
        assert_eq!(config.base_url().unwrap(), "http://gateway.local:80");
    }

    #[test]
    fn test_from_base_uri_rejects_bad_input() {
        assert!(matches!(
            ConnectionConfig::from_base_uri("a", "b", "not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert_eq!(
            ConnectionConfig::from_base_uri("a", "b", "ftp://host/files"),
            Err(ConfigError::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_from_base_uri_rejects_query_and_fragment() {
        for uri in [
            "https://h:9440/api?x=1",
            "https://h:9440/api#section",
            "https://h:9440/api?",
        ] {
            match ConnectionConfig::from_base_uri("a", "b", uri) {
                Err(ConfigError::InvalidBaseUrl { url, .. }) => assert_eq!(url, uri),
                other => panic!("Expected InvalidBaseUrl for {}, got {:?}", uri, other),
            }
        }
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ConnectionConfig = serde_json::from_str(
            r#"{"username":"admin","password":"secret","host":"10.0.0.5"}"#,
        )
        .unwrap();
        assert_eq!(config, ConnectionConfig::new("admin", "secret", "10.0.0.5"));
    }

    #[test]
    fn test_deserialize_overrides() {
        let config: ConnectionConfig = serde_json::from_str(
            r#"{
                "username": "admin",
                "password": "secret",
                "host": "prism.local",
                "port": 443,
                "timeout_secs": 10,
                "base_path": "/api/nutanix/v3",
                "scheme": "http",
                "verify_tls": true,
                "cookie_store": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.port(), 443);
        assert_eq!(config.timeout_secs(), 10);
        assert_eq!(config.scheme(), Scheme::Http);
        assert!(config.verify_tls());
        assert!(!config.cookie_store());
        assert_eq!(config.base_url().unwrap(), "http://prism.local:443/api/nutanix/v3");
    }

    #[test]
    fn test_serialize_omits_password() {
        let config = ConnectionConfig::new("admin", "hunter2", "host");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""username":"admin""#));
        assert!(!json.contains("hunter2"));
    }
}
