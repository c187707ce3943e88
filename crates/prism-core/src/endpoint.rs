//! Relative request paths.

use std::fmt;

/// A path relative to the client's base URL.
///
/// An empty endpoint (or `None`) addresses the base path itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create a new Endpoint from a string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The base path alone.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this endpoint addresses the base path alone.
    pub fn is_root(&self) -> bool {
        self.relative().is_empty()
    }

    /// Append this endpoint to `base_url` with exactly one `/` between them.
    ///
    /// The root endpoint returns `base_url` unchanged.
    pub fn join(&self, base_url: &str) -> String {
        let relative = self.relative();
        if relative.is_empty() {
            return base_url.to_string();
        }
        format!("{}/{}", base_url.trim_end_matches('/'), relative)
    }

    fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<&String> for Endpoint {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<Option<&str>> for Endpoint {
    fn from(s: Option<&str>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}

impl From<Option<String>> for Endpoint {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}
