//! POST request bodies.

use serde::Serialize;
use serde_json::Value;

use crate::error::BodyError;

/// Body of a POST request: a structured value or already-encoded text.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured data, normally JSON-encoded before sending.
    Json(Value),
    /// Pre-serialized payload.
    Text(String),
}

impl RequestBody {
    /// Build a structured body from any serializable value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// Produce the payload bytes sent on the wire.
    ///
    /// With `encode_as_json` the body is rendered as compact JSON text, so a
    /// text body becomes a JSON string literal. Without it, text is sent
    /// verbatim; structured values other than strings have no unencoded
    /// form and are rejected.
    pub fn into_payload(self, encode_as_json: bool) -> Result<String, BodyError> {
        match (self, encode_as_json) {
            (Self::Json(value), true) => Ok(value.to_string()),
            (Self::Text(text), true) => Ok(Value::String(text).to_string()),
            (Self::Text(text), false) => Ok(text),
            (Self::Json(Value::String(text)), false) => Ok(text),
            (Self::Json(value), false) => Err(BodyError::NotText(json_kind(&value))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}
