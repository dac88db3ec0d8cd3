use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Swagger versions at or above this are rejected.
pub const MAX_SUPPORTED_SWAGGER_VERSION: f64 = 2.0;

/// An `apiVersion` value. Swagger documents use both JSON strings and
/// numbers here, and the original kind is kept in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiVersion {
    Number(serde_json::Number),
    Text(String),
}

impl ApiVersion {
    /// An empty string counts as no version at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiVersion::Text(s) if s.is_empty())
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            ApiVersion::Number(n) => n.as_f64(),
            ApiVersion::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }

    /// Numeric-aware equality: compare as numbers when both sides parse as
    /// numbers, otherwise compare the textual forms.
    pub fn matches(&self, other: &ApiVersion) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::Number(n) => write!(f, "{n}"),
            ApiVersion::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ApiVersion {
    fn from(value: &str) -> Self {
        ApiVersion::Text(value.to_string())
    }
}

/// Detect the Swagger version of a raw document from `swaggerVersion`,
/// falling back to `swagger`.
pub fn detect_version(doc: &Value) -> Option<f64> {
    detect_from_fields(doc.get("swaggerVersion"), doc.get("swagger"))
}

/// Same as [`detect_version`] for documents already split into fields.
pub fn detect_from_fields(swagger_version: Option<&Value>, swagger: Option<&Value>) -> Option<f64> {
    let field = swagger_version
        .filter(|v| is_truthy(v))
        .or_else(|| swagger.filter(|v| is_truthy(v)))?;

    match field {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Parse the longest leading decimal number, so `"1.2.3"` reads as `1.2`.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, ch) in trimmed.char_indices() {
        match ch {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => seen_dot = true,
            '+' | '-' if i == 0 => {}
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// JavaScript-style truthiness, used where Swagger fields are optional and
/// empty values mean "not set".
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
