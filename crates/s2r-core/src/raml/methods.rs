use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A RAML named parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RamlType {
    String,
    Number,
    Integer,
    Boolean,
    File,
    Date,
}

/// A RAML named parameter (URI, query, header or form parameter).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RamlParameter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<RamlType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Number>,
}

/// Body of a request or response for one mime type. A `None` entry in a
/// body map means the mime type is declared but its content could not be
/// converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyContent {
    Schema {
        schema: String,
    },
    Form {
        #[serde(rename = "formParameters")]
        form_parameters: IndexMap<String, RamlParameter>,
    },
}

/// Mime type to body content.
pub type RamlBody = IndexMap<String, Option<BodyContent>>;

/// A documented response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RamlResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RamlBody>,
}

/// A RAML method, one per Swagger operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlMethod {
    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<IndexMap<String, RamlParameter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, RamlParameter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RamlBody>,

    /// Keyed by status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, RamlResponse>>,
}
