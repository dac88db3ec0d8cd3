use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::data_type::DataType;
use crate::version::ApiVersion;

/// A Swagger 1.x API declaration: one resource path and its operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeclaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_version: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<ApiVersion>,

    /// Required, validated by the converter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,

    /// Required, validated by the converter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apis: Option<Vec<Api>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub models: IndexMap<String, Model>,
}

/// One path of a declaration with the operations available on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,
}

/// `deprecated` shows up both as a JSON boolean and as the string `"true"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecated {
    Flag(bool),
    Text(String),
}

impl Deprecated {
    pub fn is_set(&self) -> bool {
        match self {
            Deprecated::Flag(flag) => *flag,
            Deprecated::Text(text) => text == "true",
        }
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Required, validated by the converter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecated>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<DataType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_messages: Vec<ResponseMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,
}

/// A documented response. `code` is an integer in Swagger 1.2 but some
/// generators emit strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub code: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_model: Option<String>,
}

impl ResponseMessage {
    /// The status code as a `responses` map key.
    pub fn code_key(&self) -> String {
        match &self.code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A model definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, DataType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_types: Vec<String>,
}
