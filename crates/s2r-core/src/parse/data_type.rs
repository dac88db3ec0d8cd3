use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an operation parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Path,
    Query,
    Header,
    Body,
    Form,
    /// Any tag outside the Swagger 1.2 set. Such parameters are ignored.
    #[serde(other)]
    Unknown,
}

/// Swagger 1.x data type fields, shared by operation parameters, model
/// properties and `items` definitions.
///
/// The copy-through fields are kept as raw JSON because Swagger documents
/// in the wild disagree on their types (`minimum` is a string in 1.2 and a
/// number elsewhere); each converter decides what it accepts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "paramType", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Value>,

    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<DataType>>,

    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<Value>,
}

impl DataType {
    /// The model this data type points at, if it is not a primitive:
    /// `$ref` first, then a non-primitive `type`.
    pub fn model_name(&self) -> Option<&str> {
        self.ref_name.as_deref().or(self.data_type.as_deref())
    }

    pub fn is_file(&self) -> bool {
        self.data_type.as_deref() == Some("File")
    }
}
