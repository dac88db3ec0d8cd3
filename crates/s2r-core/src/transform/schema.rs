use std::collections::HashSet;

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::error::ConvertError;
use crate::parse::data_type::DataType;
use crate::parse::declaration::{ApiDeclaration, Model};

pub const JSON_SCHEMA_DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Swagger types that map straight onto a JSON Schema `type`.
const JSON_TYPES: &[&str] = &["string", "number", "integer", "boolean", "array", "object"];

/// A JSON Schema object. Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JsonSchema {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, JsonSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,

    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Value>,

    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<Value>,
}

impl JsonSchema {
    /// Shallow merge: every field set on `other` replaces the one on `self`.
    pub fn extend(&mut self, other: JsonSchema) {
        fn take<T>(target: &mut Option<T>, source: Option<T>) {
            if source.is_some() {
                *target = source;
            }
        }

        take(&mut self.schema, other.schema);
        take(&mut self.schema_type, other.schema_type);
        take(&mut self.properties, other.properties);
        take(&mut self.description, other.description);
        take(&mut self.default_value, other.default_value);
        take(&mut self.enum_values, other.enum_values);
        take(&mut self.minimum, other.minimum);
        take(&mut self.maximum, other.maximum);
        take(&mut self.items, other.items);
        take(&mut self.required, other.required);
        take(&mut self.unique_items, other.unique_items);
    }

    /// Prefix the draft-04 `$schema` header and render with 2-space indentation.
    fn to_document(mut self) -> Result<String, ConvertError> {
        self.schema = Some(JSON_SCHEMA_DRAFT_04.to_string());
        serde_json::to_string_pretty(&self).map_err(ConvertError::Schema)
    }
}

/// Expands Swagger data types and models of one declaration into JSON Schema.
pub struct SchemaConverter<'a> {
    models: &'a IndexMap<String, Model>,
    /// Models currently being expanded, to stop self-referencing models.
    visiting: HashSet<String>,
}

impl<'a> SchemaConverter<'a> {
    pub fn new(declaration: &'a ApiDeclaration) -> Self {
        Self {
            models: &declaration.models,
            visiting: HashSet::new(),
        }
    }

    /// Convert a parameter or model property.
    pub fn parameter_to_json(&mut self, param: &DataType) -> JsonSchema {
        let mut schema = match param.data_type.as_deref() {
            Some(t) if JSON_TYPES.contains(&t) => JsonSchema {
                schema_type: Some(t.to_string()),
                ..JsonSchema::default()
            },
            _ => param
                .model_name()
                .and_then(|name| self.model_to_json(name))
                .unwrap_or_default(),
        };

        let present = |value: &Option<Value>| value.clone().filter(|v| !v.is_null());

        if let Some(v) = present(&param.description) {
            schema.description = Some(v);
        }
        if let Some(v) = present(&param.default_value) {
            schema.default_value = Some(v);
        }
        if let Some(v) = present(&param.enum_values) {
            schema.enum_values = Some(v);
        }
        if let Some(v) = present(&param.minimum) {
            schema.minimum = Some(v);
        }
        if let Some(v) = present(&param.maximum) {
            schema.maximum = Some(v);
        }
        if let Some(items) = &param.items {
            schema.items = Some(Box::new(self.parameter_to_json(items)));
        }
        if let Some(v) = present(&param.required) {
            schema.required = Some(v);
        }
        if let Some(v) = present(&param.unique_items) {
            schema.unique_items = Some(v);
        }

        schema
    }

    /// Convert a named model, merging in the properties of its parent.
    /// Returns `None` when the model is not defined in the declaration.
    pub fn model_to_json(&mut self, name: &str) -> Option<JsonSchema> {
        self.expand_model(name, true)
    }

    fn expand_model(&mut self, name: &str, resolve_parent: bool) -> Option<JsonSchema> {
        let models = self.models;
        let Some(model) = models.get(name) else {
            warn!("model `{name}` is referenced but not defined");
            return None;
        };

        if !self.visiting.insert(name.to_string()) {
            return Some(JsonSchema::default());
        }

        let mut schema = JsonSchema::default();

        // Only a single inheritance hop is followed.
        if resolve_parent {
            let parent = models
                .iter()
                .find(|(key, candidate)| {
                    key.as_str() != name && candidate.sub_types.iter().any(|s| s == name)
                })
                .map(|(key, _)| key.as_str());

            if let Some(parent) = parent {
                let parent_schema = self.expand_model(parent, false).unwrap_or_default();
                let properties = parent_schema.properties.clone().unwrap_or_default();
                schema.extend(parent_schema);
                schema.properties = Some(properties);
            }
        }

        for (key, property) in &model.properties {
            let converted = self.parameter_to_json(property);
            schema
                .properties
                .get_or_insert_with(IndexMap::new)
                .insert(key.clone(), converted);
        }

        self.visiting.remove(name);
        Some(schema)
    }
}

/// Render a body parameter as a JSON Schema document.
pub fn parameter_to_schema(
    param: &DataType,
    declaration: &ApiDeclaration,
) -> Result<String, ConvertError> {
    SchemaConverter::new(declaration)
        .parameter_to_json(param)
        .to_document()
}

/// Render a named model as a JSON Schema document. An undefined model
/// yields a schema carrying only the `$schema` header.
pub fn model_to_schema(name: &str, declaration: &ApiDeclaration) -> Result<String, ConvertError> {
    SchemaConverter::new(declaration)
        .model_to_json(name)
        .unwrap_or_default()
        .to_document()
}
