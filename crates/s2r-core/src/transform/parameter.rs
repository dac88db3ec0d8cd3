use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use crate::parse::data_type::DataType;
use crate::raml::{RamlParameter, RamlType};
use crate::version::is_truthy;

/// Seed a RAML parameter from a Swagger primitive type name.
fn seed_from_type(data_type: &str) -> Option<RamlParameter> {
    let param_type = match data_type {
        "string" => RamlType::String,
        "number" => RamlType::Number,
        "integer" => RamlType::Integer,
        "boolean" => RamlType::Boolean,
        "File" => RamlType::File,
        "array" => {
            return Some(RamlParameter {
                repeat: Some(true),
                ..RamlParameter::default()
            });
        }
        _ => return None,
    };
    Some(RamlParameter {
        param_type: Some(param_type),
        ..RamlParameter::default()
    })
}

/// Overlay the type and bounds implied by a Swagger format.
fn apply_format(format: &str, param: &mut RamlParameter) {
    match format {
        "int32" => {
            param.param_type = Some(RamlType::Integer);
            param.minimum = Some(i32::MIN.into());
            param.maximum = Some(i32::MAX.into());
        }
        "int64" => {
            param.param_type = Some(RamlType::Integer);
            param.minimum = Some(i64::MIN.into());
            param.maximum = Some(i64::MAX.into());
        }
        "date" | "date-time" => param.param_type = Some(RamlType::Date),
        _ => {}
    }
}

/// Convert a single Swagger parameter to a RAML named parameter.
pub fn convert_parameter(param: &DataType) -> RamlParameter {
    // TODO: expand `$ref` and model-typed parameters; they currently convert
    // to an untyped parameter.
    let mut raml = param
        .data_type
        .as_deref()
        .and_then(seed_from_type)
        .unwrap_or_default();

    if let Some(format) = param.format.as_deref() {
        apply_format(format, &mut raml);
    }

    if let Some(Value::String(description)) = &param.description {
        raml.description = Some(description.clone());
    }
    if let Some(Value::Bool(required)) = param.required {
        raml.required = Some(required);
    }
    if let Some(default) = param.default_value.as_ref().filter(|v| is_truthy(v)) {
        raml.default = Some(default.clone());
    }
    if let Some(Value::Array(values)) = &param.enum_values {
        raml.enum_values = Some(values.clone());
    }
    if let Some(Value::Number(minimum)) = &param.minimum {
        raml.minimum = Some(minimum.clone());
    }
    if let Some(Value::Number(maximum)) = &param.maximum {
        raml.maximum = Some(maximum.clone());
    }

    raml
}

/// Convert a group of parameters into a map keyed by parameter name.
pub fn convert_parameters<'a>(
    params: impl IntoIterator<Item = &'a DataType>,
) -> IndexMap<String, RamlParameter> {
    let mut converted = IndexMap::new();
    for param in params {
        match &param.name {
            Some(name) => {
                converted.insert(name.clone(), convert_parameter(param));
            }
            None => warn!("skipping parameter without a name"),
        }
    }
    converted
}
