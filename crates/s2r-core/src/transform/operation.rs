use indexmap::IndexMap;
use log::warn;

use super::parameter::convert_parameters;
use super::schema::{model_to_schema, parameter_to_schema};
use super::uri_parameters::sanitize_resource;
use crate::error::ConvertError;
use crate::parse::data_type::{DataType, ParamType};
use crate::parse::declaration::{ApiDeclaration, Operation, ResponseMessage};
use crate::raml::{BodyContent, RamlBody, RamlMethod, RamlResource, RamlResponse};

pub const JSON_MIME: &str = "application/json";
pub const URL_ENCODED_MIME: &str = "application/x-www-form-urlencoded";
pub const MULTI_PART_MIME: &str = "multipart/form-data";

const DEPRECATED_NOTICE: &str = "This method has been deprecated.";

/// Operation parameters split by `paramType`, in input order.
#[derive(Debug, Default)]
struct ParameterGroups<'a> {
    path: Vec<&'a DataType>,
    query: Vec<&'a DataType>,
    header: Vec<&'a DataType>,
    body: Vec<&'a DataType>,
    form: Vec<&'a DataType>,
}

impl<'a> ParameterGroups<'a> {
    fn group(parameters: &'a [DataType]) -> Self {
        let mut groups = Self::default();
        for param in parameters {
            match param.param_type {
                Some(ParamType::Path) => groups.path.push(param),
                Some(ParamType::Query) => groups.query.push(param),
                Some(ParamType::Header) => groups.header.push(param),
                Some(ParamType::Body) => groups.body.push(param),
                Some(ParamType::Form) => groups.form.push(param),
                Some(ParamType::Unknown) | None => warn!(
                    "ignoring parameter {:?} with unknown paramType",
                    param.name.as_deref().unwrap_or_default()
                ),
            }
        }
        groups
    }
}

/// Convert one operation into a RAML method. Path parameters are attached
/// to `resource` rather than to the returned method.
pub fn convert_operation(
    operation: &Operation,
    declaration: &ApiDeclaration,
    resource: &mut RamlResource,
) -> Result<RamlMethod, ConvertError> {
    let method = operation.method.clone().ok_or(ConvertError::MissingMethod)?;

    let mut raml = RamlMethod {
        method,
        display_name: operation.nickname.clone().filter(|n| !n.is_empty()),
        description: describe(operation),
        ..RamlMethod::default()
    };

    convert_operation_parameters(operation, declaration, &mut raml, resource)?;
    convert_response_messages(operation, declaration, &mut raml)?;

    Ok(raml)
}

/// `notes` wins over `summary`; deprecation is appended as its own paragraph.
fn describe(operation: &Operation) -> Option<String> {
    let mut description = operation
        .notes
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(operation.summary.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string);

    if operation.deprecated.as_ref().is_some_and(|d| d.is_set()) {
        description = Some(match description {
            Some(text) => format!("{text}\n\n{DEPRECATED_NOTICE}"),
            None => DEPRECATED_NOTICE.to_string(),
        });
    }

    description
}

fn convert_operation_parameters(
    operation: &Operation,
    declaration: &ApiDeclaration,
    method: &mut RamlMethod,
    resource: &mut RamlResource,
) -> Result<(), ConvertError> {
    let consumes = operation
        .consumes
        .as_ref()
        .or(declaration.consumes.as_ref())
        .map(Vec::as_slice)
        .unwrap_or_default();
    let groups = ParameterGroups::group(&operation.parameters);

    // Path parameters are shared by every method of the resource.
    if !groups.path.is_empty() {
        resource.uri_parameters = Some(convert_parameters(groups.path.iter().copied()));
        sanitize_resource(resource);
    }

    if !groups.query.is_empty() {
        method.query_parameters = Some(convert_parameters(groups.query.iter().copied()));
    }

    if !groups.header.is_empty() {
        method.headers = Some(convert_parameters(groups.header.iter().copied()));
    }

    if !groups.body.is_empty() {
        convert_body_parameters(&groups.body, consumes, declaration, method)?;
    }

    if !groups.form.is_empty() {
        convert_form_parameters(&groups.form, consumes, method);
    }

    Ok(())
}

fn convert_body_parameters(
    params: &[&DataType],
    consumes: &[String],
    declaration: &ApiDeclaration,
    method: &mut RamlMethod,
) -> Result<(), ConvertError> {
    let [param] = params else {
        return Err(ConvertError::MultipleBodyParameters(params.len()));
    };

    let body = method.body.get_or_insert_with(RamlBody::new);
    for mime in consumes {
        // TODO: convert `application/xml` bodies once an XML schema writer exists.
        let content = if mime == JSON_MIME {
            Some(BodyContent::Schema {
                schema: parameter_to_schema(param, declaration)?,
            })
        } else {
            None
        };
        body.insert(mime.clone(), content);
    }

    Ok(())
}

fn convert_form_parameters(params: &[&DataType], consumes: &[String], method: &mut RamlMethod) {
    let declares = |mime: &str| consumes.iter().any(|m| m == mime);
    let multi_part = declares(MULTI_PART_MIME) || params.iter().any(|p| p.is_file());
    let url_encoded = declares(URL_ENCODED_MIME);

    let form_parameters = convert_parameters(params.iter().copied());
    let form = || {
        Some(BodyContent::Form {
            form_parameters: form_parameters.clone(),
        })
    };

    let body = method.body.get_or_insert_with(RamlBody::new);
    if multi_part {
        body.insert(MULTI_PART_MIME.to_string(), form());
    }
    if url_encoded || !multi_part {
        body.insert(URL_ENCODED_MIME.to_string(), form());
    }
}

fn convert_response_messages(
    operation: &Operation,
    declaration: &ApiDeclaration,
    method: &mut RamlMethod,
) -> Result<(), ConvertError> {
    if operation.response_messages.is_empty() {
        return Ok(());
    }

    let produces = operation
        .produces
        .as_ref()
        .or(declaration.produces.as_ref())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut responses = IndexMap::new();
    for message in &operation.response_messages {
        let response = RamlResponse {
            description: message.message.clone(),
            body: response_body(message, produces, declaration)?,
        };
        responses.insert(message.code_key(), response);
    }
    method.responses = Some(responses);

    Ok(())
}

fn response_body(
    message: &ResponseMessage,
    produces: &[String],
    declaration: &ApiDeclaration,
) -> Result<Option<RamlBody>, ConvertError> {
    if produces.is_empty() {
        return Ok(None);
    }

    let mut body = RamlBody::new();
    for mime in produces {
        let content = match message.response_model.as_deref() {
            Some(model) if mime == JSON_MIME => Some(BodyContent::Schema {
                schema: model_to_schema(model, declaration)?,
            }),
            _ => None,
        };
        body.insert(mime.clone(), content);
    }
    Ok(Some(body))
}
