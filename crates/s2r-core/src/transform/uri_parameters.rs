use std::sync::LazyLock;

use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::raml::{RamlParameter, RamlResource};

static TEMPLATE_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("template pattern is valid"));

static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z0-9_]|%\d{2})*$").expect("name pattern is valid"));

/// Whether a name can be used as a RAML URI template parameter as is.
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

/// Camel-case a parameter name that is not a valid template name.
///
/// Examples:
/// - `user.id` → `userId`
/// - `pet-name` → `petName`
/// - `user_id` → `user_id` (already valid)
pub fn sanitize_name(name: &str) -> String {
    if is_valid_name(name) {
        name.to_string()
    } else {
        name.to_lower_camel_case()
    }
}

/// Rewrite every `{name}` placeholder of a URI template with its sanitized name.
pub fn sanitize_template(uri: &str) -> String {
    TEMPLATE_PARAMETER
        .replace_all(uri, |caps: &Captures| format!("{{{}}}", sanitize_name(&caps[1])))
        .into_owned()
}

/// Sanitize a resource's template and rename its `uriParameters` keys to
/// match, keeping the parameter order.
pub fn sanitize_resource(resource: &mut RamlResource) {
    resource.relative_uri = sanitize_template(&resource.relative_uri);

    if let Some(parameters) = resource.uri_parameters.take() {
        let renamed: IndexMap<String, RamlParameter> = parameters
            .into_iter()
            .map(|(name, param)| (sanitize_name(&name), param))
            .collect();
        resource.uri_parameters = Some(renamed);
    }
}
