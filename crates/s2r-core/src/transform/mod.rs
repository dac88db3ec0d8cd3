pub mod declaration;
pub mod listing;
pub mod operation;
pub mod parameter;
pub mod path_resolver;
pub mod schema;
pub mod security;
pub mod uri_parameters;

pub use declaration::convert_api_declaration;
pub use listing::convert_resource_listing;
pub use path_resolver::resolve;

use crate::error::ConvertError;
use crate::raml::RamlResource;
use crate::version::{ApiVersion, MAX_SUPPORTED_SWAGGER_VERSION};
use uri_parameters::sanitize_template;

/// Reject documents declaring Swagger 2.0 or later. A missing version is
/// left for the shape checks to judge.
pub(crate) fn ensure_supported(version: Option<f64>) -> Result<(), ConvertError> {
    match version {
        Some(found) if found >= MAX_SUPPORTED_SWAGGER_VERSION => {
            Err(ConvertError::UnsupportedVersion(found))
        }
        _ => Ok(()),
    }
}

/// Fold a document's `apiVersion` into the accumulated version.
///
/// An absent or empty incoming version is always consistent. The first
/// version seen is recorded; every later one must match it.
pub(crate) fn fold_version(
    current: &mut Option<ApiVersion>,
    incoming: Option<&ApiVersion>,
) -> Result<(), ConvertError> {
    let Some(incoming) = incoming.filter(|v| !v.is_empty()) else {
        return Ok(());
    };

    match current {
        Some(existing) if !existing.is_empty() => {
            if existing.matches(incoming) {
                Ok(())
            } else {
                Err(ConvertError::VersionConflict {
                    current: existing.to_string(),
                    incoming: incoming.to_string(),
                })
            }
        }
        _ => {
            *current = Some(incoming.clone());
            Ok(())
        }
    }
}

/// Fold a declaration's `basePath` into the accumulated base URI, which
/// must then match exactly.
pub(crate) fn fold_base_uri(current: &mut Option<String>, incoming: &str) -> Result<(), ConvertError> {
    match current {
        Some(existing) if !existing.is_empty() => {
            if existing.as_str() == incoming {
                Ok(())
            } else {
                Err(ConvertError::BasePathConflict {
                    current: existing.clone(),
                    incoming: incoming.to_string(),
                })
            }
        }
        _ => {
            *current = Some(incoming.to_string());
            Ok(())
        }
    }
}

/// Find a sibling by its raw or sanitized URI, or append a new one.
pub(crate) fn resource_index(resources: &mut Vec<RamlResource>, relative_uri: &str) -> usize {
    let sanitized = sanitize_template(relative_uri);
    let existing = resources
        .iter()
        .position(|r| r.relative_uri == relative_uri || r.relative_uri == sanitized);

    match existing {
        Some(index) => index,
        None => {
            resources.push(RamlResource::new(relative_uri));
            resources.len() - 1
        }
    }
}
