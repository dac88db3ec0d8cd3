use log::debug;

use super::operation::convert_operation;
use super::{ensure_supported, fold_base_uri, fold_version, resource_index};
use crate::error::ConvertError;
use crate::parse::declaration::{Api, ApiDeclaration};
use crate::raml::RamlObject;
use crate::version::detect_from_fields;

/// Fold an API declaration into the accumulated RAML object.
///
/// The first declaration sets `version` and `baseUri`; later declarations
/// must agree with both. The declaration's operations are placed under the
/// resource named by its `resourcePath`.
pub fn convert_api_declaration(
    declaration: &ApiDeclaration,
    mut raml: RamlObject,
) -> Result<RamlObject, ConvertError> {
    ensure_supported(detect_from_fields(
        declaration.swagger_version.as_ref(),
        declaration.swagger.as_ref(),
    ))?;

    let base_path = declaration
        .base_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(ConvertError::InvalidDeclaration)?;
    let apis = declaration
        .apis
        .as_ref()
        .ok_or(ConvertError::InvalidDeclaration)?;

    fold_version(&mut raml.version, declaration.api_version.as_ref())?;
    fold_base_uri(&mut raml.base_uri, base_path)?;

    for api in apis {
        convert_api(api, declaration, &mut raml)?;
    }

    debug!(
        "folded declaration {:?} ({} apis)",
        declaration.resource_path.as_deref().unwrap_or_default(),
        apis.len()
    );
    Ok(raml)
}

fn convert_api(
    api: &Api,
    declaration: &ApiDeclaration,
    raml: &mut RamlObject,
) -> Result<(), ConvertError> {
    let prefix = declaration
        .resource_path
        .as_deref()
        .filter(|p| !p.is_empty());

    let resource = match prefix.and_then(|p| api.path.strip_prefix(p).map(|rest| (p, rest))) {
        Some((prefix, "")) => {
            let index = resource_index(&mut raml.resources, prefix);
            &mut raml.resources[index]
        }
        Some((prefix, suffix)) => {
            let index = resource_index(&mut raml.resources, prefix);
            let parent = &mut raml.resources[index];
            let child = resource_index(&mut parent.resources, suffix);
            &mut parent.resources[child]
        }
        // A path outside the resource path becomes a top-level resource.
        None => {
            let index = resource_index(&mut raml.resources, &api.path);
            &mut raml.resources[index]
        }
    };

    if let Some(description) = api.description.as_deref().filter(|d| !d.is_empty()) {
        resource.description = Some(description.to_string());
    }

    for operation in &api.operations {
        let method = convert_operation(operation, declaration, resource)?;
        resource.methods.push(method);
    }

    Ok(())
}
