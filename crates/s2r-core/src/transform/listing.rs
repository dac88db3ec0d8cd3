use indexmap::IndexMap;
use log::{debug, warn};

use super::security::convert_authorization;
use super::{ensure_supported, fold_version, resource_index};
use crate::error::ConvertError;
use crate::parse::listing::{Authorization, Info, ResourceListing};
use crate::raml::{Documentation, RamlObject, SecurityScheme};
use crate::version::detect_from_fields;

/// Fold a resource listing into the RAML object: title, documentation,
/// security schemes and one stub resource per referenced declaration.
pub fn convert_resource_listing(
    listing: &ResourceListing,
    mut raml: RamlObject,
) -> Result<RamlObject, ConvertError> {
    ensure_supported(detect_from_fields(
        listing.swagger_version.as_ref(),
        listing.swagger.as_ref(),
    ))?;

    let apis = listing
        .apis
        .as_ref()
        .ok_or(ConvertError::InvalidResourceListing)?;

    fold_version(&mut raml.version, listing.api_version.as_ref())?;

    // Stubs only: the methods arrive with the declarations.
    for api in apis {
        let index = resource_index(&mut raml.resources, &api.path);
        if let Some(description) = api.description.as_deref().filter(|d| !d.is_empty()) {
            raml.resources[index].description = Some(description.to_string());
        }
    }

    if let Some(info) = &listing.info {
        convert_info(info, &mut raml);
    }

    if let Some(authorizations) = &listing.authorizations {
        raml.security_schemes = convert_authorizations(authorizations);
    }

    debug!(
        "converted resource listing ({} apis, {} security schemes)",
        apis.len(),
        raml.security_schemes.len()
    );
    Ok(raml)
}

fn convert_info(info: &Info, raml: &mut RamlObject) {
    let sections = [
        ("Description", &info.description),
        ("Terms of Service URL", &info.terms_of_service_url),
        ("Contact", &info.contact),
        ("License", &info.license),
        ("License URL", &info.license_url),
    ];

    let documentation: Vec<Documentation> = sections
        .into_iter()
        .filter_map(|(title, content)| {
            content
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|content| Documentation {
                    title: title.to_string(),
                    content: content.to_string(),
                })
        })
        .collect();

    if let Some(title) = info.title.as_deref().filter(|t| !t.is_empty()) {
        raml.title = Some(title.to_string());
    }

    if !documentation.is_empty() {
        raml.documentation = documentation;
    }
}

fn convert_authorizations(
    authorizations: &IndexMap<String, Authorization>,
) -> Vec<IndexMap<String, SecurityScheme>> {
    authorizations
        .iter()
        .filter_map(|(name, authorization)| match convert_authorization(authorization) {
            Some(scheme) => Some(IndexMap::from([(name.clone(), scheme)])),
            None => {
                warn!("skipping authorization {name:?} of unknown type");
                None
            }
        })
        .collect()
}
