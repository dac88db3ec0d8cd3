use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::methods::{RamlMethod, RamlParameter};
use super::security::SecurityScheme;
use crate::version::ApiVersion;

/// The RAML object accumulated across every converted Swagger document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ApiVersion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<Documentation>,

    /// Each entry holds exactly one scheme, keyed by its authorization name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_schemes: Vec<IndexMap<String, SecurityScheme>>,

    #[serde(default)]
    pub resources: Vec<RamlResource>,
}

/// A RAML documentation section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    pub title: String,
    pub content: String,
}

/// A node of the resource tree. `relative_uri` is unique among siblings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlResource {
    pub relative_uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_parameters: Option<IndexMap<String, RamlParameter>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RamlMethod>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<RamlResource>,
}

impl RamlResource {
    pub fn new(relative_uri: impl Into<String>) -> Self {
        Self {
            relative_uri: relative_uri.into(),
            ..Self::default()
        }
    }
}

impl RamlObject {
    /// Total number of resources in the tree.
    pub fn resource_count(&self) -> usize {
        fn count(resources: &[RamlResource]) -> usize {
            resources.iter().map(|r| 1 + count(&r.resources)).sum()
        }
        count(&self.resources)
    }

    /// Total number of methods in the tree.
    pub fn method_count(&self) -> usize {
        fn count(resources: &[RamlResource]) -> usize {
            resources
                .iter()
                .map(|r| r.methods.len() + count(&r.resources))
                .sum()
        }
        count(&self.resources)
    }
}
