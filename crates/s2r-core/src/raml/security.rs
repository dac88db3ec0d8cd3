use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::methods::RamlParameter;

/// The RAML security scheme types produced from Swagger authorizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecuritySchemeType {
    #[serde(rename = "OAuth 2.0")]
    OAuth2,
    #[serde(rename = "x-api-key")]
    ApiKey,
    #[serde(rename = "Basic Authentication")]
    Basic,
}

/// A RAML security scheme definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub described_by: Option<DescribedBy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<OAuth2Settings>,
}

impl SecurityScheme {
    pub fn new(scheme_type: SecuritySchemeType) -> Self {
        Self {
            scheme_type,
            description: None,
            described_by: None,
            settings: None,
        }
    }
}

/// Where a scheme expects its credentials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribedBy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, RamlParameter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<IndexMap<String, RamlParameter>>,
}

/// OAuth 2.0 settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_uri: Option<String>,

    pub authorization_grants: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}
