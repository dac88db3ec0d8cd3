use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::version::ApiVersion;

/// A Swagger 1.x resource listing: the index naming each API declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceListing {
    #[serde(rename = "swaggerVersion", skip_serializing_if = "Option::is_none")]
    pub swagger_version: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<Value>,

    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<ApiVersion>,

    /// Required. Kept optional so its absence is reported as an invalid
    /// listing rather than a parse failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apis: Option<Vec<ApiReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<IndexMap<String, Authorization>>,
}

/// A stub pointing at an API declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReference {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// API metadata from the resource listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
}

/// An authorization scheme, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Authorization {
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Authorization),
    #[serde(rename = "apiKey")]
    ApiKey(ApiKeyAuthorization),
    #[serde(rename = "basicAuth")]
    BasicAuth,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Authorization {
    #[serde(default)]
    pub grant_types: GrantTypes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<Scope>>,
}

/// The grants an OAuth2 authorization offers. `order` lists the grants in
/// the order their keys appear in the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GrantTypes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<ImplicitGrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCodeGrant>,
    #[serde(skip)]
    pub order: Vec<GrantKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantKind {
    Implicit,
    AuthorizationCode,
}

impl<'de> Deserialize<'de> for GrantTypes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut grants = GrantTypes::default();

        for (key, value) in raw {
            match key.as_str() {
                "implicit" => {
                    grants.implicit =
                        Some(serde_json::from_value(value).map_err(de::Error::custom)?);
                    grants.order.push(GrantKind::Implicit);
                }
                "authorization_code" => {
                    grants.authorization_code =
                        Some(serde_json::from_value(value).map_err(de::Error::custom)?);
                    grants.order.push(GrantKind::AuthorizationCode);
                }
                _ => {}
            }
        }

        Ok(grants)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplicitGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_endpoint: Option<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCodeGrant {
    #[serde(default)]
    pub token_request_endpoint: Endpoint,
    #[serde(default)]
    pub token_endpoint: Endpoint,
}

/// An OAuth 2.0 endpoint. Which of the optional names apply depends on the
/// endpoint's role in the grant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
}

/// How an API key is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassAs {
    Header,
    Query,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyAuthorization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_as: Option<PassAs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyname: Option<String>,
}
