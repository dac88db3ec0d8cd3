use indexmap::IndexMap;

use crate::parse::listing::{
    ApiKeyAuthorization, Authorization, GrantKind, OAuth2Authorization, PassAs,
};
use crate::raml::{
    DescribedBy, OAuth2Settings, RamlParameter, RamlType, SecurityScheme, SecuritySchemeType,
};

const DEFAULT_TOKEN_NAME: &str = "access_token";
const DEFAULT_CLIENT_ID_NAME: &str = "client_id";
const DEFAULT_CLIENT_SECRET_NAME: &str = "client_secret";
const DEFAULT_CODE_TOKEN_NAME: &str = "access_code";

const API_KEY_DESCRIPTION: &str = "Used to send a valid API key for authentication.";

/// Convert a Swagger authorization into a RAML security scheme. Returns
/// `None` for authorization types RAML has no counterpart for.
pub fn convert_authorization(authorization: &Authorization) -> Option<SecurityScheme> {
    match authorization {
        Authorization::OAuth2(oauth2) => Some(convert_oauth2(oauth2)),
        Authorization::ApiKey(api_key) => Some(convert_api_key(api_key)),
        Authorization::BasicAuth => Some(SecurityScheme::new(SecuritySchemeType::Basic)),
        Authorization::Unknown => None,
    }
}

/// Name differs from the Swagger default, so it is worth documenting.
fn non_default<'a>(name: Option<&'a str>, default: &str) -> Option<&'a str> {
    name.filter(|n| !n.is_empty() && *n != default)
}

fn convert_oauth2(authorization: &OAuth2Authorization) -> SecurityScheme {
    let mut settings = OAuth2Settings::default();
    let mut description: Vec<String> = Vec::new();
    let grants = &authorization.grant_types;

    if let Some(scopes) = authorization.scopes.as_ref().filter(|s| !s.is_empty()) {
        let bullets: Vec<String> = scopes
            .iter()
            .filter_map(|scope| {
                scope
                    .description
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .map(|d| format!("* {} - {d}", scope.scope))
            })
            .collect();
        settings.scopes = Some(scopes.iter().map(|s| s.scope.clone()).collect());

        if !bullets.is_empty() {
            description.push("Available scopes: ".to_string());
            description.push(bullets.join("\n"));
        }
    }

    settings.authorization_grants = grants
        .order
        .iter()
        .map(|kind| match kind {
            GrantKind::Implicit => "token".to_string(),
            GrantKind::AuthorizationCode => "code".to_string(),
        })
        .collect();

    if let Some(implicit) = &grants.implicit {
        if let Some(url) = implicit.login_endpoint.as_ref().and_then(|e| e.url.clone()) {
            settings.authorization_uri = Some(url);
        }
        if let Some(name) = non_default(implicit.token_name.as_deref(), DEFAULT_TOKEN_NAME) {
            description.push(format!(
                "The token grant uses \"{name}\" as the token name."
            ));
        }
    }

    if let Some(code) = &grants.authorization_code {
        let request = &code.token_request_endpoint;
        let token = &code.token_endpoint;

        settings.access_token_uri = token.url.clone();
        if request.url.is_some() {
            settings.authorization_uri = request.url.clone();
        }

        if let Some(name) = non_default(request.client_id_name.as_deref(), DEFAULT_CLIENT_ID_NAME) {
            description.push(format!(
                "The code grant uses \"{name}\" as the parameter for passing the client id."
            ));
        }
        if let Some(name) =
            non_default(request.client_secret_name.as_deref(), DEFAULT_CLIENT_SECRET_NAME)
        {
            description.push(format!(
                "The code grant uses \"{name}\" as the parameter for passing the client secret."
            ));
        }
        if let Some(name) = non_default(token.token_name.as_deref(), DEFAULT_CODE_TOKEN_NAME) {
            description.push(format!(
                "The code grant uses \"{name}\" as the parameter for passing the authorization token."
            ));
        }
    }

    let mut scheme = SecurityScheme::new(SecuritySchemeType::OAuth2);
    scheme.settings = Some(settings);
    if !description.is_empty() {
        scheme.description = Some(description.join("\n\n"));
    }
    scheme
}

fn convert_api_key(authorization: &ApiKeyAuthorization) -> SecurityScheme {
    let mut described_by = DescribedBy::default();

    if let Some(keyname) = &authorization.keyname {
        let mut params = IndexMap::new();
        params.insert(
            keyname.clone(),
            RamlParameter {
                param_type: Some(RamlType::String),
                description: Some(API_KEY_DESCRIPTION.to_string()),
                ..RamlParameter::default()
            },
        );

        match authorization.pass_as {
            Some(PassAs::Header) => described_by.headers = Some(params),
            Some(PassAs::Query) => described_by.query_parameters = Some(params),
            Some(PassAs::Unknown) | None => {}
        }
    }

    let mut scheme = SecurityScheme::new(SecuritySchemeType::ApiKey);
    scheme.described_by = Some(described_by);
    scheme
}
