use indexmap::IndexMap;
use serde::Deserialize;

/// A security scheme type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    #[serde(rename = "oauth2")]
    OAuth2,
    OpenIdConnect,
    MutualTLS,
    #[serde(other)]
    Unknown,
}

/// OAuth2 flows configuration. Only the client-credentials flow is used by
/// the generated client.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OAuthFlows {
    #[serde(rename = "clientCredentials")]
    pub client_credentials: Option<OAuthFlow>,
}

/// A single OAuth2 flow.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OAuthFlow {
    #[serde(rename = "tokenUrl")]
    pub token_url: Option<String>,
}

/// A security scheme definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    #[serde(default)]
    pub flows: Option<OAuthFlows>,
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;
