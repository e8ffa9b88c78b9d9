use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ClientError;

/// API version prefix used when none is configured.
pub const DEFAULT_VERSION: &str = "2";

/// Which config field supplies the origin when `origin` is not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OriginConvention {
    /// `https://{domain}`
    #[default]
    Domain,
    /// `https://{tenant}`
    Tenant,
}

impl OriginConvention {
    pub fn field(&self) -> &'static str {
        match self {
            OriginConvention::Domain => "domain",
            OriginConvention::Tenant => "tenant",
        }
    }
}

/// Client construction options. Everything is optional; a client with no
/// `key`/`secret` and no `token` is a valid unauthenticated client.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Sent as `x-dh-env` on every request.
    pub env: Option<String>,
    pub origin: Option<String>,
    pub domain: Option<String>,
    pub tenant: Option<String>,
    /// Client id for the client-credentials exchange.
    pub key: Option<String>,
    /// Client secret for the client-credentials exchange.
    pub secret: Option<String>,
    pub audience: Option<String>,
    /// Pre-supplied access token.
    pub token: Option<String>,
    /// Path prefix `/v{version}`.
    pub version: Option<String>,
    /// Origin of the token endpoint.
    pub auth_origin: Option<String>,
    /// Emit every request and response through `log::debug!`.
    pub debug: bool,
    /// Default timeout for every request.
    pub timeout: Option<Duration>,
}

/// Shown in place of secrets.
const REDACTED: &str = "<redacted>";

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("env", &self.env)
            .field("origin", &self.origin)
            .field("domain", &self.domain)
            .field("tenant", &self.tenant)
            .field("key", &self.key)
            .field("secret", &self.secret.as_ref().map(|_| REDACTED))
            .field("audience", &self.audience)
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .field("version", &self.version)
            .field("auth_origin", &self.auth_origin)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Read `SKYAPI_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source, using the `SKYAPI_*` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            env: var("SKYAPI_ENV"),
            origin: var("SKYAPI_ORIGIN"),
            domain: var("SKYAPI_DOMAIN"),
            tenant: var("SKYAPI_TENANT"),
            key: var("SKYAPI_KEY"),
            secret: var("SKYAPI_SECRET"),
            audience: var("SKYAPI_AUDIENCE"),
            token: var("SKYAPI_TOKEN"),
            version: var("SKYAPI_VERSION"),
            auth_origin: var("SKYAPI_AUTH_ORIGIN"),
            debug: var("SKYAPI_DEBUG").is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
            timeout: var("SKYAPI_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// The base URL requests are sent to, without a trailing slash.
    pub fn resolve_origin(&self, convention: OriginConvention) -> Result<String, ClientError> {
        let host = match convention {
            OriginConvention::Domain => &self.domain,
            OriginConvention::Tenant => &self.tenant,
        };
        let origin = match (&self.origin, host) {
            (Some(origin), _) => origin.clone(),
            (None, Some(host)) => format!("https://{host}"),
            (None, None) => return Err(ClientError::MissingOrigin(convention)),
        };
        Ok(origin.trim_end_matches('/').to_string())
    }

    /// The origin of the token endpoint: `auth_origin`, else the tenant,
    /// else the API origin itself.
    pub fn resolve_auth_origin(&self, origin: &str) -> String {
        let auth_origin = match (&self.auth_origin, &self.tenant) {
            (Some(auth_origin), _) => auth_origin.clone(),
            (None, Some(tenant)) => format!("https://{tenant}"),
            (None, None) => origin.to_string(),
        };
        auth_origin.trim_end_matches('/').to_string()
    }

    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    pub fn has_credentials(&self) -> bool {
        self.key.is_some() && self.secret.is_some()
    }
}
