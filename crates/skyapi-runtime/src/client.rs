use std::fmt;
use std::time::SystemTime;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use crate::config::{ClientConfig, OriginConvention};
use crate::error::ClientError;
use crate::query;
use crate::request::ApiRequest;
use crate::token::TokenState;

const HTTP_TARGET: &str = "skyapi_runtime::http";
const ENV_HEADER: &str = "x-dh-env";
const BODY_METHODS: [Method; 4] = [Method::PUT, Method::POST, Method::PATCH, Method::DELETE];

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    audience: Option<&'a str>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client behind every generated module.
///
/// The stored token is the only mutable state. It sits behind one async
/// mutex that is held across the expiry check and any refresh, so
/// concurrent calls that find the token missing or expired trigger a single
/// client-credentials exchange.
pub struct Client {
    http: reqwest::Client,
    no_redirect: reqwest::Client,
    config: ClientConfig,
    origin: String,
    token_url: String,
    token: Mutex<Option<String>>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("origin", &self.origin)
            .field("token_url", &self.token_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(config: ClientConfig, convention: OriginConvention) -> Result<Self, ClientError> {
        let origin = config.resolve_origin(convention)?;
        let token_url = format!("{}/oauth/token", config.resolve_auth_origin(&origin));

        let mut builder = reqwest::Client::builder();
        let mut no_redirect = reqwest::Client::builder().redirect(Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
            no_redirect = no_redirect.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            no_redirect: no_redirect.build()?,
            token: Mutex::new(config.token.clone()),
            config,
            origin,
            token_url,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL requests are sent to.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Value of the `/v{version}` path prefix.
    pub fn version(&self) -> &str {
        self.config.version()
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// The currently stored token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub async fn token_state(&self) -> TokenState {
        TokenState::of(self.token.lock().await.as_deref(), SystemTime::now())
    }

    /// Exchange `key`/`secret` for a new access token and store it.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        let mut token = self.token.lock().await;
        let fresh = self.fetch_token().await?;
        *token = Some(fresh.clone());
        Ok(fresh)
    }

    async fn fetch_token(&self) -> Result<String, ClientError> {
        let (Some(key), Some(secret)) = (&self.config.key, &self.config.secret) else {
            return Err(ClientError::MissingCredentials);
        };
        log::debug!("requesting access token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .json(&TokenRequest {
                grant_type: "client_credentials",
                client_id: key,
                client_secret: secret,
                audience: self.config.audience.as_deref(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::Auth {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: TokenResponse = serde_json::from_str(&body)?;
        Ok(parsed.access_token)
    }

    /// The token to attach to a secured call, refreshing first when it is
    /// missing or expired and credentials are configured.
    async fn authorize(&self) -> Result<Option<String>, ClientError> {
        let mut token = self.token.lock().await;
        match TokenState::of(token.as_deref(), SystemTime::now()) {
            TokenState::Valid => {}
            _ if self.config.has_credentials() => {
                *token = Some(self.fetch_token().await?);
            }
            TokenState::Expired => {
                log::warn!("access token has expired and no credentials are configured to refresh it");
            }
            TokenState::NoToken => {}
        }
        Ok(token.clone())
    }

    /// Execute one API call and return its parsed JSON body.
    pub async fn request(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
            security,
            options,
        } = request;
        let method = options.method.unwrap_or(method);

        let mut url = Url::parse(&format!("{}{}", self.origin, path))?;
        query::append(&mut url, &query);

        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }
        if let Some(env) = &self.config.env {
            headers.insert(HeaderName::from_static(ENV_HEADER), header_value(ENV_HEADER, env)?);
        }
        if security {
            if let Some(token) = self.authorize().await? {
                headers.insert(AUTHORIZATION, header_value("authorization", &format!("Bearer {token}"))?);
            }
        }

        let payload = if BODY_METHODS.contains(&method) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Some(serde_json::to_vec(&body)?)
        } else {
            None
        };

        let http = match options.follow_redirects {
            Some(false) => &self.no_redirect,
            _ => &self.http,
        };
        let mut builder = http.request(method.clone(), url.clone()).headers(headers);
        if let Some(payload) = payload {
            builder = builder.body(payload);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        if self.config.debug {
            log::debug!(target: HTTP_TARGET, "--> {method} {url}");
        }
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if self.config.debug {
            log::debug!(target: HTTP_TARGET, "<-- {} {method} {url} {text}", status.as_u16());
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::Request {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn header_name(name: &str) -> Result<HeaderName, ClientError> {
    HeaderName::try_from(name).map_err(|_| ClientError::InvalidHeader {
        name: name.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::try_from(value).map_err(|_| ClientError::InvalidHeader {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: ClientConfig) -> Client {
        Client::new(config, OriginConvention::Domain).unwrap()
    }

    #[test]
    fn test_token_url_follows_auth_origin() {
        let c = client(ClientConfig {
            origin: Some("http://localhost:5000".into()),
            ..Default::default()
        });
        assert_eq!(c.token_url(), "http://localhost:5000/oauth/token");
        assert_eq!(c.version(), "2");

        let c = client(ClientConfig {
            domain: Some("api.skycatch.com".into()),
            tenant: Some("skycatch.auth0.com".into()),
            ..Default::default()
        });
        assert_eq!(c.origin(), "https://api.skycatch.com");
        assert_eq!(c.token_url(), "https://skycatch.auth0.com/oauth/token");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let c = client(ClientConfig {
            origin: Some("http://localhost:5000".into()),
            key: Some("key".into()),
            secret: Some("hunter2".into()),
            token: Some("eyJ.payload.sig".into()),
            ..Default::default()
        });
        let shown = format!("{c:?}");
        assert!(shown.contains("http://localhost:5000/oauth/token"));
        assert!(!shown.contains("hunter2"));
        assert!(!shown.contains("eyJ.payload.sig"));
    }

    #[test]
    fn test_new_without_origin_fails() {
        let err = Client::new(ClientConfig::default(), OriginConvention::Tenant).unwrap_err();
        assert!(matches!(err, ClientError::MissingOrigin(OriginConvention::Tenant)));
    }

    #[tokio::test]
    async fn test_refresh_without_credentials() {
        let c = client(ClientConfig {
            origin: Some("http://localhost:5000".into()),
            key: Some("key".into()),
            ..Default::default()
        });
        assert!(matches!(c.refresh().await, Err(ClientError::MissingCredentials)));
        assert_eq!(c.token_state().await, TokenState::NoToken);
    }

    #[tokio::test]
    async fn test_unauthenticated_client_keeps_no_token() {
        let c = client(ClientConfig {
            origin: Some("http://localhost:5000".into()),
            ..Default::default()
        });
        assert_eq!(c.authorize().await.unwrap(), None);
    }
}
