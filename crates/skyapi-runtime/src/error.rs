use thiserror::Error;

use crate::config::OriginConvention;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The token endpoint answered 4xx/5xx.
    #[error("token request failed with status {status}: {body}")]
    Auth { status: u16, body: String },

    /// The API answered 4xx/5xx. Displays as the raw response body.
    #[error("{body}")]
    Request { status: u16, body: String },

    #[error("refresh requires both `key` and `secret`")]
    MissingCredentials,

    #[error("no origin configured: set `origin` or `{}`", .0.field())]
    MissingOrigin(OriginConvention),

    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an `Auth` or `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Auth { status, .. } | ClientError::Request { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Response body of an `Auth` or `Request` error.
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Auth { body, .. } | ClientError::Request { body, .. } => Some(body),
            _ => None,
        }
    }
}
