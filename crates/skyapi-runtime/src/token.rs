use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

/// Where the stored token stands, computed lazily at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Valid,
    Expired,
}

impl TokenState {
    pub fn of(token: Option<&str>, now: SystemTime) -> Self {
        let Some(token) = token else {
            return TokenState::NoToken;
        };
        let now = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        match expiry(token) {
            Some(exp) if now >= exp => TokenState::Expired,
            // opaque tokens and tokens without `exp` never expire client side
            _ => TokenState::Valid,
        }
    }
}

/// The `exp` claim of a JWT, in seconds since the epoch. The signature is
/// not verified.
pub fn expiry(token: &str) -> Option<f64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_f64()
}
