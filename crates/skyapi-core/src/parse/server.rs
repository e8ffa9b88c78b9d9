use serde::Deserialize;

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Server {
    pub url: String,
}
