use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("circular reference detected: {0}")]
    CircularRef(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("failed to read referenced document {}: {source}", path.display())]
    UnreadableDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse referenced document {}: {source}", path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Fatal errors raised while loading a specification.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("spec not found at {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to resolve spec: {0}")]
    Resolution(#[from] ResolveError),

    #[error("spec has an unusable structure: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialize spec: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
