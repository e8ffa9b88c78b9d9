pub mod components;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

use std::path::Path;

use serde_json::Value;

use crate::error::ParseError;
use spec::SpecDocument;

/// Source text format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// `.json` files are JSON; everything else is read as YAML, which is a
    /// superset of JSON anyway.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SpecFormat::Json,
            _ => SpecFormat::Yaml,
        }
    }
}

/// Parse raw document text into an untyped JSON tree.
pub fn parse_value(input: &str, format: SpecFormat) -> Result<Value, ParseError> {
    match format {
        SpecFormat::Json => Ok(serde_json::from_str(input)?),
        SpecFormat::Yaml => Ok(serde_yaml_ng::from_str(input)?),
    }
}

/// Convert a dereferenced JSON tree into the typed document.
pub fn from_value(value: Value) -> Result<SpecDocument, serde_json::Error> {
    serde_json::from_value(value)
}
