use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::types::NormalizedName;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "trace" => Ok(HttpMethod::Trace),
            other => Err(format!("unknown HTTP method `{other}`")),
        }
    }
}

/// One callable operation: everything a renderer needs to emit a method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    pub name: NormalizedName,
    pub method: HttpMethod,
    /// Path template as declared, e.g. `/datasets/{id}`.
    pub endpoint: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// The operationId, when declared.
    pub operation_id: Option<String>,
    pub parameters: Vec<IrParameter>,
    /// Whether calls require a bearer token from the recognized scheme.
    pub security: bool,
    pub deprecated: bool,
}

impl OperationRecord {
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

/// A parameter with its placement. Names may repeat across locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrParameter {
    /// Name as declared; also the key callers use in the params object.
    pub name: String,
    pub location: ParameterLocation,
    pub param_type: ParamType,
    pub required: bool,
    pub description: Option<String>,
}

/// Where a parameter is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        }
    }
}

/// Declared JSON type of a parameter; informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    #[default]
    Any,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
            ParamType::Any => "any",
        }
    }
}
