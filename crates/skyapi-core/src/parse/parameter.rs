use serde::Deserialize;

use super::schema::Schema;

/// Parameter location as declared by the `in` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    /// Swagger 2 style body field. Invalid in OpenAPI 3 but still placed
    /// into the request body.
    Body,
    Cookie,
    /// Missing or unrecognized `in` value. Reported by validation, skipped
    /// by the transform.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A dereferenced operation or path-level parameter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    pub description: Option<String>,

    pub required: bool,

    pub schema: Option<Schema>,
}
