use indexmap::IndexMap;
use serde::Deserialize;

use super::schema::Schema;

/// A media type object; only the schema matters for body synthesis.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub description: Option<String>,

    pub content: IndexMap<String, MediaType>,

    pub required: bool,
}

impl RequestBody {
    /// The schema used to synthesize body parameters: `application/json`
    /// when present, otherwise the first declared media type.
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content
            .get("application/json")
            .or_else(|| self.content.first().map(|(_, mt)| mt))
            .and_then(|mt| mt.schema.as_ref())
    }
}
