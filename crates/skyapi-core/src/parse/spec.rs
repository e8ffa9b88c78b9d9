use indexmap::IndexMap;
use serde::Deserialize;

use super::components::Components;
use super::operation::PathItem;
use super::server::Server;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,

    pub description: Option<String>,

    pub version: String,
}

/// A fully dereferenced OpenAPI 3.x document.
///
/// Every field is optional so that slightly non-conformant documents still
/// load; conformance is reported separately by [`crate::load::validate`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SpecDocument {
    pub openapi: Option<String>,

    pub info: Info,

    pub servers: Vec<Server>,

    pub paths: IndexMap<String, PathItem>,

    pub components: Option<Components>,
}

impl SpecDocument {
    /// Number of (path, method) pairs in the document.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations.len()).sum()
    }
}
