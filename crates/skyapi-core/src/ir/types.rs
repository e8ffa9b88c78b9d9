use std::fmt;

use serde::Serialize;

use super::operations::OperationRecord;

/// The language-agnostic result of transforming a specification: API
/// metadata plus one record per (path, method), in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrSpec {
    pub info: IrInfo,
    pub operations: Vec<OperationRecord>,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    /// Server URLs declared by the document.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<String>,
    /// Token URL of the recognized scheme's client-credentials flow, when
    /// the document declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
