use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use super::parameter::Parameter;
use super::request_body::RequestBody;
use super::security::SecurityRequirement;

/// HTTP method keys recognized inside a path item, lowercase as in OpenAPI.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,

    pub summary: Option<String>,

    pub description: Option<String>,

    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,

    pub deprecated: bool,

    pub security: Option<Vec<SecurityRequirement>>,
}

/// A path item: shared parameters plus operations keyed by lowercase HTTP
/// method, in the order the source document declares them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub operations: IndexMap<String, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: IndexMap<String, serde_json::Value> = IndexMap::deserialize(deserializer)?;
        let mut item = PathItem::default();

        for (key, value) in raw {
            match key.as_str() {
                "summary" => item.summary = value.as_str().map(String::from),
                "description" => item.description = value.as_str().map(String::from),
                "parameters" => {
                    item.parameters = serde_json::from_value(value).map_err(de::Error::custom)?;
                }
                method if HTTP_METHODS.contains(&method) => {
                    let op: Operation = serde_json::from_value(value)
                        .map_err(|e| de::Error::custom(format!("{method}: {e}")))?;
                    item.operations.insert(key, op);
                }
                // servers, $ref leftovers and extensions carry nothing the
                // transform needs
                _ => {}
            }
        }

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_order_preserved() {
        let item: PathItem = serde_json::from_str(
            r#"{
                "post": {"operationId": "b"},
                "parameters": [{"name": "id", "in": "path", "required": true}],
                "get": {"operationId": "a"},
                "x-internal": true
            }"#,
        )
        .unwrap();
        let methods: Vec<&str> = item.operations.keys().map(String::as_str).collect();
        assert_eq!(methods, vec!["post", "get"]);
        assert_eq!(item.parameters.len(), 1);
    }

    #[test]
    fn test_operation_defaults() {
        let op: Operation = serde_json::from_str("{}").unwrap();
        assert!(op.parameters.is_empty());
        assert!(op.request_body.is_none());
        assert!(op.security.is_none());
    }
}
