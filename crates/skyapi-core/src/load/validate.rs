use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::parse::operation::HTTP_METHODS;

const PARAMETER_LOCATIONS: [&str; 4] = ["query", "header", "path", "cookie"];

/// A structural conformance problem. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON pointer to the offending node (`""` is the document root).
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.pointer, self.message)
    }
}

/// Check a dereferenced document against the OpenAPI 3.x structure the
/// generator relies on. Returns every problem found, in document order.
pub fn validate(document: &Value) -> Vec<ValidationIssue> {
    let mut v = Validator::default();
    v.document(document);
    v.issues
}

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn report(&mut self, pointer: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            pointer: pointer.to_string(),
            message: message.into(),
        });
    }

    fn document(&mut self, document: &Value) {
        let Some(root) = document.as_object() else {
            self.report("", "document must be an object");
            return;
        };

        match root.get("openapi") {
            None => self.report("", "missing required field `openapi`"),
            Some(Value::String(version)) if version.starts_with("3.") => {}
            Some(Value::String(version)) => {
                self.report("/openapi", format!("unsupported OpenAPI version {version}"))
            }
            Some(_) => self.report("/openapi", "must be a string"),
        }

        match root.get("info") {
            None => self.report("", "missing required field `info`"),
            Some(Value::Object(info)) => {
                self.required_string(info, "/info", "title");
                self.required_string(info, "/info", "version");
            }
            Some(_) => self.report("/info", "must be an object"),
        }

        match root.get("paths") {
            None => self.report("", "missing required field `paths`"),
            Some(Value::Object(paths)) => {
                for (path, item) in paths {
                    self.path_item(path, item);
                }
            }
            Some(_) => self.report("/paths", "must be an object"),
        }
    }

    fn required_string(&mut self, object: &Map<String, Value>, pointer: &str, field: &str) {
        match object.get(field) {
            None => self.report(pointer, format!("missing required field `{field}`")),
            Some(Value::String(_)) => {}
            Some(_) => self.report(&format!("{pointer}/{field}"), "must be a string"),
        }
    }

    fn path_item(&mut self, path: &str, item: &Value) {
        let pointer = format!("/paths/{}", escape_token(path));
        if !path.starts_with('/') {
            self.report(&pointer, "path must begin with `/`");
        }
        let Some(item) = item.as_object() else {
            self.report(&pointer, "path item must be an object");
            return;
        };

        let shared = item.get("parameters");
        if let Some(params) = shared {
            self.parameters(&format!("{pointer}/parameters"), params);
        }

        for (method, operation) in item {
            if HTTP_METHODS.contains(&method.as_str()) {
                self.operation(path, &format!("{pointer}/{method}"), operation, shared);
            }
        }
    }

    fn operation(&mut self, path: &str, pointer: &str, operation: &Value, shared: Option<&Value>) {
        let Some(op) = operation.as_object() else {
            self.report(pointer, "operation must be an object");
            return;
        };

        match op.get("responses") {
            None => self.report(pointer, "missing required field `responses`"),
            Some(Value::Object(_)) => {}
            Some(_) => self.report(&format!("{pointer}/responses"), "must be an object"),
        }

        if let Some(params) = op.get("parameters") {
            self.parameters(&format!("{pointer}/parameters"), params);
        }

        for name in template_names(path) {
            let declared = [op.get("parameters"), shared]
                .into_iter()
                .flatten()
                .filter_map(Value::as_array)
                .flatten()
                .any(|p| {
                    p.get("in").and_then(Value::as_str) == Some("path")
                        && p.get("name").and_then(Value::as_str) == Some(name)
                });
            if !declared {
                self.report(pointer, format!("path parameter `{name}` is not declared"));
            }
        }

        if let Some(body) = op.get("requestBody") {
            let body_pointer = format!("{pointer}/requestBody");
            match body.get("content") {
                Some(Value::Object(_)) => {}
                Some(_) => self.report(&format!("{body_pointer}/content"), "must be an object"),
                None => self.report(&body_pointer, "missing required field `content`"),
            }
        }

        if let Some(security) = op.get("security") {
            self.security(&format!("{pointer}/security"), security);
        }
    }

    fn parameters(&mut self, pointer: &str, params: &Value) {
        let Some(params) = params.as_array() else {
            self.report(pointer, "must be an array");
            return;
        };
        for (i, param) in params.iter().enumerate() {
            let pointer = format!("{pointer}/{i}");
            let Some(param) = param.as_object() else {
                self.report(&pointer, "parameter must be an object");
                continue;
            };
            self.required_string(param, &pointer, "name");
            match param.get("in").and_then(Value::as_str) {
                None => self.report(&pointer, "missing required field `in`"),
                Some(location) if !PARAMETER_LOCATIONS.contains(&location) => {
                    self.report(&format!("{pointer}/in"), format!("invalid location `{location}`"))
                }
                Some("path") if param.get("required") != Some(&Value::Bool(true)) => {
                    self.report(&pointer, "path parameters must be required")
                }
                Some(_) => {}
            }
            if !param.contains_key("schema") && !param.contains_key("content") {
                self.report(&pointer, "parameter must declare `schema` or `content`");
            }
        }
    }

    fn security(&mut self, pointer: &str, security: &Value) {
        let Some(requirements) = security.as_array() else {
            self.report(pointer, "must be an array");
            return;
        };
        for (i, requirement) in requirements.iter().enumerate() {
            let valid = requirement
                .as_object()
                .is_some_and(|scopes| scopes.values().all(Value::is_array));
            if !valid {
                self.report(
                    &format!("{pointer}/{i}"),
                    "security requirement must map scheme names to scope arrays",
                );
            }
        }
    }
}

/// `{name}` placeholders of a path template, in order.
fn template_names(path: &str) -> Vec<&str> {
    path.split('{')
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
        .collect()
}

/// Escape a key for use as a JSON pointer token.
fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
