use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;
use serde_json::{Map, Value};

/// The parameters object generated methods take, keyed by parameter name.
pub type Params = Map<String, Value>;

/// One call to [`crate::Client::request`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the origin, including the `/v{version}` prefix.
    pub path: String,
    pub query: Params,
    /// Sent as JSON for PUT, POST, PATCH and DELETE; dropped otherwise.
    pub body: Params,
    /// Whether the operation requires a bearer token.
    pub security: bool,
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: Params::new(),
            security: false,
            options: RequestOptions::default(),
        }
    }
}

/// Per-call overrides passed through generated methods.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. Headers the client computes itself take precedence.
    pub headers: Vec<(String, String)>,
    /// Replaces the operation's method on the wire.
    pub method: Option<Method>,
    pub timeout: Option<Duration>,
    /// `Some(false)` stops at the first redirect response.
    pub follow_redirects: Option<bool>,
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = Some(follow);
        self
    }
}

/// Bytes escaped inside one path segment: everything that would end the
/// segment or start the query or fragment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Text used when a parameter value is substituted into a header.
pub fn path_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// [`path_value`], percent-encoded for substitution into a path template.
pub fn path_segment(value: &Value) -> String {
    utf8_percent_encode(&path_value(value), PATH_SEGMENT).to_string()
}
