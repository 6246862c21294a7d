use crate::value::UploadedFile;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Headers as stored for a request: lower-cased names, every value kept in
/// arrival order.
pub type HeaderBag = IndexMap<String, Vec<String>>;

/// Inbound request data the population step reads from.
///
/// Header names are lower-cased on insertion, so lookups by exact name expect
/// the lower-case form (`"accept"`, `"content-type"`).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// HTTP method
    pub method: http::Method,
    /// Request path without query string
    pub path: String,
    headers: HeaderBag,
    body: Map<String, Value>,
    query: Map<String, Value>,
    attributes: Map<String, Value>,
    files: IndexMap<String, Vec<UploadedFile>>,
}

impl RequestContext {
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderBag::new(),
            body: Map::new(),
            query: Map::new(),
            attributes: Map::new(),
            files: IndexMap::new(),
        }
    }

    /// Build a context from an `http::Request`.
    ///
    /// The body is decoded as JSON when possible; anything else contributes no
    /// body keys. Route attributes are supplied by the router afterwards with
    /// [`RequestContext::with_attribute`].
    pub fn from_http<B: AsRef<[u8]>>(req: &http::Request<B>) -> Self {
        let mut ctx = RequestContext::new(req.method().clone(), req.uri().path());

        for (name, value) in req.headers() {
            ctx.headers
                .entry(name.as_str().to_ascii_lowercase())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).to_string());
        }

        if let Some(query) = req.uri().query() {
            ctx.query = parse_query_string(query);
        }
        ctx.body = parse_body(req.body().as_ref());

        debug!(
            method = %ctx.method,
            path = %ctx.path,
            header_count = ctx.headers.len(),
            query_params = ctx.query.len(),
            body_fields = ctx.body.len(),
            "Request context built"
        );
        ctx
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Raw body bytes; decoded the same way as in [`RequestContext::from_http`].
    #[must_use]
    pub fn with_body(mut self, body: &[u8]) -> Self {
        self.body = parse_body(body);
        self
    }

    #[must_use]
    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    #[must_use]
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query = parse_query_string(query);
        self
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_files(mut self, group: impl Into<String>, files: Vec<UploadedFile>) -> Self {
        self.files.insert(group.into(), files);
        self
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderBag {
        &self.headers
    }

    /// First value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    #[must_use]
    pub fn query(&self) -> &Map<String, Value> {
        &self.query
    }

    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Files uploaded under `group`; empty when there are none.
    #[must_use]
    pub fn files(&self, group: &str) -> &[UploadedFile] {
        self.files.get(group).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Decode a request body as a JSON object.
///
/// Empty bodies, invalid JSON and JSON values that are not objects all yield
/// an empty map: a missing body is a normal state for many requests.
pub fn parse_body(body: &[u8]) -> Map<String, Value> {
    if body.is_empty() {
        return Map::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!(
                body_size_bytes = body.len(),
                json_kind = json_kind(&other),
                "Request body is not a JSON object, ignoring"
            );
            Map::new()
        }
        Err(err) => {
            debug!(
                body_size_bytes = body.len(),
                error = %err,
                "Request body is not valid JSON, ignoring"
            );
            Map::new()
        }
    }
}

/// Parse a query string into a JSON map.
///
/// Names and values are URL-decoded. A repeated plain name keeps its last
/// value; names ending in `[]` collect every value into an array under the
/// bare name (`tag[]=a&tag[]=b` gives `tag: ["a", "b"]`).
pub fn parse_query_string(query: &str) -> Map<String, Value> {
    let mut params = Map::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if let Some(bare) = name.strip_suffix("[]") {
            let entry = params
                .entry(bare.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            match entry {
                Value::Array(items) => items.push(Value::String(value.into_owned())),
                other => *other = Value::Array(vec![Value::String(value.into_owned())]),
            }
        } else {
            params.insert(name.into_owned(), Value::String(value.into_owned()));
        }
    }
    params
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Stack of requests being handled; the top is the current request.
///
/// Cloning yields another handle to the same stack.
#[derive(Debug, Clone, Default)]
pub struct RequestStack {
    inner: Arc<Mutex<Vec<Arc<RequestContext>>>>,
}

impl RequestStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack whose current request is `ctx`.
    #[must_use]
    pub fn with_request(ctx: RequestContext) -> Self {
        let stack = Self::new();
        stack.push(ctx);
        stack
    }

    pub fn push(&self, ctx: RequestContext) {
        self.inner.lock().push(Arc::new(ctx));
    }

    pub fn pop(&self) -> Option<Arc<RequestContext>> {
        self.inner.lock().pop()
    }

    #[must_use]
    pub fn current(&self) -> Option<Arc<RequestContext>> {
        self.inner.lock().last().cloned()
    }
}
