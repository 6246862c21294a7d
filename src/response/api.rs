use super::ResponseError;
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

/// Most responses carry one or two headers (content type, cache control).
pub const MAX_INLINE_HEADERS: usize = 4;

/// Response headers, stack allocated up to [`MAX_INLINE_HEADERS`] entries.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Raw(Vec<u8>),
}

/// A framework-neutral HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderVec,
    pub body: ResponseBody,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// JSON response with `content-type: application/json`.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self::new(status, headers, ResponseBody::Json(body))
    }

    /// Raw body with the given content type.
    #[must_use]
    pub fn raw(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), content_type.to_string()));
        Self::new(status, headers, ResponseBody::Raw(body.into()))
    }

    /// JSON error envelope with `message`, `code` and a null `errorCode`.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(
            status,
            super::ResultRestRenderer::render_mandatory(
                Some(message),
                status,
                None,
                serde_json::Map::new(),
            ),
        )
    }

    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header (names compare case-insensitively).
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// Body bytes as they go on the wire.
    pub fn body_bytes(&self) -> Result<Vec<u8>, ResponseError> {
        match &self.body {
            ResponseBody::Json(value) => Ok(serde_json::to_vec(value)?),
            ResponseBody::Raw(bytes) => Ok(bytes.clone()),
        }
    }

    pub fn into_http(self) -> Result<http::Response<Vec<u8>>, ResponseError> {
        let body = match self.body {
            ResponseBody::Json(value) => serde_json::to_vec(&value)?,
            ResponseBody::Raw(bytes) => bytes,
        };
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_ref(), value.as_str());
        }
        Ok(builder.body(body)?)
    }
}

impl TryFrom<ApiResponse> for http::Response<Vec<u8>> {
    type Error = ResponseError;

    fn try_from(response: ApiResponse) -> Result<Self, Self::Error> {
        response.into_http()
    }
}
