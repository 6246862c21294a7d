use super::api::ApiResponse;
use super::render::ResultRestRenderer;
use super::result::UseCaseResult;
use tracing::debug;

/// Shared-cache and browser lifetimes for a cacheable response, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub s_maxage: u32,
    pub max_age: u32,
}

impl CacheTtl {
    #[must_use]
    pub const fn new(s_maxage: u32, max_age: u32) -> Self {
        Self { s_maxage, max_age }
    }

    /// Cache in shared caches only.
    #[must_use]
    pub const fn shared(s_maxage: u32) -> Self {
        Self::new(s_maxage, 0)
    }

    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, 0)
    }

    /// `Cache-Control` value, or `None` when both lifetimes are zero.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        if self.s_maxage == 0 && self.max_age == 0 {
            return None;
        }
        Some(format!(
            "public, s-maxage={}, max-age={}",
            self.s_maxage, self.max_age
        ))
    }
}

impl Default for CacheTtl {
    /// One hour in shared caches.
    fn default() -> Self {
        Self::shared(3600)
    }
}

impl From<u32> for CacheTtl {
    fn from(s_maxage: u32) -> Self {
        Self::shared(s_maxage)
    }
}

impl From<(u32, u32)> for CacheTtl {
    fn from((s_maxage, max_age): (u32, u32)) -> Self {
        Self::new(s_maxage, max_age)
    }
}

/// Turns use-case results into JSON responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestResponder;

impl RestResponder {
    /// Rendered envelope with the status of the result's type. `headers`
    /// are applied in order, later entries replacing earlier ones.
    #[must_use]
    pub fn response(&self, result: &UseCaseResult, headers: &[(&str, &str)]) -> ApiResponse {
        let status = result.result_type().status().as_u16();
        let mut response = ApiResponse::json(status, ResultRestRenderer::render(result));
        for (name, value) in headers {
            response.set_header(name, (*value).to_string());
        }
        response
    }

    /// Like [`response`](Self::response), with a `Cache-Control` header
    /// when either lifetime is positive. Caller headers take precedence.
    #[must_use]
    pub fn response_with_cache(
        &self,
        result: &UseCaseResult,
        ttl: impl Into<CacheTtl>,
        headers: &[(&str, &str)],
    ) -> ApiResponse {
        let ttl = ttl.into();
        let status = result.result_type().status().as_u16();
        let mut response = ApiResponse::json(status, ResultRestRenderer::render(result));
        if let Some(cache_control) = ttl.header_value() {
            debug!(s_maxage = ttl.s_maxage, max_age = ttl.max_age, "Caching response");
            response.set_header("Cache-Control", cache_control);
        }
        for (name, value) in headers {
            response.set_header(name, (*value).to_string());
        }
        response
    }
}
