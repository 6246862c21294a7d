//! # Content Type Module
//!
//! Classifies what a client asked for or sent, based on its headers.

use crate::request::{RequestContext, RequestState};

const CSV_MIME_TYPES: [&str; 3] = ["text/csv", "application/csv", "text/comma-separated-values"];
const PDF_MIME_TYPES: [&str; 1] = ["application/pdf"];

/// Anything exposing request headers by lower-case name.
pub trait HeadersAware {
    /// First value of the header.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeadersAware for RequestState {
    fn header(&self, name: &str) -> Option<&str> {
        RequestState::header(self, name)
    }
}

impl HeadersAware for RequestContext {
    fn header(&self, name: &str) -> Option<&str> {
        RequestContext::header(self, name)
    }
}

/// Matches the `accept` header against known MIME families.
///
/// The trimmed, lower-cased `accept` value only has to contain one of the
/// family's MIME types, so `text/csv;q=0.9, */*` counts as a CSV request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeChecker;

impl ContentTypeChecker {
    #[must_use]
    pub fn is_csv_request(&self, request: &impl HeadersAware) -> bool {
        matches_mime_type(request, &CSV_MIME_TYPES)
    }

    #[must_use]
    pub fn is_pdf_request(&self, request: &impl HeadersAware) -> bool {
        matches_mime_type(request, &PDF_MIME_TYPES)
    }
}

fn matches_mime_type(request: &impl HeadersAware, mime_types: &[&str]) -> bool {
    let Some(accept) = request.header("accept") else {
        return false;
    };
    let accept = accept.trim().to_lowercase();
    mime_types.iter().any(|mime| accept.contains(mime))
}

/// Whether the request body is declared as exactly `application/json`.
#[must_use]
pub fn is_json(request: &impl HeadersAware) -> bool {
    request.header("content-type") == Some("application/json")
}
