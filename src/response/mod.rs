//! # Response Module
//!
//! Turns use-case outcomes and request failures into HTTP responses.
//!
//! - [`UseCaseResult`] is the outcome a use case returns: a [`ResultType`],
//!   an optional payload, a message, an error code and metadata.
//! - [`ResultRestRenderer`] renders it into the REST envelope
//!   (`item`/`collection`, `message`, `code`, `errorCode`, `metadata`).
//! - [`RestResponder`] wraps the envelope in an [`ApiResponse`], optionally
//!   with a `Cache-Control` header.
//! - [`ResultResponseFactory`] produces CSV and blob downloads.
//! - [`error_response`] maps a [`RequestError`](crate::request::RequestError)
//!   onto its JSON error body.
//!
//! [`ApiResponse`] converts into `http::Response<Vec<u8>>` for whichever
//! server sits in front.

mod api;
mod error;
mod error_response;
mod factory;
mod render;
mod responder;
mod result;

pub use api::{ApiResponse, HeaderVec, ResponseBody, MAX_INLINE_HEADERS};
pub use error::ResponseError;
pub use error_response::{access_denied, error_response, validation_failed, VALIDATION_FAILED};
pub use factory::{encode_csv, ResultResponseFactory};
pub use render::{ResultRestRenderer, COLLECTION, ITEM};
pub use responder::{CacheTtl, RestResponder};
pub use result::{Payload, ResultType, UseCaseResult};
