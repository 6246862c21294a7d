//! # usecase-http
//!
//! **usecase-http** is the request/response edge of use-case driven HTTP
//! services: request DTOs that populate, authorize and validate themselves
//! from the current HTTP request, a typed read path that reconciles each
//! field's declared type with what its reader asks for, and renderers that
//! turn use-case results into JSON, CSV or blob responses.
//!
//! ## Architecture
//!
//! - **[`request`]** - Validated request DTOs, population and guarded field reads
//! - **[`signature`]** - Type signatures of declared fields and readers
//! - **[`coerce`]** - Value coercion between primitive types
//! - **[`value`]** - Field values, including the undefined sentinel and uploads
//! - **[`undefined`]** - The "not sent" sentinel for PATCH semantics
//! - **[`validation`]** - Validator contract, constraints, PATCH-aware validation
//! - **[`security`]** - Identity accessor consumed by request types
//! - **[`pagination`]** - `page`/`perPage` handling and paginated collections
//! - **[`dto`]** - Plain DTO projection and partial updates
//! - **[`response`]** - Result rendering, CSV/blob downloads, error responses
//! - **[`content_type`]** - Accept/Content-Type classification
//! - **[`config`]** - YAML/environment configuration
//! - **[`logging`]** - Subscriber setup for the crate's `tracing` events
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host framework
//!     participant Stack as RequestStack
//!     participant Req as ValidatedRequest::build
//!     participant Sec as Security
//!     participant Val as Validator
//!     participant UC as Use case
//!     participant Resp as RestResponder
//!
//!     Host->>Stack: push(RequestContext)
//!     Host->>Req: build(&deps)
//!     Req->>Stack: current()
//!     Req->>Req: seed undefined, merge attributes < body < query, files
//!     Req->>Sec: user() (identity injection)
//!     Req->>Sec: security_check()
//!     Req->>Val: validate(fields, rules)
//!     Req-->>Host: request DTO or RequestError
//!     Host->>UC: typed getters
//!     UC-->>Host: UseCaseResult
//!     Host->>Resp: response(&result)
//!     Resp-->>Host: ApiResponse
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use http::Method;
//! use serde_json::json;
//! use usecase_http::request::{
//!     FieldSpec, RequestContext, RequestDependencies, RequestStack, RequestState,
//!     ValidatedRequest,
//! };
//! use usecase_http::response::{RestResponder, UseCaseResult};
//! use usecase_http::security::{Principal, RoleSecurity};
//! use usecase_http::undefined::Patch;
//! use usecase_http::validation::ConstraintValidator;
//!
//! struct RenameProject(RequestState);
//!
//! impl ValidatedRequest for RenameProject {
//!     const FIELDS: &'static [FieldSpec] = &[
//!         FieldSpec::of::<Patch<String>>("name"),
//!         FieldSpec::of::<Option<i64>>("userId").default_null(),
//!     ];
//!
//!     fn from_state(state: RequestState) -> Self {
//!         Self(state)
//!     }
//!
//!     fn state(&self) -> &RequestState {
//!         &self.0
//!     }
//!
//!     fn state_mut(&mut self) -> &mut RequestState {
//!         &mut self.0
//!     }
//! }
//!
//! let stack = RequestStack::with_request(
//!     RequestContext::new(Method::PATCH, "/projects/1").with_json_body(json!({"name": "Apollo"})),
//! );
//! let deps = RequestDependencies::new(
//!     Arc::new(ConstraintValidator),
//!     stack,
//!     Arc::new(RoleSecurity::new(Principal::new("ada").with_id(7))),
//! );
//!
//! let request = RenameProject::build(&deps).unwrap();
//! let name: Patch<String> = request.state().get("name").unwrap();
//! let owner: i64 = request.state().get("userId").unwrap();
//! assert_eq!(name, Patch::Value("Apollo".to_string()));
//! assert_eq!(owner, 7);
//!
//! let response = RestResponder.response(&UseCaseResult::success().with(json!({"renamed": true})), &[]);
//! assert_eq!(response.status, 200);
//! ```

// Lets the derive macros' `::usecase_http::...` paths resolve inside this crate.
extern crate self as usecase_http;

pub mod coerce;
pub mod config;
pub mod content_type;
pub mod dto;
pub mod logging;
pub mod pagination;
pub mod request;
pub mod response;
pub mod security;
pub mod signature;
pub mod undefined;
pub mod validation;
pub mod value;

pub use config::Config;
pub use request::{RequestDependencies, RequestError, ValidatedRequest};
pub use response::{ApiResponse, ResultType, UseCaseResult};
pub use undefined::{Patch, Undefined};
pub use value::FieldValue;
