//! # Request Module
//!
//! Validated request DTOs: declared fields populated from the current HTTP
//! request, an authorization hook, validation, and a guarded read path that
//! reconciles each field's declared type with the type its reader asks for.
//!
//! ## Lifecycle
//!
//! ```text
//! RequestStack::current()
//!        │
//!        ▼
//!   populate ──► security_check ──► validate ──► typed getters
//!   (seed undefined, merge            │              (get_value: null gate,
//!    attributes < body < query,       ▼               undefined gate, coercion)
//!    files, strategy, identity)   RequestError
//! ```
//!
//! ## Reading fields
//!
//! A field declared `string|int|null` holding `25` reads as `"25"` through a
//! `String` getter and as `25` through an `i64` getter. A `null` field only
//! reads through getters returning `Option<_>`; the undefined sentinel only
//! through getters returning `Patch<_>`.
//!
//! ## Modules
//!
//! - `context`: inbound request data and the request stack
//! - `fields`: field declarations and per-instance storage
//! - `dependencies`: shared collaborators and the signature denormalizer
//! - `populate`: population pipeline and strategies
//! - `state`: guarded reads and request-scoped helpers
//! - `validated`: the [`ValidatedRequest`] trait

mod context;
mod dependencies;
mod error;
mod fields;
mod populate;
mod state;
mod validated;

pub use context::{parse_body, parse_query_string, HeaderBag, RequestContext, RequestStack};
pub use dependencies::{DenormalizeError, Denormalizer, RequestDependencies, SignatureDenormalizer};
pub use error::{ConfigError, MalformedRequest, RequestError};
pub use fields::{DefaultValue, FieldSet, FieldSpec};
pub use populate::PopulateStrategy;
pub use state::RequestState;
pub use validated::ValidatedRequest;
