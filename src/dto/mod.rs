//! # DTO Module
//!
//! Two small utilities for data transfer objects:
//!
//! - [`PlainDto`]: JSON projection of a DTO's public fields and accessors,
//!   leaving out anything holding the undefined sentinel. Derive it with
//!   `#[derive(PlainDto)]`.
//! - [`PartialUpdate`]: copies the defined values of one object's getters
//!   onto another object's setters or public fields, so a PATCH payload only
//!   touches what the client actually sent.
//!
//! ## Derive attributes
//!
//! | attribute                              | effect                                  |
//! |----------------------------------------|-----------------------------------------|
//! | `#[plain_dto(accessors(a, b))]` (type) | also project the accessors `a` and `b`  |
//! | `#[plain_dto(skip)]`                   | leave the field out                     |
//! | `#[plain_dto(backed)]`                 | wrap in [`Backed`]                      |
//! | `#[plain_dto(text)]`                   | wrap in [`Text`]                        |
//! | `#[plain_dto(nested)]`                 | wrap in [`Nested`] (`Vec`, `Option`, `Patch`) |
//! | `#[plain_dto(serialize)]`              | wrap in [`Serialized`]                  |
//!
//! Only `pub` fields are projected.

mod partial_update;
mod plain;

pub use partial_update::{GetterSource, MapTarget, MappingError, PartialUpdate};
pub use plain::{
    accessor_key, Backed, BackedEnum, Nested, Normalize, PlainDto, Projection, Serialized, Text,
};
pub use usecase_http_macros::PlainDto;
