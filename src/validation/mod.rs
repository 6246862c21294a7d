//! # Validation Module
//!
//! The pass/fail contract request types validate against, plus the handful
//! of constraints request DTOs commonly need.
//!
//! A request type lists its rules per field; the [`Validator`] held by the
//! request dependencies runs them after population and the security check.
//! Any violation aborts the build with
//! [`RequestError::ValidationFailed`](crate::request::RequestError::ValidationFailed).
//!
//! ## PATCH fields
//!
//! Wrap the rules of an undefinable field in [`PatchValidation`] so that an
//! omitted field is not reported unless the group requires it:
//!
//! ```rust
//! use usecase_http::validation::{Email, Length, NotBlank, PatchValidation, Rules};
//!
//! let rules = Rules::new().field(
//!     "email",
//!     PatchValidation::new()
//!         .with(NotBlank::new())
//!         .with(Email)
//!         .with(Length::between(5, 100)),
//! );
//! assert!(!rules.is_empty());
//! ```

mod constraint;
mod patch;
mod validator;
mod violation;

pub use constraint::{Constraint, Email, Length, NotBlank, NotNull, Numeric, Positive};
pub use patch::PatchValidation;
pub use validator::{ConstraintValidator, Rules, Validator};
pub use violation::{Violation, ViolationList};
