//! # Undefined Module
//!
//! PATCH requests need three states per field: a concrete value, an explicit
//! `null`, and "the client did not send this field at all". The last one is
//! the sentinel represented here.
//!
//! - [`Undefined`] is the bare marker, used where a DTO field can only be
//!   "absent" or carry a value of its own type.
//! - [`Patch<T>`] is the tagged form: `Patch::Undefined` or `Patch::Value(T)`.
//!   Nullable PATCH fields are written `Patch<Option<T>>`, which gives the
//!   full `Value | Null | Undefined` triple without any identity checks.
//!
//! ```rust
//! use usecase_http::undefined::Patch;
//!
//! let email: Patch<Option<String>> = Patch::Value(None);
//! assert!(!email.is_undefined());
//! assert_eq!(email.into_option(), Some(None));
//! ```

use serde::{Serialize, Serializer};

/// Marker for "field absent from the payload".
///
/// Only ever compared by type: there is exactly one value of this type and it
/// carries no data, so two `Undefined`s are trivially the same sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Undefined;

/// A value that may be absent from a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Field was not supplied.
    Undefined,
    /// Field was supplied (possibly with `None` when `T = Option<_>`).
    Value(T),
}

impl<T> Patch<T> {
    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Patch::Undefined)
    }

    #[inline]
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Undefined => None,
        }
    }

    /// `None` for undefined, `Some(value)` otherwise.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Undefined => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Value(v) => Patch::Value(f(v)),
            Patch::Undefined => Patch::Undefined,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Value(v) => Patch::Value(v),
            Patch::Undefined => Patch::Undefined,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Undefined
    }
}

impl<T> From<Undefined> for Patch<T> {
    fn from(_: Undefined) -> Self {
        Patch::Undefined
    }
}

impl<T> From<Option<Patch<T>>> for Patch<T> {
    fn from(value: Option<Patch<T>>) -> Self {
        value.unwrap_or(Patch::Undefined)
    }
}

// Undefined values never reach a wire format through this path; projections
// drop them before serialization. Serializing one directly yields `null`.
impl Serialize for Undefined {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Value(v) => v.serialize(serializer),
            Patch::Undefined => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undefined() {
        let p: Patch<i64> = Patch::default();
        assert!(p.is_undefined());
        assert_eq!(p.into_option(), None);
    }

    #[test]
    fn test_null_is_not_undefined() {
        let p: Patch<Option<String>> = Patch::Value(None);
        assert!(p.is_defined());
        assert_eq!(p.as_value(), Some(&None));
    }

    #[test]
    fn test_map_keeps_sentinel() {
        let p: Patch<i64> = Undefined.into();
        assert_eq!(p.map(|v| v * 2), Patch::Undefined);
        assert_eq!(Patch::Value(21).map(|v| v * 2), Patch::Value(42));
    }
}
