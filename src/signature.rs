//! # Signature Module
//!
//! A [`TypeSignature`] describes what a declared type admits: `null`, the
//! undefined sentinel, and an ordered list of concrete [`ValueType`]s. Two
//! signatures take part in every guarded read: the one declared for the field
//! and the one of the accessor asking for it.
//!
//! Accessor signatures are derived from Rust types through [`FieldType`], so
//! a typed getter states its constraint simply by naming its return type:
//!
//! | Rust type                  | nullable | undefinable | types            |
//! |----------------------------|----------|-------------|------------------|
//! | `String`                   | no       | no          | `string`         |
//! | `Option<i64>`              | yes      | no          | `int`            |
//! | `Patch<bool>`              | no       | yes         | `bool`           |
//! | `Patch<Option<String>>`    | yes      | yes         | `string`         |
//! | `FieldValue`               | yes      | yes         | *(any)*          |

use crate::undefined::Patch;
use crate::value::{FieldValue, UploadedFile, ValueType};
use serde_json::{Map, Value};
use std::fmt;

/// Constraint set of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSignature {
    /// `null` is admitted
    pub nullable: bool,
    /// The undefined sentinel is admitted
    pub undefinable: bool,
    /// Concrete types in declaration order (empty means "any")
    pub types: &'static [ValueType],
}

impl TypeSignature {
    /// The universal type: admits null and undefined, requests no coercion.
    pub const MIXED: TypeSignature = TypeSignature {
        nullable: true,
        undefinable: true,
        types: &[],
    };

    pub const fn of(types: &'static [ValueType]) -> Self {
        TypeSignature {
            nullable: false,
            undefinable: false,
            types,
        }
    }

    pub const fn nullable(self) -> Self {
        TypeSignature {
            nullable: true,
            ..self
        }
    }

    pub const fn undefinable(self) -> Self {
        TypeSignature {
            undefinable: true,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn accepts(&self, ty: ValueType) -> bool {
        self.types.contains(&ty)
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = self.types.iter().map(|t| t.as_str()).collect();
        if parts.is_empty() {
            parts.push("mixed");
        }
        if self.nullable {
            parts.push("null");
        }
        if self.undefinable {
            parts.push("undefined");
        }
        f.write_str(&parts.join("|"))
    }
}

/// Rust types a field can be read into.
pub trait FieldType: Sized {
    /// Declared return-type constraint of an accessor returning `Self`
    const SIGNATURE: TypeSignature;

    /// Take the value if it fits, hand it back otherwise.
    fn from_field(value: FieldValue) -> Result<Self, FieldValue>;
}

impl FieldType for FieldValue {
    const SIGNATURE: TypeSignature = TypeSignature::MIXED;

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        Ok(value)
    }
}

impl FieldType for String {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::String]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FieldType for i64 {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Int]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Int(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl FieldType for i32 {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Int]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Int(i) => i32::try_from(i).map_err(|_| FieldValue::Int(i)),
            other => Err(other),
        }
    }
}

impl FieldType for u64 {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Int]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Int(i) => u64::try_from(i).map_err(|_| FieldValue::Int(i)),
            other => Err(other),
        }
    }
}

impl FieldType for f64 {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Float]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Float(f) => Ok(f),
            other => Err(other),
        }
    }
}

impl FieldType for bool {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Bool]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FieldType for Vec<Value> {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Array]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Array(a) => Ok(a),
            other => Err(other),
        }
    }
}

impl FieldType for Map<String, Value> {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Object]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Object(o) => Ok(o),
            other => Err(other),
        }
    }
}

impl FieldType for Vec<UploadedFile> {
    const SIGNATURE: TypeSignature = TypeSignature::of(&[ValueType::Files]);

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Files(f) => Ok(f),
            other => Err(other),
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const SIGNATURE: TypeSignature = T::SIGNATURE.nullable();

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_field(other).map(Some),
        }
    }
}

impl<T: FieldType> FieldType for Patch<T> {
    const SIGNATURE: TypeSignature = T::SIGNATURE.undefinable();

    fn from_field(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Undefined => Ok(Patch::Undefined),
            other => T::from_field(other).map(Patch::Value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_wrappers_compose() {
        let sig = <Patch<Option<String>> as FieldType>::SIGNATURE;
        assert!(sig.nullable);
        assert!(sig.undefinable);
        assert_eq!(sig.types, &[ValueType::String]);
    }

    #[test]
    fn test_plain_type_rejects_null_and_undefined() {
        let sig = <i64 as FieldType>::SIGNATURE;
        assert!(!sig.nullable);
        assert!(!sig.undefinable);
    }

    #[test]
    fn test_display() {
        let sig = TypeSignature::of(&[ValueType::String, ValueType::Int]).nullable();
        assert_eq!(sig.to_string(), "string|int|null");
        assert_eq!(TypeSignature::MIXED.to_string(), "mixed|null|undefined");
    }

    #[test]
    fn test_option_from_null() {
        assert_eq!(Option::<String>::from_field(FieldValue::Null), Ok(None));
        assert_eq!(
            Option::<String>::from_field(FieldValue::Int(1)),
            Err(FieldValue::Int(1))
        );
    }
}
