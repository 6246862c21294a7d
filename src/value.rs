//! # Value Module
//!
//! Runtime representation of a request field. Every declared field of a
//! validated request holds one [`FieldValue`] once it is set; the guarded read
//! path inspects its [`ValueType`] to decide whether coercion is needed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Concrete (non-null, non-sentinel) type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Array,
    Object,
    Files,
}

impl ValueType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Files => "files",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file uploaded with the request (multipart form entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Name sent by the client
    pub client_name: String,
    /// MIME type sent by the client
    pub mime_type: Option<String>,
    /// Size in bytes
    pub size: u64,
    /// Location of the temporary copy on disk
    pub path: PathBuf,
}

impl UploadedFile {
    pub fn new(client_name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            client_name: client_name.into(),
            mime_type: None,
            size,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// Value held by a request field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Field absent from the payload (PATCH sentinel)
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Files(Vec<UploadedFile>),
}

impl FieldValue {
    /// Runtime type of a concrete value; `None` for null and undefined.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            FieldValue::Undefined | FieldValue::Null => None,
            FieldValue::Bool(_) => Some(ValueType::Bool),
            FieldValue::Int(_) => Some(ValueType::Int),
            FieldValue::Float(_) => Some(ValueType::Float),
            FieldValue::String(_) => Some(ValueType::String),
            FieldValue::Array(_) => Some(ValueType::Array),
            FieldValue::Object(_) => Some(ValueType::Object),
            FieldValue::Files(_) => Some(ValueType::Files),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, FieldValue::Undefined)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert a decoded JSON value. Integers that fit `i64` stay integers;
    /// every other number becomes a float.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(a) => FieldValue::Array(a),
            Value::Object(o) => FieldValue::Object(o),
        }
    }

    /// JSON form of the value; `None` for the sentinel.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        Some(match self {
            FieldValue::Undefined => return None,
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Array(a) => Value::Array(a.clone()),
            FieldValue::Object(o) => Value::Object(o.clone()),
            FieldValue::Files(files) => serde_json::to_value(files).unwrap_or(Value::Null),
        })
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_number_kinds() {
        assert_eq!(FieldValue::from_json(json!(42)), FieldValue::Int(42));
        assert_eq!(FieldValue::from_json(json!(4.5)), FieldValue::Float(4.5));
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Null);
    }

    #[test]
    fn test_value_type_of_null_and_undefined() {
        assert_eq!(FieldValue::Null.value_type(), None);
        assert_eq!(FieldValue::Undefined.value_type(), None);
        assert_eq!(FieldValue::from("x").value_type(), Some(ValueType::String));
    }

    #[test]
    fn test_undefined_has_no_json_form() {
        assert_eq!(FieldValue::Undefined.to_json(), None);
        assert_eq!(FieldValue::Null.to_json(), Some(Value::Null));
    }
}
