//! # Coerce Module
//!
//! Best-effort scalar conversion used by the guarded read when the accessor
//! asks for a narrower type than the field holds.
//!
//! | from           | string          | int        | float  | bool                     |
//! |----------------|-----------------|------------|--------|--------------------------|
//! | int            | decimal text    |            | widen  | nonzero                  |
//! | float          | decimal text    | truncate*  |        | `!= 0.0`                 |
//! | bool           | `"1"` / `"0"`   | `1` / `0`  |        |                          |
//! | numeric string |                 | parse      | parse  |                          |
//! | string         |                 |            |        | truthy / falsy literals  |
//!
//! `*` only when the truncated value fits in an `i64`.
//!
//! Every other pair is "no conversion" and yields `None`. Conversions never
//! fail loudly: the caller keeps the original value when nothing applies.

use crate::value::{FieldValue, ValueType};

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY: [&str; 3] = ["0", "false", "no"];

/// Convert `value` to the first of `targets` that accepts it.
///
/// Values whose runtime type already appears in `targets` are returned as-is
/// regardless of the order of `targets`. Returns the original value when no
/// target accepts it.
#[must_use]
pub fn coerce_to_any(value: FieldValue, targets: &[ValueType]) -> FieldValue {
    let Some(current) = value.value_type() else {
        return value;
    };
    if targets.is_empty() || targets.contains(&current) {
        return value;
    }
    targets
        .iter()
        .find_map(|target| coerce(&value, *target))
        .unwrap_or(value)
}

/// Convert a single value to `target`, or `None` if the pair is not
/// convertible.
#[must_use]
pub fn coerce(value: &FieldValue, target: ValueType) -> Option<FieldValue> {
    if value.value_type() == Some(target) {
        return Some(value.clone());
    }

    match (value, target) {
        (FieldValue::Int(i), ValueType::String) => Some(FieldValue::String(i.to_string())),
        (FieldValue::Float(f), ValueType::String) => Some(FieldValue::String(float_to_string(*f))),
        (FieldValue::Bool(b), ValueType::String) => {
            Some(FieldValue::String(if *b { "1" } else { "0" }.to_string()))
        }

        (FieldValue::String(s), ValueType::Int) => parse_int(s).map(FieldValue::Int),
        (FieldValue::Float(f), ValueType::Int) => float_to_int(*f).map(FieldValue::Int),
        (FieldValue::Bool(b), ValueType::Int) => Some(FieldValue::Int(i64::from(*b))),

        (FieldValue::String(s), ValueType::Float) => parse_float(s).map(FieldValue::Float),
        (FieldValue::Int(i), ValueType::Float) => Some(FieldValue::Float(*i as f64)),

        (FieldValue::String(s), ValueType::Bool) => parse_bool(s).map(FieldValue::Bool),
        (FieldValue::Int(i), ValueType::Bool) => Some(FieldValue::Bool(*i != 0)),
        (FieldValue::Float(f), ValueType::Bool) => Some(FieldValue::Bool(*f != 0.0)),

        _ => None,
    }
}

/// A string is numeric when it is a finite decimal number, optionally signed,
/// optionally with a fraction and exponent, surrounded by optional whitespace.
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    // `f64::from_str` also accepts "inf" and "NaN"; those are not numeric here.
    let digits_only = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    digits_only && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

fn parse_int(s: &str) -> Option<i64> {
    if !is_numeric(s) {
        return None;
    }
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_int))
}

/// Truncate toward zero; `None` when the result does not fit in an `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_int(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn parse_float(s: &str) -> Option<f64> {
    if !is_numeric(s) {
        return None;
    }
    s.trim().parse::<f64>().ok()
}

/// Recognised literals only. Anything else is "no conversion" rather than a
/// silent `false`.
fn parse_bool(s: &str) -> Option<bool> {
    let normalized = s.trim().to_lowercase();
    if TRUTHY.contains(&normalized.as_str()) {
        Some(true)
    } else if FALSY.contains(&normalized.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Locale-free shortest representation; integral floats drop the fraction
/// (`1.0` becomes `"1"`).
fn float_to_string(f: f64) -> String {
    format!("{f}")
}
