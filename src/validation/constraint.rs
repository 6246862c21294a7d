use crate::coerce::is_numeric;
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A rule applied to one field value.
///
/// Constraints other than [`NotBlank`] and [`NotNull`] treat `null` as valid,
/// so optional fields only need a presence constraint when they are required.
/// The undefined sentinel passes every built-in constraint; PATCH fields wrap
/// their rules in [`PatchValidation`](super::PatchValidation) instead.
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Short constraint name (`"NotBlank"`, `"Length"`, ...)
    fn name(&self) -> &'static str;

    /// Messages for every way `value` breaks the constraint. Empty when valid.
    fn validate(&self, value: &FieldValue) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotBlank {
    pub message: String,
    pub allow_null: bool,
}

impl NotBlank {
    pub const NAME: &'static str = "NotBlank";

    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "This value should not be blank.".to_string(),
            allow_null: false,
        }
    }

    #[must_use]
    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for NotBlank {
    fn default() -> Self {
        Self::new()
    }
}

impl Constraint for NotBlank {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        let blank = match value {
            FieldValue::Null => !self.allow_null,
            FieldValue::Bool(false) => true,
            FieldValue::String(s) => s.is_empty(),
            FieldValue::Array(a) => a.is_empty(),
            FieldValue::Object(o) => o.is_empty(),
            FieldValue::Files(f) => f.is_empty(),
            _ => false,
        };
        if blank {
            vec![self.message.clone()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotNull;

impl Constraint for NotNull {
    fn name(&self) -> &'static str {
        "NotNull"
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        if value.is_null() {
            vec!["This value should not be null.".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Strictly greater than zero. Numeric strings are compared by their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positive;

impl Constraint for Positive {
    fn name(&self) -> &'static str {
        "Positive"
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        let positive = match value {
            FieldValue::Null | FieldValue::Undefined => return Vec::new(),
            FieldValue::Int(i) => *i > 0,
            FieldValue::Float(f) => *f > 0.0,
            FieldValue::String(s) if is_numeric(s) => {
                s.trim().parse::<f64>().is_ok_and(|f| f > 0.0)
            }
            _ => false,
        };
        if positive {
            Vec::new()
        } else {
            vec!["This value should be positive.".to_string()]
        }
    }
}

/// An integer, a float or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Numeric;

impl Constraint for Numeric {
    fn name(&self) -> &'static str {
        "Numeric"
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        let numeric = match value {
            FieldValue::Null | FieldValue::Undefined => return Vec::new(),
            FieldValue::Int(_) | FieldValue::Float(_) => true,
            FieldValue::String(s) => is_numeric(s),
            _ => false,
        };
        if numeric {
            Vec::new()
        } else {
            vec!["This value should be of type numeric.".to_string()]
        }
    }
}

/// Character count bounds for strings. Integers and floats are measured by
/// their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Length {
    #[must_use]
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    #[must_use]
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    #[must_use]
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

fn characters(limit: usize) -> &'static str {
    if limit == 1 {
        "character"
    } else {
        "characters"
    }
}

impl Constraint for Length {
    fn name(&self) -> &'static str {
        "Length"
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        let text = match value {
            FieldValue::String(s) => s.clone(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => format!("{f}"),
            _ => return Vec::new(),
        };
        let len = text.chars().count();

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min == max && len != min {
                return vec![format!(
                    "This value should have exactly {min} {}.",
                    characters(min)
                )];
            }
        }
        if let Some(min) = self.min.filter(|min| len < *min) {
            return vec![format!(
                "This value is too short. It should have {min} {} or more.",
                characters(min)
            )];
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return vec![format!(
                "This value is too long. It should have {max} {} or less.",
                characters(max)
            )];
        }
        Vec::new()
    }
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^.+@\S+\.\S+$").expect("email pattern is valid")
});

/// Loose e-mail shape check: something, `@`, a host with a dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email;

impl Constraint for Email {
    fn name(&self) -> &'static str {
        "Email"
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        match value {
            FieldValue::String(s) if !s.is_empty() && !EMAIL.is_match(s) => {
                vec!["This value is not a valid email address.".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> FieldValue {
        FieldValue::from(v)
    }

    #[test]
    fn test_not_blank() {
        let c = NotBlank::new();
        assert_eq!(c.validate(&FieldValue::Null).len(), 1);
        assert_eq!(c.validate(&s("")).len(), 1);
        assert_eq!(c.validate(&FieldValue::Bool(false)).len(), 1);
        assert!(c.validate(&s("0")).is_empty());
        assert!(c.validate(&FieldValue::Int(0)).is_empty());
        assert!(c.validate(&FieldValue::Undefined).is_empty());
        assert!(NotBlank::new().allow_null().validate(&FieldValue::Null).is_empty());
    }

    #[test]
    fn test_positive() {
        assert!(Positive.validate(&FieldValue::Int(1)).is_empty());
        assert!(Positive.validate(&s("2")).is_empty());
        assert!(Positive.validate(&FieldValue::Null).is_empty());
        assert_eq!(
            Positive.validate(&FieldValue::Int(0)),
            vec!["This value should be positive.".to_string()]
        );
        assert_eq!(Positive.validate(&s("-3")).len(), 1);
    }

    #[test]
    fn test_numeric() {
        assert!(Numeric.validate(&s("12.5")).is_empty());
        assert!(Numeric.validate(&FieldValue::Int(3)).is_empty());
        assert_eq!(Numeric.validate(&s("abc")).len(), 1);
        assert_eq!(Numeric.validate(&FieldValue::Bool(true)).len(), 1);
    }

    #[test]
    fn test_length() {
        assert!(Length::between(2, 4).validate(&s("abc")).is_empty());
        assert_eq!(
            Length::min(5).validate(&s("abc")),
            vec!["This value is too short. It should have 5 characters or more.".to_string()]
        );
        assert_eq!(
            Length::max(1).validate(&s("ab")),
            vec!["This value is too long. It should have 1 character or less.".to_string()]
        );
        assert_eq!(
            Length::between(3, 3).validate(&s("ab")),
            vec!["This value should have exactly 3 characters.".to_string()]
        );
        assert!(Length::min(1).validate(&FieldValue::Null).is_empty());
    }

    #[test]
    fn test_email() {
        assert!(Email.validate(&s("ada@example.com")).is_empty());
        assert_eq!(Email.validate(&s("not-an-email")).len(), 1);
        assert!(Email.validate(&FieldValue::Null).is_empty());
    }
}
