use super::plain::{lcfirst, ucfirst};
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Getter names the mapper recognises: `get`/`is` followed by `_name`
/// (snake case) or `Name` (camel case).
static GETTER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(get|is)(_.+|[A-Z].*)$").expect("getter pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Unable to map property \"{field}\" to setter \"{setter}\".")]
    Unmappable { field: String, setter: String },
}

/// Source side of a partial update: its zero-argument accessors and their
/// current values.
pub trait GetterSource {
    /// `(accessor name, value)` pairs, e.g. `("get_name", ...)`.
    fn getters(&self) -> Vec<(&'static str, FieldValue)>;
}

/// Target side of a partial update. Both methods hand the value back when
/// the target has no such setter or public field.
pub trait MapTarget {
    fn call_setter(&mut self, setter: &str, value: FieldValue) -> Result<(), FieldValue> {
        let _ = setter;
        Err(value)
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldValue> {
        let _ = field;
        Err(value)
    }
}

/// Copies the defined values of a source's getters onto a target.
///
/// For every getter whose derived field is not listed in `skips` and whose
/// value is not the undefined sentinel, the target's `set<Field>` setter is
/// tried first, then a public field of the same name. A getter that reaches
/// neither is skipped, or rejected with [`MappingError::Unmappable`] in
/// strict mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialUpdate;

impl PartialUpdate {
    pub fn map<S, T>(
        &self,
        from: &S,
        into: &mut T,
        strict: bool,
        skips: &[&str],
    ) -> Result<(), MappingError>
    where
        S: GetterSource + ?Sized,
        T: MapTarget + ?Sized,
    {
        for (getter, value) in from.getters() {
            let Some((field, setter)) = field_and_setter(getter) else {
                continue;
            };
            if skips.contains(&field.as_str()) {
                continue;
            }
            if value.is_undefined() {
                debug!(field = %field, "Skipping undefined value");
                continue;
            }

            let value = match into.call_setter(&setter, value) {
                Ok(()) => continue,
                Err(value) => value,
            };
            if into.set_field(&field, value).is_ok() {
                continue;
            }

            if strict {
                return Err(MappingError::Unmappable { field, setter });
            }
            debug!(field = %field, setter = %setter, "No setter or public field on target, skipping");
        }
        Ok(())
    }
}

/// `get_first_name` gives `("first_name", "set_first_name")`, `getFirstName`
/// gives `("firstName", "setFirstName")`.
fn field_and_setter(getter: &str) -> Option<(String, String)> {
    let captures = GETTER.captures(getter)?;
    let rest = captures.get(2)?.as_str();
    Some(match rest.strip_prefix('_') {
        Some(snake) => (snake.to_string(), format!("set_{snake}")),
        None => {
            let field = lcfirst(rest);
            let setter = format!("set{}", ucfirst(&field));
            (field, setter)
        }
    })
}
