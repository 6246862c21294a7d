use crate::signature::{FieldType, TypeSignature};
use crate::value::FieldValue;
use indexmap::IndexMap;

/// Initial value of a declared field, applied when the request object is
/// created and before population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// No initializer: the field is "not set" until something assigns it
    Unset,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
}

impl DefaultValue {
    fn initial(self) -> Option<FieldValue> {
        match self {
            DefaultValue::Unset => None,
            DefaultValue::Null => Some(FieldValue::Null),
            DefaultValue::Bool(b) => Some(FieldValue::Bool(b)),
            DefaultValue::Int(i) => Some(FieldValue::Int(i)),
            DefaultValue::Float(f) => Some(FieldValue::Float(f)),
            DefaultValue::Str(s) => Some(FieldValue::String(s.to_string())),
        }
    }
}

/// A public field declared by a request type.
///
/// ```rust
/// use usecase_http::request::FieldSpec;
/// use usecase_http::undefined::Patch;
///
/// const EMAIL: FieldSpec = FieldSpec::of::<Patch<Option<String>>>("email");
/// assert!(EMAIL.signature.undefinable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub signature: TypeSignature,
    pub default: DefaultValue,
}

impl FieldSpec {
    pub const fn new(name: &'static str, signature: TypeSignature) -> Self {
        FieldSpec {
            name,
            signature,
            default: DefaultValue::Unset,
        }
    }

    /// Field declared with the signature of the Rust type `T`.
    pub const fn of<T: FieldType>(name: &'static str) -> Self {
        FieldSpec::new(name, T::SIGNATURE)
    }

    pub const fn with_default(self, default: DefaultValue) -> Self {
        FieldSpec { default, ..self }
    }

    /// Shorthand for `with_default(DefaultValue::Null)`.
    pub const fn default_null(self) -> Self {
        self.with_default(DefaultValue::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    spec: FieldSpec,
    value: Option<FieldValue>,
}

/// Storage for the declared fields of one request instance.
///
/// A slot holding `None` is declared but not set, which is distinct from a
/// slot holding [`FieldValue::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSet {
    slots: IndexMap<&'static str, Slot>,
}

impl FieldSet {
    /// Declare `specs` and apply their initializers.
    #[must_use]
    pub fn new(specs: &[FieldSpec]) -> Self {
        let slots = specs
            .iter()
            .map(|spec| {
                (
                    spec.name,
                    Slot {
                        spec: *spec,
                        value: spec.default.initial(),
                    },
                )
            })
            .collect();
        Self { slots }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.slots.get(name).map(|slot| &slot.spec)
    }

    /// Current value; `None` when the field is undeclared or not set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.slots.get(name).and_then(|slot| slot.value.as_ref())
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Assign a declared field. Returns `false` (and does nothing) when the
    /// field is not declared.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        match self.slots.get_mut(name) {
            Some(slot) => {
                slot.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Return a declared field to the "not set" state.
    pub fn unset(&mut self, name: &str) {
        if let Some(slot) = self.slots.get_mut(name) {
            slot.value = None;
        }
    }

    /// Declared fields in declaration order with their current values.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldSpec, Option<&FieldValue>)> {
        self.slots
            .values()
            .map(|slot| (&slot.spec, slot.value.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
