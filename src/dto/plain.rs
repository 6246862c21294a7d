use crate::undefined::{Patch, Undefined};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Conversion of a DTO value into its JSON projection.
///
/// `None` means the value is the undefined sentinel and must be left out of
/// the output altogether.
pub trait Normalize {
    fn normalize(&self) -> Option<Value>;
}

macro_rules! normalize_via_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Normalize for $ty {
                fn normalize(&self) -> Option<Value> {
                    Some(Value::from(self.clone()))
                }
            }
        )*
    };
}

normalize_via_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, String);

impl Normalize for str {
    fn normalize(&self) -> Option<Value> {
        Some(Value::String(self.to_string()))
    }
}

impl Normalize for Value {
    fn normalize(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl Normalize for Undefined {
    fn normalize(&self) -> Option<Value> {
        None
    }
}

impl<T: Normalize> Normalize for Patch<T> {
    fn normalize(&self) -> Option<Value> {
        match self {
            Patch::Value(v) => v.normalize(),
            Patch::Undefined => None,
        }
    }
}

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&self) -> Option<Value> {
        match self {
            Some(v) => v.normalize(),
            None => Some(Value::Null),
        }
    }
}

impl<T: Normalize + ?Sized> Normalize for &T {
    fn normalize(&self) -> Option<Value> {
        (**self).normalize()
    }
}

impl<T: Normalize + ?Sized> Normalize for Box<T> {
    fn normalize(&self) -> Option<Value> {
        (**self).normalize()
    }
}

/// Element-wise; sentinel elements are dropped.
impl<T: Normalize> Normalize for [T] {
    fn normalize(&self) -> Option<Value> {
        Some(Value::Array(self.iter().filter_map(Normalize::normalize).collect()))
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&self) -> Option<Value> {
        self.as_slice().normalize()
    }
}

fn normalize_entries<'a, T: Normalize + 'a>(
    entries: impl Iterator<Item = (&'a String, &'a T)>,
) -> Option<Value> {
    let map: Map<String, Value> = entries
        .filter_map(|(k, v)| v.normalize().map(|v| (k.clone(), v)))
        .collect();
    Some(Value::Object(map))
}

impl<T: Normalize> Normalize for IndexMap<String, T> {
    fn normalize(&self) -> Option<Value> {
        normalize_entries(self.iter())
    }
}

impl<T: Normalize> Normalize for BTreeMap<String, T> {
    fn normalize(&self) -> Option<Value> {
        normalize_entries(self.iter())
    }
}

/// Enumerations reducible to a primitive backing value.
pub trait BackedEnum {
    fn backing_value(&self) -> Value;
}

/// Normalizes an enum (or a slice of them) to its backing value.
#[derive(Debug, Clone, Copy)]
pub struct Backed<'a, T: ?Sized>(pub &'a T);

impl<T: BackedEnum> Normalize for Backed<'_, T> {
    fn normalize(&self) -> Option<Value> {
        Some(self.0.backing_value())
    }
}

impl<T: BackedEnum> Normalize for Backed<'_, [T]> {
    fn normalize(&self) -> Option<Value> {
        Some(Value::Array(self.0.iter().map(BackedEnum::backing_value).collect()))
    }
}

/// Normalizes a `Display` value to its text.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a, T: ?Sized>(pub &'a T);

impl<T: Display + ?Sized> Normalize for Text<'_, T> {
    fn normalize(&self) -> Option<Value> {
        Some(Value::String(self.0.to_string()))
    }
}

/// Projects a nested plain DTO (or a slice of them) recursively.
#[derive(Debug, Clone, Copy)]
pub struct Nested<'a, T: ?Sized>(pub &'a T);

impl<T: PlainDto> Normalize for Nested<'_, T> {
    fn normalize(&self) -> Option<Value> {
        Some(Value::Object(self.0.json_serialize()))
    }
}

impl<T: PlainDto> Normalize for Nested<'_, [T]> {
    fn normalize(&self) -> Option<Value> {
        Some(Value::Array(
            self.0
                .iter()
                .map(|dto| Value::Object(dto.json_serialize()))
                .collect(),
        ))
    }
}

/// An absent nested DTO projects as `null`.
impl<T: PlainDto> Normalize for Nested<'_, Option<T>> {
    fn normalize(&self) -> Option<Value> {
        match self.0 {
            Some(dto) => Nested(dto).normalize(),
            None => Some(Value::Null),
        }
    }
}

/// An undefined nested DTO is left out of the parent projection.
impl<T: PlainDto> Normalize for Nested<'_, Patch<T>> {
    fn normalize(&self) -> Option<Value> {
        match self.0 {
            Patch::Value(dto) => Nested(dto).normalize(),
            Patch::Undefined => None,
        }
    }
}

/// Uses the value's own `serde::Serialize` contract. Values that fail to
/// serialize project as `null`.
#[derive(Debug, Clone, Copy)]
pub struct Serialized<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> Normalize for Serialized<'_, T> {
    fn normalize(&self) -> Option<Value> {
        Some(serde_json::to_value(self.0).unwrap_or(Value::Null))
    }
}

/// Collector handed to [`PlainDto::describe`].
///
/// Fields and accessors may be reported in any order; the projection always
/// lists fields first, then accessors, an accessor overwriting a field that
/// maps to the same key.
#[derive(Debug, Default)]
pub struct Projection {
    fields: Map<String, Value>,
    accessors: Vec<(String, Value)>,
}

impl Projection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a public field under its own name.
    pub fn field<T: Normalize + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        if let Some(value) = value.normalize() {
            self.fields.insert(name.to_string(), value);
        }
        self
    }

    /// Report the result of the zero-argument accessor `method`.
    ///
    /// The key is derived with [`accessor_key`]. Names starting with `__` and
    /// the `json_serialize` entry point are ignored.
    pub fn accessor<T: Normalize + ?Sized>(&mut self, method: &str, value: &T) -> &mut Self {
        if method.starts_with("__") || method == "json_serialize" || method == "jsonSerialize" {
            return self;
        }
        if let Some(value) = value.normalize() {
            self.accessors.push((accessor_key(method), value));
        }
        self
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.fields;
        for (key, value) in self.accessors {
            map.insert(key, value);
        }
        map
    }
}

/// Output key of an accessor: a `get`, `is` or `has` prefix is stripped when
/// followed by `_` (`get_title`) or an upper-case letter (`getTitle`), and
/// the first remaining character is lower-cased. Other names are used as-is.
///
/// A bare prefix is not stripped: `isbn` stays `isbn` and `hash` stays
/// `hash`, where a plain prefix match would yield `bn` and `h`.
#[must_use]
pub fn accessor_key(method: &str) -> String {
    for prefix in ["get", "is", "has"] {
        let Some(rest) = method.strip_prefix(prefix) else {
            continue;
        };
        if let Some(snake) = rest.strip_prefix('_').filter(|s| !s.is_empty()) {
            return snake.to_string();
        }
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            return lcfirst(rest);
        }
    }
    method.to_string()
}

pub(crate) fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A DTO that projects itself to JSON without a hand-written schema.
///
/// Usually derived:
///
/// ```rust
/// use usecase_http::dto::PlainDto;
/// use usecase_http::undefined::Patch;
///
/// #[derive(PlainDto)]
/// #[plain_dto(accessors(get_display_name))]
/// pub struct UserView {
///     pub id: i64,
///     pub nickname: Patch<String>,
/// }
///
/// impl UserView {
///     pub fn get_display_name(&self) -> String {
///         format!("user #{}", self.id)
///     }
/// }
///
/// let json = UserView { id: 7, nickname: Patch::Undefined }.json_serialize();
/// assert_eq!(json["id"], 7);
/// assert_eq!(json["display_name"], "user #7");
/// assert!(!json.contains_key("nickname"));
/// ```
pub trait PlainDto {
    fn describe(&self, projection: &mut Projection);

    fn json_serialize(&self) -> Map<String, Value> {
        let mut projection = Projection::new();
        self.describe(&mut projection);
        projection.into_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_accessor_key() {
        assert_eq!(accessor_key("getTitle"), "title");
        assert_eq!(accessor_key("get_title"), "title");
        assert_eq!(accessor_key("isActive"), "active");
        assert_eq!(accessor_key("has_children"), "children");
        assert_eq!(accessor_key("issue_count"), "issue_count");
        assert_eq!(accessor_key("isbn"), "isbn");
        assert_eq!(accessor_key("hash"), "hash");
        assert_eq!(accessor_key("get"), "get");
        assert_eq!(accessor_key("summary"), "summary");
    }

    #[test]
    fn test_accessor_overwrites_field_in_place() {
        let mut p = Projection::new();
        p.accessor("getTitle", "from method");
        p.field("title", "from property");
        p.field("other", &1);
        assert_eq!(
            Value::Object(p.into_map()),
            json!({"title": "from method", "other": 1})
        );
    }

    #[test]
    fn test_sentinel_source_is_skipped_not_the_key() {
        let mut p = Projection::new();
        p.field("name", &Patch::Value("kept".to_string()));
        p.accessor("getName", &Patch::<String>::Undefined);
        p.field("gone", &Undefined);
        assert_eq!(Value::Object(p.into_map()), json!({"name": "kept"}));
    }

    #[test]
    fn test_sequences_drop_sentinels() {
        let items = vec![Patch::Value(1), Patch::Undefined, Patch::Value(3)];
        assert_eq!(items.normalize(), Some(json!([1, 3])));
    }

    struct Leaf;

    impl PlainDto for Leaf {
        fn describe(&self, projection: &mut Projection) {
            projection.field("leaf", &true);
        }
    }

    #[test]
    fn test_nested_optional_and_patch() {
        assert_eq!(Nested(&Some(Leaf)).normalize(), Some(json!({"leaf": true})));
        assert_eq!(Nested(&None::<Leaf>).normalize(), Some(Value::Null));
        assert_eq!(Nested(&Patch::Value(Leaf)).normalize(), Some(json!({"leaf": true})));
        assert_eq!(Nested(&Patch::<Leaf>::Undefined).normalize(), None);
    }

    #[test]
    fn test_magic_and_entry_point_ignored() {
        let mut p = Projection::new();
        p.accessor("__construct", &1);
        p.accessor("json_serialize", &2);
        assert!(p.into_map().is_empty());
    }
}
