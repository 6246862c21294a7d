use super::ResponseError;
use crate::pagination::{PaginatedCollection, Pagination};
use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome category of a use case, mapped onto an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    #[default]
    Success,
    SuccessCreated,
    SuccessNoContent,
    Accepted,
    Locked,
    NotFound,
    Duplicated,
    Gone,
    Expired,
    Failure,
}

impl ResultType {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ResultType::Success => StatusCode::OK,
            ResultType::SuccessCreated => StatusCode::CREATED,
            ResultType::SuccessNoContent => StatusCode::NO_CONTENT,
            ResultType::Accepted => StatusCode::ACCEPTED,
            ResultType::Locked => StatusCode::LOCKED,
            ResultType::NotFound => StatusCode::NOT_FOUND,
            ResultType::Duplicated => StatusCode::CONFLICT,
            ResultType::Gone | ResultType::Expired => StatusCode::GONE,
            ResultType::Failure => StatusCode::BAD_REQUEST,
        }
    }
}

/// What a result carries, already in JSON form.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Item(Value),
    List(Vec<Value>),
    Paginated {
        items: Vec<Value>,
        count: u64,
        pagination: Option<Pagination>,
    },
}

/// Generic outcome of a use case: a type, an optional payload, a message,
/// an error code and free-form metadata.
///
/// ```rust
/// use usecase_http::response::{ResultType, UseCaseResult};
///
/// let result = UseCaseResult::create(ResultType::NotFound)
///     .with_message("No such user")
///     .with_error_code(404);
/// assert_eq!(result.error_code(), Some("404"));
/// assert!(!result.has_content());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UseCaseResult {
    result_type: ResultType,
    payload: Option<Payload>,
    item_type: Option<&'static str>,
    message: Option<String>,
    error_code: Option<String>,
    metadata: Map<String, Value>,
}

impl UseCaseResult {
    #[must_use]
    pub fn create(result_type: ResultType) -> Self {
        Self {
            result_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn success() -> Self {
        Self::create(ResultType::Success)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set a raw JSON payload. Arrays become lists, `null` clears the payload.
    #[must_use]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.item_type = None;
        self.payload = match value.into() {
            Value::Null => None,
            Value::Array(items) => Some(Payload::List(items)),
            other => Some(Payload::Item(other)),
        };
        self
    }

    /// Set a single serializable item. Struct-like items record their type
    /// name for the rendered metadata.
    pub fn with_item<T: Serialize>(mut self, item: &T) -> Result<Self, ResponseError> {
        let value = serde_json::to_value(item)?;
        self.item_type = value.is_object().then(std::any::type_name::<T>);
        self.payload = Some(Payload::Item(value));
        Ok(self)
    }

    pub fn with_list<T: Serialize>(mut self, items: &[T]) -> Result<Self, ResponseError> {
        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.item_type = values
            .first()
            .filter(|first| first.is_object())
            .map(|_| std::any::type_name::<T>());
        self.payload = Some(Payload::List(values));
        Ok(self)
    }

    pub fn with_collection<T: Serialize>(
        mut self,
        collection: &PaginatedCollection<T>,
    ) -> Result<Self, ResponseError> {
        let items = collection
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.item_type = None;
        self.payload = Some(Payload::Paginated {
            items,
            count: collection.count(),
            pagination: collection.pagination().copied(),
        });
        Ok(self)
    }

    /// Add or overwrite one metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Integers are stored in their decimal form.
    #[must_use]
    pub fn with_error_code(mut self, code: impl ToString) -> Self {
        self.error_code = Some(code.to_string());
        self
    }

    #[inline]
    #[must_use]
    pub fn result_type(&self) -> ResultType {
        self.result_type
    }

    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn item_type(&self) -> Option<&'static str> {
        self.item_type
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// False when no payload was set or it was set to `null`. Falsy values
    /// such as `0`, `false` or `""` still count as content.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.payload.is_some()
    }

    /// The payload's elements; a single item yields itself once.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        match &self.payload {
            None => <&[Value]>::default().iter(),
            Some(Payload::Item(item)) => std::slice::from_ref(item).iter(),
            Some(Payload::List(items)) | Some(Payload::Paginated { items, .. }) => items.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a UseCaseResult {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
