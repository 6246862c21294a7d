use super::result::{Payload, UseCaseResult};
use serde_json::{Map, Value};

pub const ITEM: &str = "item";
pub const COLLECTION: &str = "collection";

/// Renders a [`UseCaseResult`] into the REST envelope:
///
/// ```json
/// {"item": {...}, "message": null, "code": 200, "errorCode": null, "metadata": {}}
/// ```
///
/// Lists and paginated collections go under `collection` instead of
/// `item`. Paginated collections render their items as a plain array and
/// add `count` and `limit` to the metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRestRenderer;

impl ResultRestRenderer {
    /// `message`, `code` and `errorCode` merged over `extra`; the three
    /// mandatory keys win on collision.
    #[must_use]
    pub fn render_mandatory(
        message: Option<&str>,
        code: u16,
        error_code: Option<&str>,
        extra: Map<String, Value>,
    ) -> Value {
        let mut body = extra;
        body.insert("message".to_string(), message.map_or(Value::Null, Value::from));
        body.insert("code".to_string(), Value::from(code));
        body.insert(
            "errorCode".to_string(),
            error_code.map_or(Value::Null, Value::from),
        );
        Value::Object(body)
    }

    #[must_use]
    pub fn render(result: &UseCaseResult) -> Value {
        let mut metadata = result.metadata().clone();
        if let Some(item_type) = result.item_type() {
            metadata.insert("type".to_string(), Value::from(item_type));
        }

        let (key, payload) = match result.payload() {
            None => (ITEM, Value::Null),
            Some(Payload::Item(item)) => (ITEM, item.clone()),
            Some(Payload::List(items)) => (COLLECTION, Value::Array(items.clone())),
            Some(Payload::Paginated {
                items,
                count,
                pagination,
            }) => {
                metadata.insert("count".to_string(), Value::from(*count));
                metadata.insert(
                    "limit".to_string(),
                    pagination
                        .and_then(|p| p.limit())
                        .map_or(Value::Null, Value::from),
                );
                (COLLECTION, Value::Array(items.clone()))
            }
        };

        let mut body = Map::new();
        body.insert(key.to_string(), payload);
        body.insert(
            "message".to_string(),
            result.message().map_or(Value::Null, Value::from),
        );
        body.insert(
            "code".to_string(),
            Value::from(result.result_type().status().as_u16()),
        );
        body.insert(
            "errorCode".to_string(),
            result.error_code().map_or(Value::Null, Value::from),
        );
        body.insert("metadata".to_string(), Value::Object(metadata));
        Value::Object(body)
    }
}
