use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, Message, wire_value};
use crate::error::{JsonRpcError, RequestError};
use crate::parser::Parser;
use crate::types::Id;

/// An ordered batch of messages.
///
/// Members that failed to parse stay in place as
/// [`Message::RequestFailure`], so the reply to a batch can be assembled
/// member by member in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Batch {
    pub entities: Vec<Message>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity, keeping insertion order. The batch takes ownership,
    /// so owned entities and already-wrapped messages go through the same call.
    pub fn add(&mut self, entity: impl Into<Message>) {
        self.entities.push(entity.into());
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.entities.iter()
    }

    /// Members recorded as failures, in input order
    pub fn failures(&self) -> impl Iterator<Item = &RequestError> {
        self.entities.iter().filter_map(|entity| match entity {
            Message::RequestFailure(err) => Some(err),
            _ => None,
        })
    }

    /// Error responses for every failed member, in input order
    pub fn error_responses(&self) -> Vec<Value> {
        self.entities
            .iter()
            .filter(|entity| entity.is_exception())
            .map(Message::to_json)
            .collect()
    }
}

impl JsonRpcEntity for Batch {
    fn kind(&self) -> EntityKind {
        EntityKind::Batch
    }

    fn from_json_with(value: &Value, config: &ParserConfig) -> Result<Self, JsonRpcError> {
        let items = value.as_array().ok_or_else(|| {
            RequestError::invalid_request(Id::Null).with_data("batch must be an array")
        })?;
        if items.is_empty() {
            return Err(RequestError::invalid_request(Id::Null)
                .with_data("batch must not be empty")
                .into());
        }

        let parser = Parser::with_config(*config);
        let entities = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                trace!(index, "parsing batch element");
                parser.parse_element(item)
            })
            .collect();

        Ok(Self { entities })
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl FromIterator<Message> for Batch {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Batch {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_codes;
    use crate::notification::Notification;
    use crate::request::Request;
    use crate::response::Response;
    use serde_json::json;

    #[test]
    fn test_batch_keeps_order() {
        let mut batch = Batch::new();
        batch.add(Request::new_no_params(Id::Number(1), "first"));
        batch.add(Notification::new_no_params("second"));
        batch.add(Message::from(Response::success(Id::Number(3), json!("third"))));

        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch.to_json(),
            json!([
                {"jsonrpc": "2.0", "method": "first", "id": 1},
                {"jsonrpc": "2.0", "method": "second"},
                {"jsonrpc": "2.0", "result": "third", "id": 3}
            ])
        );
    }

    #[test]
    fn test_batch_parse_records_failures_in_place() {
        let batch = Batch::from_json(&json!([
            {"jsonrpc": "2.0", "method": "sum", "params": [1, 2], "id": "1"},
            {"foo": "bar"},
            {"jsonrpc": "2.0", "method": "notify_hello", "params": [7]},
            1
        ]))
        .unwrap();

        assert_eq!(batch.len(), 4);
        assert!(batch.entities[0].is_request());
        assert!(batch.entities[1].is_exception());
        assert!(batch.entities[2].is_notification());
        assert!(batch.entities[3].is_exception());
        assert_eq!(batch.failures().count(), 2);
        assert!(
            batch
                .failures()
                .all(|err| err.code() == error_codes::INVALID_REQUEST)
        );
    }

    #[test]
    fn test_batch_error_responses() {
        let batch = Batch::from_json(&json!([
            {"jsonrpc": "2.0", "method": "ok", "id": 1},
            {"jsonrpc": "2.0", "id": 2, "params": []}
        ]))
        .unwrap();

        assert_eq!(
            batch.error_responses(),
            vec![json!({
                "jsonrpc": "2.0",
                "error": {
                    "code": -32600,
                    "message": "Invalid request",
                    "data": "not a request, notification or response"
                },
                "id": 2
            })]
        );
    }

    #[test]
    fn test_empty_batch_is_invalid() {
        let err = Batch::from_json(&json!([])).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
        assert!(err.id().is_null());
    }

    #[test]
    fn test_batch_requires_array() {
        let err = Batch::from_json(&json!({"jsonrpc": "2.0"})).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_nested_batch_policy() {
        let raw = json!([[{"jsonrpc": "2.0", "method": "inner"}]]);

        let batch = Batch::from_json(&raw).unwrap();
        assert!(batch.entities[0].is_exception());

        let nested = ParserConfig::default().allow_nested_batch(true);
        let batch = Batch::from_json_with(&raw, &nested).unwrap();
        let inner = batch.entities[0].as_batch().unwrap();
        assert!(inner.entities[0].is_notification());
    }

    #[test]
    fn test_batch_iteration() {
        let batch: Batch = vec![
            Message::from(Notification::new_no_params("a")),
            Message::from(Notification::new_no_params("b")),
        ]
        .into_iter()
        .collect();

        let methods: Vec<_> = batch.iter().filter_map(Message::method).collect();
        assert_eq!(methods, vec!["a", "b"]);
        assert_eq!((&batch).into_iter().count(), 2);
        assert_eq!(batch.into_iter().count(), 2);
    }
}
