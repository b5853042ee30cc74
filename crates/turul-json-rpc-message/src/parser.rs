//! Message classification and parsing
//!
//! The parser decides which entity a JSON value represents by inspecting its
//! keys, then hands the value to that entity's validation:
//!
//! | shape                                  | entity         |
//! |----------------------------------------|----------------|
//! | array                                  | `Batch`        |
//! | `method`, no `id`                      | `Notification` |
//! | `method` and `id`                      | `Request`      |
//! | `id` and one of `result` / `error`     | `Response`     |
//!
//! Anything else is an invalid request.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::batch::Batch;
use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, Message};
use crate::error::{JsonRpcError, ParseError, RequestError};
use crate::notification::Notification;
use crate::request::{Request, inspect_call};
use crate::response::{Response, inspect_response};
use crate::types::Id;

/// Stateless message parser
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse JSON text into a message
    pub fn parse(&self, text: &str) -> Result<Message, JsonRpcError> {
        let value: Value = serde_json::from_str(text).map_err(|err| {
            debug!(error = %err, "rejecting malformed JSON text");
            ParseError::from(err)
        })?;
        self.parse_value(&value)
    }

    /// Classify a JSON value and build the matching message
    pub fn parse_value(&self, value: &Value) -> Result<Message, JsonRpcError> {
        let obj = match value {
            Value::Array(_) => {
                return Batch::from_json_with(value, &self.config).map(Message::Batch);
            }
            Value::Object(obj) => obj,
            _ => {
                debug!("rejecting message that is neither an object nor an array");
                return Err(RequestError::invalid_request(Id::Null)
                    .with_data("message must be an object or an array")
                    .into());
            }
        };

        let result = match classify_keys(obj) {
            Some(EntityKind::Notification) => {
                Notification::from_json_with(value, &self.config).map(Message::Notification)
            }
            Some(EntityKind::Request) => {
                Request::from_json_with(value, &self.config).map(Message::Request)
            }
            Some(EntityKind::Response) => {
                Response::from_json_with(value, &self.config).map(Message::Response)
            }
            _ => {
                let id = Id::recover(obj);
                debug!(%id, "object matches no message kind");
                return Err(RequestError::invalid_request(id)
                    .with_data("not a request, notification or response")
                    .into());
            }
        };

        if let Err(err) = &result {
            debug!(code = err.code(), id = %err.id(), error = %err, "message failed validation");
        }
        result
    }

    /// Parse one member of a batch. Failures are recorded, never raised.
    pub(crate) fn parse_element(&self, value: &Value) -> Message {
        let parsed = if value.is_array() && !self.config.allow_nested_batch {
            Err(RequestError::invalid_request(Id::Null)
                .with_data("nested batch is not allowed")
                .into())
        } else {
            self.parse_value(value)
        };

        parsed.unwrap_or_else(|err| {
            warn!(code = err.code(), id = %err.id(), "recording failed batch element");
            Message::from(err)
        })
    }

    /// The kind `parse_value` would produce, checked without building it.
    /// `None` when parsing would fail.
    pub fn classify(&self, value: &Value) -> Option<EntityKind> {
        let obj = match value {
            Value::Array(items) => return (!items.is_empty()).then_some(EntityKind::Batch),
            Value::Object(obj) => obj,
            _ => return None,
        };

        let kind = classify_keys(obj)?;
        let valid = match kind {
            EntityKind::Request => {
                obj.get("id").is_some_and(Id::accepts) && inspect_call(obj, &self.config).is_ok()
            }
            EntityKind::Notification => inspect_call(obj, &self.config).is_ok(),
            EntityKind::Response => inspect_response(obj, &self.config).is_ok(),
            _ => false,
        };
        valid.then_some(kind)
    }

    pub fn is_request(&self, value: &Value) -> bool {
        self.classify(value) == Some(EntityKind::Request)
    }

    pub fn is_notification(&self, value: &Value) -> bool {
        self.classify(value) == Some(EntityKind::Notification)
    }

    pub fn is_response(&self, value: &Value) -> bool {
        self.classify(value) == Some(EntityKind::Response)
    }

    pub fn is_batch(&self, value: &Value) -> bool {
        self.classify(value) == Some(EntityKind::Batch)
    }

    /// Classify JSON text; malformed text classifies as nothing
    pub fn classify_str(&self, text: &str) -> Option<EntityKind> {
        let value: Value = serde_json::from_str(text).ok()?;
        self.classify(&value)
    }

    pub fn is_request_str(&self, text: &str) -> bool {
        self.classify_str(text) == Some(EntityKind::Request)
    }

    pub fn is_notification_str(&self, text: &str) -> bool {
        self.classify_str(text) == Some(EntityKind::Notification)
    }

    pub fn is_response_str(&self, text: &str) -> bool {
        self.classify_str(text) == Some(EntityKind::Response)
    }

    pub fn is_batch_str(&self, text: &str) -> bool {
        self.classify_str(text) == Some(EntityKind::Batch)
    }
}

/// Key inspection only: which entity an object claims to be
fn classify_keys(obj: &Map<String, Value>) -> Option<EntityKind> {
    let has_id = obj.contains_key("id");
    if obj.contains_key("method") {
        Some(if has_id {
            EntityKind::Request
        } else {
            EntityKind::Notification
        })
    } else if has_id && (obj.contains_key("result") || obj.contains_key("error")) {
        Some(EntityKind::Response)
    } else {
        None
    }
}

/// Parse JSON text with the default configuration
pub fn parse(text: &str) -> Result<Message, JsonRpcError> {
    Parser::new().parse(text)
}

/// Parse a JSON value with the default configuration
pub fn parse_value(value: &Value) -> Result<Message, JsonRpcError> {
    Parser::new().parse_value(value)
}

pub fn is_request(value: &Value) -> bool {
    Parser::new().is_request(value)
}

pub fn is_notification(value: &Value) -> bool {
    Parser::new().is_notification(value)
}

pub fn is_response(value: &Value) -> bool {
    Parser::new().is_response(value)
}

pub fn is_batch(value: &Value) -> bool {
    Parser::new().is_batch(value)
}
