//! Message entities
//!
//! Every protocol value this crate models implements [`JsonRpcEntity`], and
//! [`Message`] is the closed sum over all of them, including the failures
//! that stand in for a message that could not be parsed.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::batch::Batch;
use crate::config::ParserConfig;
use crate::error::{ErrorObject, JsonRpcError, ParseError, RequestError};
use crate::notification::Notification;
use crate::parser::Parser;
use crate::request::Request;
use crate::response::Response;
use crate::types::Id;

/// Discriminant of a message entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Exception,
    Id,
    Error,
    Response,
    Request,
    Notification,
    Batch,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Exception => "exception",
            EntityKind::Id => "id",
            EntityKind::Error => "error",
            EntityKind::Response => "response",
            EntityKind::Request => "request",
            EntityKind::Notification => "notification",
            EntityKind::Batch => "batch",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protocol value that validates itself from JSON and renders back to it
pub trait JsonRpcEntity: Sized {
    fn kind(&self) -> EntityKind;

    /// Validate `value` and build the entity, or fail with a structured error
    fn from_json_with(value: &Value, config: &ParserConfig) -> Result<Self, JsonRpcError>;

    /// Render the entity. Never fails for a constructed entity.
    fn to_json(&self) -> Value;

    fn from_json(value: &Value) -> Result<Self, JsonRpcError> {
        Self::from_json_with(value, &ParserConfig::default())
    }

    /// Parse text, reporting malformed JSON as a parse error
    fn from_json_str(text: &str) -> Result<Self, JsonRpcError> {
        let value: Value = serde_json::from_str(text).map_err(ParseError::from)?;
        Self::from_json(&value)
    }
}

/// Any JSON-RPC message entity
///
/// Serializing renders the wire form of the held entity. Deserializing goes
/// through the classifier, so only the kinds it produces come back: a bare
/// `Id` or `Error` value does not deserialize as a message, and a recorded
/// failure comes back as the error `Response` it renders to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Notification(Notification),
    Response(Response),
    Batch(Batch),
    Id(Id),
    Error(ErrorObject),
    /// Text that was not JSON at all
    ParseFailure(ParseError),
    /// A value that violated a message shape rule
    RequestFailure(RequestError),
}

impl Message {
    pub fn type_str(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_exception(&self) -> bool {
        self.kind() == EntityKind::Exception
    }

    pub fn is_id(&self) -> bool {
        self.kind() == EntityKind::Id
    }

    pub fn is_error(&self) -> bool {
        self.kind() == EntityKind::Error
    }

    pub fn is_response(&self) -> bool {
        self.kind() == EntityKind::Response
    }

    pub fn is_request(&self) -> bool {
        self.kind() == EntityKind::Request
    }

    pub fn is_notification(&self) -> bool {
        self.kind() == EntityKind::Notification
    }

    pub fn is_batch(&self) -> bool {
        self.kind() == EntityKind::Batch
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Message::Request(request) => Some(request),
            _ => None,
        }
    }

    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Message::Notification(notification) => Some(notification),
            _ => None,
        }
    }

    pub fn as_response(&self) -> Option<&Response> {
        match self {
            Message::Response(response) => Some(response),
            _ => None,
        }
    }

    pub fn as_batch(&self) -> Option<&Batch> {
        match self {
            Message::Batch(batch) => Some(batch),
            _ => None,
        }
    }

    /// The failure this entity records, if it is one
    pub fn as_failure(&self) -> Option<JsonRpcError> {
        match self {
            Message::ParseFailure(err) => Some(err.clone().into()),
            Message::RequestFailure(err) => Some(err.clone().into()),
            _ => None,
        }
    }

    /// The method of a request or notification
    pub fn method(&self) -> Option<&str> {
        match self {
            Message::Request(request) => Some(&request.method),
            Message::Notification(notification) => Some(&notification.method),
            _ => None,
        }
    }
}

impl JsonRpcEntity for Message {
    fn kind(&self) -> EntityKind {
        match self {
            Message::Request(_) => EntityKind::Request,
            Message::Notification(_) => EntityKind::Notification,
            Message::Response(_) => EntityKind::Response,
            Message::Batch(_) => EntityKind::Batch,
            Message::Id(_) => EntityKind::Id,
            Message::Error(_) => EntityKind::Error,
            Message::ParseFailure(_) | Message::RequestFailure(_) => EntityKind::Exception,
        }
    }

    fn from_json_with(value: &Value, config: &ParserConfig) -> Result<Self, JsonRpcError> {
        Parser::with_config(*config).parse_value(value)
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<Request> for Message {
    fn from(request: Request) -> Self {
        Message::Request(request)
    }
}

impl From<Notification> for Message {
    fn from(notification: Notification) -> Self {
        Message::Notification(notification)
    }
}

impl From<Response> for Message {
    fn from(response: Response) -> Self {
        Message::Response(response)
    }
}

impl From<Batch> for Message {
    fn from(batch: Batch) -> Self {
        Message::Batch(batch)
    }
}

impl From<Id> for Message {
    fn from(id: Id) -> Self {
        Message::Id(id)
    }
}

impl From<ErrorObject> for Message {
    fn from(error: ErrorObject) -> Self {
        Message::Error(error)
    }
}

impl From<ParseError> for Message {
    fn from(err: ParseError) -> Self {
        Message::ParseFailure(err)
    }
}

impl From<RequestError> for Message {
    fn from(err: RequestError) -> Self {
        Message::RequestFailure(err)
    }
}

impl From<JsonRpcError> for Message {
    fn from(err: JsonRpcError) -> Self {
        match err {
            JsonRpcError::Parse(err) => Message::ParseFailure(err),
            JsonRpcError::Request(err) => Message::RequestFailure(err),
        }
    }
}

/// Render a wire shape. Wire shapes hold only strings, integers and JSON
/// values under string keys, so serialization into a `Value` cannot fail.
pub(crate) fn wire_value<T: Serialize + ?Sized>(wire: &T) -> Value {
    serde_json::to_value(wire).unwrap_or_default()
}

/// Describe a failure for serde, keeping the violation recorded in `data`
fn describe(err: &JsonRpcError) -> String {
    match &err.error().data {
        Some(Value::String(reason)) => format!("{err}: {reason}"),
        Some(data) => format!("{err}: {data}"),
        None => err.to_string(),
    }
}

// Entities deserialize through the same validation as `from_json`.
macro_rules! impl_deserialize_via_json {
    ($($ty:ty),* $(,)?) => {$(
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = Value::deserialize(deserializer)?;
                <$ty as JsonRpcEntity>::from_json(&value)
                    .map_err(|err| serde::de::Error::custom(describe(&err)))
            }
        }
    )*};
}

impl_deserialize_via_json!(Request, Notification, Response, Batch, ErrorObject, Message);
