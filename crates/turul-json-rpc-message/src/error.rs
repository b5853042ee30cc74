use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, wire_value};
use crate::error_codes;
use crate::types::{Id, JsonRpcVersion};

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }

    /// Map a numeric code back onto a known code, if it is one
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            error_codes::PARSE_ERROR => Some(JsonRpcErrorCode::ParseError),
            error_codes::INVALID_REQUEST => Some(JsonRpcErrorCode::InvalidRequest),
            error_codes::METHOD_NOT_FOUND => Some(JsonRpcErrorCode::MethodNotFound),
            error_codes::INVALID_PARAMS => Some(JsonRpcErrorCode::InvalidParams),
            error_codes::INTERNAL_ERROR => Some(JsonRpcErrorCode::InternalError),
            c if (error_codes::SERVER_ERROR_START..=error_codes::SERVER_ERROR_END)
                .contains(&c) =>
            {
                Some(JsonRpcErrorCode::ServerError(c))
            }
            _ => None,
        }
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC error object: the `error` member of an error response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Error object carrying the standard message for `code`
    pub fn from_code(code: JsonRpcErrorCode) -> Self {
        Self::new(code.code(), code.message())
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn parse_error() -> Self {
        Self::from_code(JsonRpcErrorCode::ParseError)
    }

    pub fn invalid_request() -> Self {
        Self::from_code(JsonRpcErrorCode::InvalidRequest)
    }

    pub fn method_not_found() -> Self {
        Self::from_code(JsonRpcErrorCode::MethodNotFound)
    }

    pub fn invalid_params() -> Self {
        Self::from_code(JsonRpcErrorCode::InvalidParams)
    }

    pub fn internal_error() -> Self {
        Self::from_code(JsonRpcErrorCode::InternalError)
    }

    /// Whether the code lies in the protocol-reserved range [-32768, -32000].
    /// Application codes are expected to stay outside it.
    pub fn is_reserved(&self) -> bool {
        (error_codes::RESERVED_START..=error_codes::RESERVED_END).contains(&self.code)
    }

    pub fn error_code(&self) -> Option<JsonRpcErrorCode> {
        JsonRpcErrorCode::from_code(self.code)
    }

    /// Validate an error object without taking ownership of its members
    pub(crate) fn inspect(
        value: &Value,
    ) -> Result<(i64, &str, Option<&Value>), &'static str> {
        let obj = value.as_object().ok_or("error must be an object")?;
        let code = match obj.get("code") {
            None => return Err("error code is missing"),
            Some(code) => code.as_i64().ok_or("error code must be an integer")?,
        };
        let message = match obj.get("message") {
            None => return Err("error message is missing"),
            Some(message) => message.as_str().ok_or("error message must be a string")?,
        };
        Ok((code, message, obj.get("data")))
    }
}

impl JsonRpcEntity for ErrorObject {
    fn kind(&self) -> EntityKind {
        EntityKind::Error
    }

    fn from_json_with(value: &Value, _config: &ParserConfig) -> Result<Self, JsonRpcError> {
        let (code, message, data) = Self::inspect(value)
            .map_err(|reason| RequestError::invalid_request(Id::Null).with_data(reason))?;
        Ok(Self {
            code,
            message: message.to_string(),
            data: data.cloned(),
        })
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Wire shape of an error response
#[derive(Serialize)]
struct ErrorResponse<'a> {
    #[serde(rename = "jsonrpc")]
    version: JsonRpcVersion,
    error: &'a ErrorObject,
    id: &'a Id,
}

impl<'a> ErrorResponse<'a> {
    fn new(error: &'a ErrorObject, id: &'a Id) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            error,
            id,
        }
    }
}

/// Failure to turn text into a JSON value at all.
///
/// Always code -32700 and always answered with a null id.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .error.message)]
pub struct ParseError {
    pub error: ErrorObject,
}

impl ParseError {
    pub fn new() -> Self {
        Self {
            error: ErrorObject::parse_error(),
        }
    }

    /// Parse error carrying the lexer's diagnostic
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.error.data = Some(data.into());
        self
    }

    /// Complete error response for this failure
    pub fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl Default for ParseError {
    fn default() -> Self {
        Self::new()
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::new().with_data(err.to_string())
    }
}

/// Failure scoped to a single message: an error object plus the id of the
/// request it answers (null when no id could be recovered).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .error.message)]
pub struct RequestError {
    pub error: ErrorObject,
    pub id: Id,
}

impl RequestError {
    pub fn new(error: ErrorObject, id: impl Into<Id>) -> Self {
        Self {
            error,
            id: id.into(),
        }
    }

    /// -32600: the value is not a valid message
    pub fn invalid_request(id: impl Into<Id>) -> Self {
        Self::new(ErrorObject::invalid_request(), id)
    }

    /// -32601: the method does not exist or is not available
    pub fn method_not_found(id: impl Into<Id>) -> Self {
        Self::new(ErrorObject::method_not_found(), id)
    }

    /// -32602: invalid method parameters
    pub fn invalid_params(id: impl Into<Id>) -> Self {
        Self::new(ErrorObject::invalid_params(), id)
    }

    /// -32603: internal error while handling the request
    pub fn internal_error(id: impl Into<Id>) -> Self {
        Self::new(ErrorObject::internal_error(), id)
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.error.data = Some(data.into());
        self
    }

    pub fn code(&self) -> i64 {
        self.error.code
    }

    /// Complete error response for this failure
    pub fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl Serialize for ParseError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorResponse::new(&self.error, &Id::Null).serialize(serializer)
    }
}

impl Serialize for RequestError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorResponse::new(&self.error, &self.id).serialize(serializer)
    }
}

/// Any failure produced while parsing a message
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(untagged)]
pub enum JsonRpcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

static NULL_ID: Id = Id::Null;

impl JsonRpcError {
    pub fn error(&self) -> &ErrorObject {
        match self {
            JsonRpcError::Parse(e) => &e.error,
            JsonRpcError::Request(e) => &e.error,
        }
    }

    pub fn id(&self) -> &Id {
        match self {
            JsonRpcError::Parse(_) => &NULL_ID,
            JsonRpcError::Request(e) => &e.id,
        }
    }

    pub fn code(&self) -> i64 {
        self.error().code
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, JsonRpcError::Parse(_))
    }

    /// Complete error response for this failure
    pub fn to_json(&self) -> Value {
        wire_value(self)
    }
}

/// Lookup failures on a parameter set
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("parameter '{0}' not found")]
    MissingKey(String),

    #[error("parameter at index {0} not found")]
    MissingIndex(usize),

    #[error("parameter '{key}' has an unexpected type: {source}")]
    TypeMismatch {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ParamError {
    /// Turn the lookup failure into an invalid-params reply for `id`
    pub fn into_request_error(self, id: impl Into<Id>) -> RequestError {
        RequestError::invalid_params(id).with_data(self.to_string())
    }
}
