use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, wire_value};
use crate::error::{JsonRpcError, RequestError};

/// Correlation id of a JSON-RPC request.
///
/// The three variants never compare equal to each other, so `Number(1)` and
/// `String("1")` are distinct ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Id {
    #[default]
    Null,
    String(String),
    Number(i64),
}

impl Id {
    pub fn is_null(&self) -> bool {
        matches!(self, Id::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Id::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Id::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether `value` has a shape that converts into an id
    pub fn accepts(value: &Value) -> bool {
        Self::inspect(value).is_ok()
    }

    pub(crate) fn inspect(value: &Value) -> Result<Self, &'static str> {
        match value {
            Value::Null => Ok(Id::Null),
            Value::String(s) => Ok(Id::String(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Id::Number)
                .ok_or("id must be an integer"),
            _ => Err("id must be integer, string or null"),
        }
    }

    /// Recover an id from a message object, falling back to null when the
    /// member is absent or malformed.
    pub(crate) fn recover(obj: &Map<String, Value>) -> Self {
        obj.get("id")
            .and_then(|raw| Self::inspect(raw).ok())
            .unwrap_or_default()
    }
}

impl JsonRpcEntity for Id {
    fn kind(&self) -> EntityKind {
        EntityKind::Id
    }

    fn from_json_with(value: &Value, _config: &ParserConfig) -> Result<Self, JsonRpcError> {
        Self::inspect(value)
            .map_err(|reason| RequestError::invalid_request(Id::Null).with_data(reason).into())
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

/// Renders the JSON form, so string ids keep their quotes.
impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Null => write!(f, "null"),
            Id::String(s) => write!(f, "{}", Value::String(s.clone())),
            Id::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&Id> for Id {
    fn from(id: &Id) -> Self {
        id.clone()
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Id::inspect(&value).map_err(serde::de::Error::custom)
    }
}

/// Protocol version marker, rendered as the `jsonrpc` member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonRpcVersion {
    #[default]
    #[serde(rename = "2.0")]
    V2_0,
}

impl JsonRpcVersion {
    /// Check the `jsonrpc` member of a message object
    pub(crate) fn check(
        obj: &Map<String, Value>,
        config: &ParserConfig,
    ) -> Result<(), &'static str> {
        if !config.require_version {
            return Ok(());
        }
        let raw = obj.get("jsonrpc").ok_or("jsonrpc is missing")?;
        JsonRpcVersion::deserialize(raw)
            .map(|_| ())
            .map_err(|_| "invalid jsonrpc value")
    }
}
