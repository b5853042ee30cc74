use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, wire_value};
use crate::error::{JsonRpcError, RequestError};
use crate::params::Params;
use crate::request::{CallWire, inspect_call};
use crate::types::Id;

/// A JSON-RPC notification (request without an id)
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub method: String,
    pub params: Params,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Create a new notification with no parameters
    pub fn new_no_params(method: impl Into<String>) -> Self {
        Self::new(method, Params::Null)
    }

    /// Create a new notification with object parameters
    pub fn new_with_object_params(
        method: impl Into<String>,
        params: HashMap<String, Value>,
    ) -> Self {
        Self::new(method, Params::Map(params))
    }

    /// Create a new notification with array parameters
    pub fn new_with_array_params(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self::new(method, Params::Array(params))
    }
}

impl JsonRpcEntity for Notification {
    fn kind(&self) -> EntityKind {
        EntityKind::Notification
    }

    // A notification has no id to echo, so every failure carries a null id.
    fn from_json_with(value: &Value, config: &ParserConfig) -> Result<Self, JsonRpcError> {
        let obj = value.as_object().ok_or_else(|| {
            RequestError::invalid_request(Id::Null).with_data("notification must be an object")
        })?;
        if obj.contains_key("id") {
            return Err(RequestError::invalid_request(Id::Null)
                .with_data("notification must not carry an id")
                .into());
        }

        let shape = inspect_call(obj, config).map_err(|v| v.into_error(&Id::Null))?;
        let params = Params::from_member(shape.params)
            .map_err(|reason| RequestError::invalid_request(Id::Null).with_data(reason))?;

        Ok(Self {
            method: shape.method.to_string(),
            params,
        })
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl Serialize for Notification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        CallWire::new(&self.method, &self.params, None).serialize(serializer)
    }
}
