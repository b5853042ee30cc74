use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, wire_value};
use crate::error::{JsonRpcError, RequestError};
use crate::params::Params;
use crate::types::{Id, JsonRpcVersion};

/// Borrowed view of the members shared by requests and notifications
pub(crate) struct CallShape<'a> {
    pub method: &'a str,
    pub params: Option<&'a Value>,
}

/// Where a call object broke the shape rules
pub(crate) enum CallViolation {
    Envelope(&'static str),
    Method(&'static str),
}

impl CallViolation {
    /// Violations on `method` carry no id; anything else answers `id`
    pub(crate) fn into_error(self, id: &Id) -> RequestError {
        match self {
            CallViolation::Envelope(reason) => {
                RequestError::invalid_request(id).with_data(reason)
            }
            CallViolation::Method(reason) => {
                RequestError::invalid_request(Id::Null).with_data(reason)
            }
        }
    }
}

/// Validate the version, method and params members of a call object
pub(crate) fn inspect_call<'a>(
    obj: &'a Map<String, Value>,
    config: &ParserConfig,
) -> Result<CallShape<'a>, CallViolation> {
    JsonRpcVersion::check(obj, config).map_err(CallViolation::Envelope)?;

    let method = match obj.get("method") {
        None => return Err(CallViolation::Method("method is missing")),
        Some(Value::String(method)) => method.as_str(),
        Some(_) => return Err(CallViolation::Method("method must be a string value")),
    };
    if method.is_empty() && !config.allow_empty_method {
        return Err(CallViolation::Method("method must not be empty"));
    }

    let params = obj.get("params");
    if params.is_some_and(|p| !Params::accepts(p)) {
        return Err(CallViolation::Envelope(
            "params must be an array, an object or null",
        ));
    }

    Ok(CallShape { method, params })
}

/// Wire shape shared by requests and notifications
#[derive(Serialize)]
pub(crate) struct CallWire<'a> {
    #[serde(rename = "jsonrpc")]
    version: JsonRpcVersion,
    method: &'a str,
    #[serde(skip_serializing_if = "Params::is_null")]
    params: &'a Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Id>,
}

impl<'a> CallWire<'a> {
    pub(crate) fn new(method: &'a str, params: &'a Params, id: Option<&'a Id>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method,
            params,
            id,
        }
    }
}

/// A JSON-RPC request: a call that expects a response
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub params: Params,
    pub id: Id,
}

impl Request {
    pub fn new(id: impl Into<Id>, method: impl Into<String>, params: Params) -> Self {
        Self {
            method: method.into(),
            params,
            id: id.into(),
        }
    }

    /// Create a new request with no parameters
    pub fn new_no_params(id: impl Into<Id>, method: impl Into<String>) -> Self {
        Self::new(id, method, Params::Null)
    }

    /// Create a new request with object parameters
    pub fn new_with_object_params(
        id: impl Into<Id>,
        method: impl Into<String>,
        params: HashMap<String, Value>,
    ) -> Self {
        Self::new(id, method, Params::Map(params))
    }

    /// Create a new request with array parameters
    pub fn new_with_array_params(
        id: impl Into<Id>,
        method: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        Self::new(id, method, Params::Array(params))
    }
}

impl JsonRpcEntity for Request {
    fn kind(&self) -> EntityKind {
        EntityKind::Request
    }

    fn from_json_with(value: &Value, config: &ParserConfig) -> Result<Self, JsonRpcError> {
        let obj = value.as_object().ok_or_else(|| {
            RequestError::invalid_request(Id::Null).with_data("request must be an object")
        })?;

        let id = match obj.get("id") {
            None => {
                return Err(RequestError::invalid_request(Id::Null)
                    .with_data("id is missing")
                    .into());
            }
            Some(raw) => Id::inspect(raw)
                .map_err(|reason| RequestError::invalid_request(Id::Null).with_data(reason))?,
        };

        let shape = inspect_call(obj, config).map_err(|v| v.into_error(&id))?;
        let params = Params::from_member(shape.params)
            .map_err(|reason| RequestError::invalid_request(&id).with_data(reason))?;

        Ok(Self {
            method: shape.method.to_string(),
            params,
            id,
        })
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl Serialize for Request {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        CallWire::new(&self.method, &self.params, Some(&self.id)).serialize(serializer)
    }
}

/// Lets a parsed request stand in for its id when building replies
impl From<&Request> for Id {
    fn from(request: &Request) -> Self {
        request.id.clone()
    }
}
