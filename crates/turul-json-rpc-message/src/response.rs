use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ParserConfig;
use crate::entity::{EntityKind, JsonRpcEntity, wire_value};
use crate::error::{ErrorObject, JsonRpcError, RequestError};
use crate::types::{Id, JsonRpcVersion};

/// The outcome carried by a response: exactly one of result or error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    /// Success result with data (may itself be `null`)
    Result(Value),
    /// Error object
    Error(ErrorObject),
}

/// Borrowed view of a response object
pub(crate) struct ResponseShape<'a> {
    pub id: Id,
    pub payload: PayloadShape<'a>,
}

pub(crate) enum PayloadShape<'a> {
    Result(&'a Value),
    Error(i64, &'a str, Option<&'a Value>),
}

/// Validate a response object without copying its payload
pub(crate) fn inspect_response<'a>(
    obj: &'a Map<String, Value>,
    config: &ParserConfig,
) -> Result<ResponseShape<'a>, RequestError> {
    let id = match obj.get("id") {
        None => {
            return Err(RequestError::invalid_request(Id::Null).with_data("id is missing"));
        }
        Some(raw) => Id::inspect(raw)
            .map_err(|reason| RequestError::invalid_request(Id::Null).with_data(reason))?,
    };
    let reject = |reason: &'static str| RequestError::invalid_request(&id).with_data(reason);

    JsonRpcVersion::check(obj, config).map_err(reject)?;

    match (obj.get("result"), obj.get("error")) {
        (Some(_), Some(_)) => Err(reject("response must not contain both result and error")),
        (None, None) => Err(reject("response must contain result or error")),
        (Some(result), None) => Ok(ResponseShape {
            id,
            payload: PayloadShape::Result(result),
        }),
        (None, Some(error)) => {
            let (code, message, data) = ErrorObject::inspect(error).map_err(reject)?;
            Ok(ResponseShape {
                id,
                payload: PayloadShape::Error(code, message, data),
            })
        }
    }
}

/// A JSON-RPC response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub id: Id,
    pub payload: ResponsePayload,
}

impl Response {
    /// Successful response; `id` may be a parsed `&Request`
    pub fn success(id: impl Into<Id>, result: Value) -> Self {
        Self {
            id: id.into(),
            payload: ResponsePayload::Result(result),
        }
    }

    /// Error response; `id` may be a parsed `&Request`
    pub fn failure(id: impl Into<Id>, error: ErrorObject) -> Self {
        Self {
            id: id.into(),
            payload: ResponsePayload::Error(error),
        }
    }

    /// Build from optional parts, enforcing that exactly one is set
    pub fn new(
        id: impl Into<Id>,
        result: Option<Value>,
        error: Option<ErrorObject>,
    ) -> Result<Self, RequestError> {
        let id = id.into();
        match (result, error) {
            (Some(result), None) => Ok(Self::success(id, result)),
            (None, Some(error)) => Ok(Self::failure(id, error)),
            (Some(_), Some(_)) => Err(RequestError::invalid_request(id)
                .with_data("response must not contain both result and error")),
            (None, None) => Err(RequestError::invalid_request(id)
                .with_data("response must contain result or error")),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            ResponsePayload::Result(result) => Some(result),
            ResponsePayload::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorObject> {
        match &self.payload {
            ResponsePayload::Result(_) => None,
            ResponsePayload::Error(error) => Some(error),
        }
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResponsePayload::Error(_))
    }
}

impl JsonRpcEntity for Response {
    fn kind(&self) -> EntityKind {
        EntityKind::Response
    }

    fn from_json_with(value: &Value, config: &ParserConfig) -> Result<Self, JsonRpcError> {
        let obj = value.as_object().ok_or_else(|| {
            RequestError::invalid_request(Id::Null).with_data("response must be an object")
        })?;

        let shape = inspect_response(obj, config)?;
        let payload = match shape.payload {
            PayloadShape::Result(result) => ResponsePayload::Result(result.clone()),
            PayloadShape::Error(code, message, data) => ResponsePayload::Error(ErrorObject {
                code,
                message: message.to_string(),
                data: data.cloned(),
            }),
        };

        Ok(Self {
            id: shape.id,
            payload,
        })
    }

    fn to_json(&self) -> Value {
        wire_value(self)
    }
}

/// Wire shape of a response; the payload becomes its `result` or `error` member
#[derive(Serialize)]
struct ResponseWire<'a> {
    #[serde(rename = "jsonrpc")]
    version: JsonRpcVersion,
    #[serde(flatten)]
    payload: &'a ResponsePayload,
    id: &'a Id,
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ResponseWire {
            version: JsonRpcVersion::V2_0,
            payload: &self.payload,
            id: &self.id,
        }
        .serialize(serializer)
    }
}

/// The failure is the response: same error object, same id
impl From<RequestError> for Response {
    fn from(err: RequestError) -> Self {
        Self::failure(err.id, err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_codes;
    use crate::request::Request;
    use serde_json::json;

    #[test]
    fn test_response_success_round_trip() {
        let raw = json!({"jsonrpc": "2.0", "result": {"sum": 3}, "id": 1});
        let response = Response::from_json(&raw).unwrap();

        assert_eq!(response.id, Id::Number(1));
        assert_eq!(response.result(), Some(&json!({"sum": 3})));
        assert!(!response.is_error());
        assert_eq!(response.to_json(), raw);
    }

    #[test]
    fn test_response_error_round_trip() {
        let raw = json!({
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found"},
            "id": "1"
        });
        let response = Response::from_json(&raw).unwrap();

        assert!(response.is_error());
        assert_eq!(response.error().map(|e| e.code), Some(-32601));
        assert_eq!(response.to_json(), raw);
    }

    #[test]
    fn test_null_result_is_a_result() {
        let raw = json!({"jsonrpc": "2.0", "result": null, "id": 2});
        let response = Response::from_json(&raw).unwrap();
        assert_eq!(response.result(), Some(&Value::Null));
        assert_eq!(response.to_json(), raw);
    }

    #[test]
    fn test_response_requires_exactly_one_payload() {
        let both = json!({
            "jsonrpc": "2.0",
            "result": 1,
            "error": {"code": 1, "message": "x"},
            "id": 5
        });
        let err = Response::from_json(&both).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
        assert_eq!(err.id(), &Id::Number(5));

        let neither = json!({"jsonrpc": "2.0", "id": 5});
        let err = Response::from_json(&neither).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
        assert_eq!(err.id(), &Id::Number(5));
    }

    #[test]
    fn test_response_new_enforces_invariant() {
        assert!(Response::new(Id::Number(1), Some(json!(1)), None).is_ok());
        assert!(Response::new(Id::Number(1), None, Some(ErrorObject::internal_error())).is_ok());

        let err = Response::new(
            Id::Number(1),
            Some(json!(1)),
            Some(ErrorObject::internal_error()),
        )
        .unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
        assert!(Response::new(Id::Number(1), None, None).is_err());
    }

    #[test]
    fn test_response_missing_id() {
        let err = Response::from_json(&json!({"jsonrpc": "2.0", "result": 1})).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
        assert!(err.id().is_null());
    }

    #[test]
    fn test_response_malformed_error_keeps_id() {
        let raw = json!({"jsonrpc": "2.0", "error": {"code": "x"}, "id": "abc"});
        let err = Response::from_json(&raw).unwrap_err();
        assert_eq!(err.id(), &Id::from("abc"));
    }

    #[test]
    fn test_response_for_request() {
        let request = Request::new_no_params("abc", "echo");
        let response = Response::success(&request, json!("hi"));
        assert_eq!(response.id, Id::from("abc"));

        let response = Response::failure(&request, ErrorObject::new(7, "app failure"));
        assert_eq!(
            response.to_json(),
            json!({"jsonrpc": "2.0", "error": {"code": 7, "message": "app failure"}, "id": "abc"})
        );
    }

    #[test]
    fn test_response_from_request_error() {
        let err = RequestError::invalid_params(Id::Number(8)).with_data("x must be > 0");
        let expected = err.to_json();
        let response = Response::from(err);
        assert!(response.is_error());
        assert_eq!(response.to_json(), expected);
    }
}
