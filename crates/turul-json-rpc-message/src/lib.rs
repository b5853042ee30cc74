//! # JSON-RPC 2.0 Message Model
//!
//! A transport-agnostic message layer for JSON-RPC 2.0. Raw JSON values are
//! classified and validated into strongly-typed entities (requests,
//! notifications, responses, batches), and every entity can be rendered back
//! into a `serde_json::Value`.
//!
//! ## Features
//! - Structural validation of every message kind against the JSON-RPC 2.0 rules
//! - Failures that are themselves ready-to-send error responses
//! - Batches that keep invalid members in place instead of aborting
//! - Cheap classification predicates for pre-filtering
//!
//! ```rust
//! use turul_json_rpc_message::prelude::*;
//!
//! let message = parse(r#"{"jsonrpc":"2.0","method":"sum","params":[1,2],"id":7}"#).unwrap();
//! let request = message.as_request().unwrap();
//! assert_eq!(request.method, "sum");
//!
//! let reply = RequestError::method_not_found(request);
//! assert_eq!(reply.to_json()["error"]["code"], -32601);
//! ```

pub mod batch;
pub mod config;
pub mod entity;
pub mod error;
pub mod notification;
pub mod params;
pub mod parser;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use batch::Batch;
pub use config::ParserConfig;
pub use entity::{EntityKind, JsonRpcEntity, Message};
pub use error::{
    ErrorObject, JsonRpcError, JsonRpcErrorCode, ParamError, ParseError, RequestError,
};
pub use notification::Notification;
pub use params::Params;
pub use parser::{Parser, is_batch, is_notification, is_request, is_response, parse, parse_value};
pub use request::Request;
pub use response::{Response, ResponsePayload};
pub use types::{Id, JsonRpcVersion};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;

    // Whole protocol-reserved range
    pub const RESERVED_START: i64 = -32768;
    pub const RESERVED_END: i64 = -32000;
}
