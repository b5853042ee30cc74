//! # JSON-RPC Message Prelude
//!
//! Convenient re-exports of the types and functions most callers need.
//!
//! ```rust
//! use turul_json_rpc_message::prelude::*;
//! ```

// Entities
pub use crate::batch::Batch;
pub use crate::entity::{EntityKind, JsonRpcEntity, Message};
pub use crate::notification::Notification;
pub use crate::params::Params;
pub use crate::request::Request;
pub use crate::response::{Response, ResponsePayload};
pub use crate::types::{Id, JsonRpcVersion};

// Errors
pub use crate::error::{
    ErrorObject, JsonRpcError, JsonRpcErrorCode, ParamError, ParseError, RequestError,
};

// Parsing
pub use crate::config::ParserConfig;
pub use crate::parser::{
    Parser, is_batch, is_notification, is_request, is_response, parse, parse_value,
};

// Standard error codes
pub use crate::error_codes::*;
